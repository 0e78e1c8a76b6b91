use crate::error::{Result, StencilError};
use crate::paths::TEMPLATE_SUFFIX;
use crate::recipe::Recipe;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// TemplateContext
// ---------------------------------------------------------------------------

/// Flat dotted-key view of a recipe, used to render skeleton files.
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    values: BTreeMap<String, String>,
}

impl TemplateContext {
    pub fn from_recipe(recipe: &Recipe, year: i32) -> Self {
        let mut values = BTreeMap::new();
        values.insert("project.name".to_string(), recipe.project.name.clone());
        values.insert(
            "project.customer".to_string(),
            recipe.project.customer.clone(),
        );
        values.insert("project.type".to_string(), recipe.project.kind.clone());
        values.insert("year".to_string(), year.to_string());

        if let Some(stack) = &recipe.stack {
            values.insert("stack.language".to_string(), stack.language.clone());
            values.insert("stack.tooling".to_string(), stack.tooling.clone());
            values.insert("stack.linter".to_string(), stack.linter.clone());
            values.insert("stack.testing".to_string(), stack.testing.clone());
            values.insert("stack.cicd".to_string(), stack.cicd.join(", "));
            if let Some(dm) = &stack.dependency_management {
                values.insert("stack.dependency_management".to_string(), dm.clone());
            }
            if let Some(brr) = &stack.build_release_run {
                values.insert("stack.build_release_run".to_string(), brr.clone());
            }
        }
        if let Some(webapp) = &recipe.webapp {
            values.insert("webapp.tooling".to_string(), webapp.tooling.clone());
        }
        if let Some(api) = &recipe.api {
            values.insert("api.tooling".to_string(), api.tooling.clone());
        }
        values.insert(
            "persistence.type".to_string(),
            recipe.persistence.kind.clone(),
        );
        values.insert(
            "deployment.type".to_string(),
            recipe.deployment.kind.clone(),
        );
        if let Some(provider) = &recipe.deployment.provider {
            values.insert("deployment.provider".to_string(), provider.clone());
        }

        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    #[cfg(test)]
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        let values = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self { values }
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

static PLACEHOLDER_RE: OnceLock<Regex> = OnceLock::new();

fn placeholder_re() -> &'static Regex {
    PLACEHOLDER_RE.get_or_init(|| {
        Regex::new(r"\{\{\s*([A-Za-z0-9_.]+)\s*(?:\|\s*([A-Za-z0-9_]+)\s*)?\}\}").unwrap()
    })
}

/// Render `{{ dotted.key }}` placeholders against the context. An unknown
/// variable or filter aborts with an error naming it, never a silent blank.
pub fn render(content: &str, file: &str, ctx: &TemplateContext) -> Result<String> {
    let re = placeholder_re();
    let mut out = String::with_capacity(content.len());
    let mut last = 0;

    for caps in re.captures_iter(content) {
        let whole = caps.get(0).unwrap();
        let name = caps.get(1).unwrap().as_str();

        let value = ctx
            .get(name)
            .ok_or_else(|| StencilError::UnresolvedVariable {
                name: name.to_string(),
                file: file.to_string(),
            })?;

        let rendered = match caps.get(2).map(|m| m.as_str()) {
            None => value.to_string(),
            Some("lower") => value.to_lowercase(),
            Some(filter) => {
                return Err(StencilError::UnknownFilter {
                    name: filter.to_string(),
                    file: file.to_string(),
                })
            }
        };

        out.push_str(&content[last..whole.start()]);
        out.push_str(&rendered);
        last = whole.end();
    }
    out.push_str(&content[last..]);
    Ok(out)
}

/// Target-side name of a source file: the `.tmpl` suffix is dropped.
pub fn target_name(source: &str) -> &str {
    source.strip_suffix(TEMPLATE_SUFFIX).unwrap_or(source)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
