use crate::error::{Result, StencilError};
use crate::{io, paths};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Sentinel meaning "no stack chosen" for persistence and deployment.
pub const NONE_SENTINEL: &str = "none";

// ---------------------------------------------------------------------------
// Recipe
// ---------------------------------------------------------------------------

/// The persisted record of a project's chosen technology stack and metadata.
///
/// Written once at init time and read back unmodified at verify time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(default = "default_version")]
    pub version: u32,
    pub project: Project,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<Stack>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webapp: Option<WebApp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api: Option<Api>,
    #[serde(default)]
    pub persistence: Persistence,
    #[serde(default)]
    pub deployment: Deployment,
}

fn default_version() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub customer: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// The base technology stack. Known fields are typed; anything contributed
/// by an external plugin lands in `extra`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Stack {
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub tooling: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub linter: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub testing: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cicd: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependency_management: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_release_run: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebApp {
    pub tooling: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Api {
    pub tooling: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Persistence {
    #[serde(rename = "type", default = "default_none")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deployment {
    #[serde(rename = "type", default = "default_none")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}

fn default_none() -> String {
    NONE_SENTINEL.to_string()
}

impl Default for Persistence {
    fn default() -> Self {
        Self {
            kind: default_none(),
        }
    }
}

impl Default for Deployment {
    fn default() -> Self {
        Self {
            kind: default_none(),
            provider: None,
        }
    }
}

impl Persistence {
    pub fn is_configured(&self) -> bool {
        configured(&self.kind)
    }
}

impl Deployment {
    pub fn is_configured(&self) -> bool {
        configured(&self.kind)
    }
}

fn configured(kind: &str) -> bool {
    !kind.is_empty() && !kind.eq_ignore_ascii_case(NONE_SENTINEL)
}

impl Recipe {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            version: 1,
            project: Project {
                name: name.into(),
                customer: String::new(),
                kind: kind.into(),
            },
            stack: None,
            webapp: None,
            api: None,
            persistence: Persistence::default(),
            deployment: Deployment::default(),
        }
    }

    /// True when `root` contains a recipe file.
    pub fn exists(root: &Path) -> bool {
        paths::recipe_path(root).exists()
    }

    /// Load the recipe from the project root. A missing file means the
    /// project was never initialized.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::recipe_path(root);
        if !path.exists() {
            return Err(StencilError::NotInitialized(
                paths::RECIPE_FILE.to_string(),
            ));
        }
        Self::read(&path)
    }

    /// Parse a recipe from an arbitrary file (the `--recipe` flag).
    pub fn read(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let recipe: Recipe = serde_yaml::from_str(&data)?;
        recipe.validate()?;
        Ok(recipe)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        self.validate()?;
        let data = serde_yaml::to_string(self)?;
        io::atomic_write(&paths::recipe_path(root), data.as_bytes())
    }

    /// `project.name` and `project.type` are always present.
    pub fn validate(&self) -> Result<()> {
        if self.project.name.trim().is_empty() {
            return Err(StencilError::InvalidRecipe(
                "project.name must not be empty".to_string(),
            ));
        }
        if self.project.kind.trim().is_empty() {
            return Err(StencilError::InvalidRecipe(
                "project.type must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> Recipe {
        let mut r = Recipe::new("orion", "go-cli");
        r.project.customer = "acme".to_string();
        r.stack = Some(Stack {
            language: "Go".to_string(),
            tooling: "Cobra".to_string(),
            linter: "golangci-lint".to_string(),
            ..Stack::default()
        });
        r.persistence.kind = "postgresql".to_string();
        r
    }

    #[test]
    fn yaml_roundtrip() {
        let recipe = sample();
        let yaml = serde_yaml::to_string(&recipe).unwrap();
        let parsed: Recipe = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, recipe);
    }

    #[test]
    fn minimal_recipe_gets_defaults() {
        let yaml = "project:\n  name: orion\n  type: go-cli\n";
        let recipe: Recipe = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(recipe.version, 1);
        assert!(recipe.stack.is_none());
        assert_eq!(recipe.persistence.kind, "none");
        assert!(!recipe.persistence.is_configured());
        assert!(!recipe.deployment.is_configured());
    }

    #[test]
    fn none_sentinel_is_case_insensitive() {
        let p = Persistence {
            kind: "None".to_string(),
        };
        assert!(!p.is_configured());
        let p = Persistence {
            kind: "postgresql".to_string(),
        };
        assert!(p.is_configured());
    }

    #[test]
    fn load_without_file_is_not_initialized() {
        let dir = TempDir::new().unwrap();
        let err = Recipe::load(dir.path()).unwrap_err();
        assert!(matches!(err, StencilError::NotInitialized(_)));
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let recipe = sample();
        recipe.save(dir.path()).unwrap();
        assert!(Recipe::exists(dir.path()));
        let loaded = Recipe::load(dir.path()).unwrap();
        assert_eq!(loaded, recipe);
    }

    #[test]
    fn validate_rejects_empty_name() {
        let recipe = Recipe::new("", "go-cli");
        assert!(matches!(
            recipe.validate(),
            Err(StencilError::InvalidRecipe(_))
        ));
    }

    #[test]
    fn validate_rejects_empty_type() {
        let recipe = Recipe::new("orion", "  ");
        assert!(matches!(
            recipe.validate(),
            Err(StencilError::InvalidRecipe(_))
        ));
    }

    #[test]
    fn unknown_stack_keys_survive_roundtrip() {
        let yaml = "project:\n  name: orion\n  type: mern\nstack:\n  language: TypeScript\n  tooling: React\n  monorepo: turbo\n";
        let recipe: Recipe = serde_yaml::from_str(yaml).unwrap();
        let stack = recipe.stack.as_ref().unwrap();
        assert_eq!(
            stack.extra.get("monorepo").and_then(|v| v.as_str()),
            Some("turbo")
        );
        let out = serde_yaml::to_string(&recipe).unwrap();
        assert!(out.contains("monorepo"));
    }
}
