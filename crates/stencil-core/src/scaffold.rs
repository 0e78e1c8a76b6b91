use crate::error::Result;
use crate::merge::{self, AppliedFile};
use crate::paths::GENERIC_SKELETON;
use crate::recipe::Recipe;
use crate::skeleton::{SkeletonManifest, SkeletonStore};
use crate::template::TemplateContext;
use std::path::Path;

// ---------------------------------------------------------------------------
// Scaffolder
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct AppliedSkeleton {
    pub name: String,
    pub files: Vec<AppliedFile>,
}

/// Result of one scaffold run: which skeletons were applied, in order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScaffoldSummary {
    pub skeletons: Vec<AppliedSkeleton>,
}

/// Materialize a project directory from the store: the generic skeleton
/// first, then every skeleton whose manifest matches the recipe, in name
/// order.
pub fn scaffold(
    store: &SkeletonStore,
    target: &Path,
    recipe: &Recipe,
    year: i32,
) -> Result<ScaffoldSummary> {
    let ctx = TemplateContext::from_recipe(recipe, year);
    let mut summary = ScaffoldSummary::default();

    let mut selected = vec![GENERIC_SKELETON.to_string()];
    for name in store.list()? {
        if name == GENERIC_SKELETON {
            continue;
        }
        let manifest = store.manifest(&name)?;
        if matches(&manifest, recipe) {
            selected.push(name);
        }
    }

    for name in selected {
        tracing::debug!(skeleton = %name, "scaffolding");
        let files = merge::apply_skeleton(&store.skeleton_dir(&name), target, &ctx)?;
        summary.skeletons.push(AppliedSkeleton { name, files });
    }
    Ok(summary)
}

/// A skeleton matches when it provides the recipe's code stack, its
/// persistence layer, or its deployment runtime.
fn matches(manifest: &SkeletonManifest, recipe: &Recipe) -> bool {
    if let Some(stack) = &recipe.stack {
        if !manifest.provides.language.is_empty()
            && manifest.provides.language == stack.language
            && manifest.provides.tooling == stack.tooling
        {
            return true;
        }
    }
    if recipe.persistence.is_configured()
        && manifest
            .provides
            .persistence
            .eq_ignore_ascii_case(&recipe.persistence.kind)
    {
        return true;
    }
    if recipe.deployment.is_configured()
        && manifest
            .provides
            .runtime
            .eq_ignore_ascii_case(&recipe.deployment.kind)
    {
        return true;
    }
    false
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_skeleton(root: &Path, name: &str, manifest: &str, files: &[(&str, &str)]) {
        let dir = root.join(name);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("skeleton.yaml"), manifest).unwrap();
        for (path, content) in files {
            let p = dir.join(path);
            std::fs::create_dir_all(p.parent().unwrap()).unwrap();
            std::fs::write(p, content).unwrap();
        }
    }

    fn store_with_builtins() -> (TempDir, SkeletonStore) {
        let dir = TempDir::new().unwrap();
        write_skeleton(
            dir.path(),
            "generic",
            "name: generic\ntype: generic\n",
            &[("README.md.tmpl", "# {{ project.name }}\n")],
        );
        write_skeleton(
            dir.path(),
            "go-cli",
            "name: go-cli\ntype: code\nprovides:\n  language: Go\n  tooling: Cobra\n",
            &[("Makefile", "build:\n\tgo build\n")],
        );
        write_skeleton(
            dir.path(),
            "postgresql",
            "name: postgresql\ntype: persistence\nprovides:\n  persistence: postgresql\n",
            &[("docker-compose.yml", "services:\n  db:\n    image: postgres:16\n")],
        );
        write_skeleton(
            dir.path(),
            "kubernetes",
            "name: kubernetes\ntype: deployment\nprovides:\n  runtime: kubernetes\n",
            &[("deploy/helm/Chart.yaml.tmpl", "name: {{ project.name }}\n")],
        );
        let store = SkeletonStore::new(dir.path());
        (dir, store)
    }

    fn recipe_yaml(yaml: &str) -> Recipe {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn generic_always_applied_first() {
        let (_dir, store) = store_with_builtins();
        let target = TempDir::new().unwrap();
        let recipe = recipe_yaml("project:\n  name: orion\n  type: custom\n");

        let summary = scaffold(&store, target.path(), &recipe, 2026).unwrap();
        assert_eq!(summary.skeletons[0].name, "generic");
        assert_eq!(summary.skeletons.len(), 1);
        assert_eq!(
            std::fs::read_to_string(target.path().join("README.md")).unwrap(),
            "# orion\n"
        );
    }

    #[test]
    fn code_skeleton_matches_language_and_tooling() {
        let (_dir, store) = store_with_builtins();
        let target = TempDir::new().unwrap();
        let recipe = recipe_yaml(
            "project:\n  name: orion\n  type: go-cli\nstack:\n  language: Go\n  tooling: Cobra\n",
        );

        let summary = scaffold(&store, target.path(), &recipe, 2026).unwrap();
        let names: Vec<_> = summary.skeletons.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["generic", "go-cli"]);
        assert!(target.path().join("Makefile").exists());
    }

    #[test]
    fn language_match_alone_is_not_enough() {
        let (_dir, store) = store_with_builtins();
        let target = TempDir::new().unwrap();
        let recipe = recipe_yaml(
            "project:\n  name: orion\n  type: custom\nstack:\n  language: Go\n  tooling: urfave\n",
        );

        let summary = scaffold(&store, target.path(), &recipe, 2026).unwrap();
        let names: Vec<_> = summary.skeletons.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["generic"]);
    }

    #[test]
    fn persistence_and_deployment_skeletons_match() {
        let (_dir, store) = store_with_builtins();
        let target = TempDir::new().unwrap();
        let recipe = recipe_yaml(
            "project:\n  name: orion\n  type: custom\npersistence:\n  type: postgresql\ndeployment:\n  type: kubernetes\n",
        );

        let summary = scaffold(&store, target.path(), &recipe, 2026).unwrap();
        let names: Vec<_> = summary.skeletons.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["generic", "kubernetes", "postgresql"]);
        assert!(target.path().join("docker-compose.yml").exists());
        assert!(target.path().join("deploy/helm/Chart.yaml").exists());
    }

    #[test]
    fn none_sentinel_selects_nothing() {
        let (_dir, store) = store_with_builtins();
        let target = TempDir::new().unwrap();
        let recipe = recipe_yaml(
            "project:\n  name: orion\n  type: custom\npersistence:\n  type: none\ndeployment:\n  type: none\n",
        );

        let summary = scaffold(&store, target.path(), &recipe, 2026).unwrap();
        assert_eq!(summary.skeletons.len(), 1);
    }

    #[test]
    fn empty_store_still_fails_without_generic() {
        let dir = TempDir::new().unwrap();
        let store = SkeletonStore::new(PathBuf::from(dir.path()));
        let target = TempDir::new().unwrap();
        let recipe = recipe_yaml("project:\n  name: orion\n  type: custom\n");
        // The generic skeleton is mandatory; an empty store is a setup error.
        assert!(scaffold(&store, target.path(), &recipe, 2026).is_err());
    }
}
