use crate::{embed, survey};
use anyhow::Context;
use chrono::Datelike;
use stencil_core::catalog::Catalog;
use stencil_core::git::{GitClient, SystemGit};
use stencil_core::recipe::Recipe;
use stencil_core::scaffold;
use stencil_core::scanner::{CommandProbe, PathProbe};
use stencil_core::skeleton::SkeletonStore;
use stencil_core::{io, paths, StencilError};
use std::path::Path;

pub fn run(root: &Path, recipe_file: Option<&Path>, no_git: bool) -> anyhow::Result<()> {
    if Recipe::exists(root) {
        return Err(StencilError::AlreadyInitialized(paths::RECIPE_FILE.to_string()).into());
    }
    io::ensure_dir(root).with_context(|| format!("failed to create {}", root.display()))?;

    println!("Initializing project in: {}", root.display());

    // 1. Build the recipe: from a file, or by asking.
    let catalog = Catalog::builtin();
    let recipe = match recipe_file {
        Some(path) => Recipe::read(path)
            .with_context(|| format!("failed to read recipe {}", path.display()))?,
        None => {
            let default_name = root
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "project".to_string());
            survey::run(&catalog, &default_name)?
        }
    };
    recipe.save(root).context("failed to write stencil.yaml")?;
    println!("  created: {}", paths::RECIPE_FILE);

    // 2. Refresh the built-in skeletons in the cache.
    let cache = paths::skeletons_dir()?;
    let installed = embed::install_builtin_skeletons(&cache)
        .with_context(|| format!("failed to install skeletons into {}", cache.display()))?;
    println!("  installed: {installed} skeleton files ({})", cache.display());

    // 3. Scaffold the project from the matching skeletons.
    let store = SkeletonStore::new(&cache);
    let year = chrono::Local::now().year();
    let summary = scaffold::scaffold(&store, root, &recipe, year).context("scaffolding failed")?;
    for applied in &summary.skeletons {
        println!(
            "  applied: skeleton '{}' ({} files)",
            applied.name,
            applied.files.len()
        );
    }

    // 4. Standard directories.
    for dir in paths::STANDARD_DIRS {
        io::ensure_dir(&root.join(dir))?;
        println!("  created: {dir}/");
    }

    // 5. Version control.
    if no_git {
        println!("  skipped: git init (--no-git)");
    } else if !PathProbe.exists("git") {
        println!("  warning: git not found, skipping repository setup");
    } else {
        let git = SystemGit;
        git.init(root)?;
        git.create_branch(root, "develop")?;
        println!("  created: git repository on branch 'develop'");
    }

    println!("\nProject initialized successfully.");
    println!("Next: stencil verify");
    Ok(())
}
