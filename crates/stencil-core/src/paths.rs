use crate::error::{Result, StencilError};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// File and directory constants
// ---------------------------------------------------------------------------

/// Recipe document at the project root. Its presence marks an initialized
/// project.
pub const RECIPE_FILE: &str = "stencil.yaml";

/// Manifest file inside each skeleton directory.
pub const SKELETON_MANIFEST: &str = "skeleton.yaml";

/// Suffix stripped from template filenames when written to the target.
pub const TEMPLATE_SUFFIX: &str = ".tmpl";

/// Name of the skeleton that is applied to every project.
pub const GENERIC_SKELETON: &str = "generic";

pub const COMPOSE_FILE: &str = "docker-compose.yml";
pub const DEPLOY_DIR: &str = "deploy";
pub const HOOKS_DIR: &str = ".githooks";

pub const STENCIL_HOME_DIR: &str = ".stencil";
pub const SKELETONS_SUBDIR: &str = "skeletons";

/// Directories created unconditionally at init time.
pub const STANDARD_DIRS: &[&str] = &["docs", "docs/adr"];

/// Paths every verified project must contain.
pub const REQUIRED_PATHS: &[&str] = &["LICENSE", "CONTRIBUTING.md", "deploy/helm"];

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn recipe_path(root: &Path) -> PathBuf {
    root.join(RECIPE_FILE)
}

pub fn compose_path(root: &Path) -> PathBuf {
    root.join(COMPOSE_FILE)
}

pub fn deploy_dir(root: &Path) -> PathBuf {
    root.join(DEPLOY_DIR)
}

pub fn skeleton_manifest(skeleton_dir: &Path) -> PathBuf {
    skeleton_dir.join(SKELETON_MANIFEST)
}

/// Resolve the stencil home directory: `STENCIL_HOME` if set, otherwise
/// `~/.stencil`.
pub fn stencil_home() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os("STENCIL_HOME") {
        return Ok(PathBuf::from(dir));
    }
    home::home_dir()
        .map(|h| h.join(STENCIL_HOME_DIR))
        .ok_or(StencilError::HomeNotFound)
}

/// The skeleton cache under the stencil home.
pub fn skeletons_dir() -> Result<PathBuf> {
    Ok(stencil_home()?.join(SKELETONS_SUBDIR))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
