use crate::error::Result;
use crate::git::GitClient;
use crate::paths::HOOKS_DIR;
use std::path::Path;

/// Point the repository's hooks path at the tracked `.githooks` directory.
pub fn install(git: &dyn GitClient, path: &Path) -> Result<()> {
    git.set_config(path, "core.hooksPath", HOOKS_DIR)
}
