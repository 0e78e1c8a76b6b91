use crate::error::{Result, StencilError};
use std::path::Path;
use std::process::Command;

/// Version-control operations the tool needs. One synchronous call each, so
/// core logic never depends on process-spawning specifics.
pub trait GitClient {
    fn init(&self, path: &Path) -> Result<()>;
    fn create_branch(&self, path: &Path, branch: &str) -> Result<()>;
    fn set_config(&self, path: &Path, key: &str, value: &str) -> Result<()>;
}

/// Production client shelling out to the `git` binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemGit;

impl SystemGit {
    fn run(&self, path: &Path, operation: &str, args: &[&str]) -> Result<()> {
        let output = Command::new("git")
            .args(args)
            .current_dir(path)
            .output()
            .map_err(|e| StencilError::GitFailed {
                operation: operation.to_string(),
                detail: e.to_string(),
            })?;
        if !output.status.success() {
            return Err(StencilError::GitFailed {
                operation: operation.to_string(),
                detail: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}

impl GitClient for SystemGit {
    fn init(&self, path: &Path) -> Result<()> {
        self.run(path, "init", &["init"])
    }

    fn create_branch(&self, path: &Path, branch: &str) -> Result<()> {
        self.run(path, "checkout", &["checkout", "-b", branch])
    }

    fn set_config(&self, path: &Path, key: &str, value: &str) -> Result<()> {
        self.run(path, "config", &["config", key, value])
    }
}
