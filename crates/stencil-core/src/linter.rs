use crate::error::{Result, StencilError};
use std::path::Path;

/// Linter names and the configuration file each one is expected to keep at
/// the project root. Lookup is case-insensitive since recipes are hand-written.
const LINTER_CONFIG_FILES: &[(&str, &str)] = &[
    ("golangci-lint", ".golangci.yml"),
    ("eslint", ".eslintrc.js"),
    ("ruff", "pyproject.toml"),
    ("phpstan", "phpstan.neon"),
];

/// The config filename expected for a linter, or an error for a linter this
/// tool does not know about.
pub fn config_file(linter: &str) -> Result<&'static str> {
    LINTER_CONFIG_FILES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(linter))
        .map(|(_, file)| *file)
        .ok_or_else(|| StencilError::UnknownLinter(linter.to_string()))
}

/// True when the linter's config file exists under `root`.
pub fn config_exists(root: &Path, linter: &str) -> Result<bool> {
    let file = config_file(linter)?;
    Ok(root.join(file).exists())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn known_linters_map_to_files() {
        assert_eq!(config_file("golangci-lint").unwrap(), ".golangci.yml");
        assert_eq!(config_file("eslint").unwrap(), ".eslintrc.js");
        assert_eq!(config_file("ruff").unwrap(), "pyproject.toml");
        assert_eq!(config_file("phpstan").unwrap(), "phpstan.neon");
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(config_file("ESLint").unwrap(), ".eslintrc.js");
        assert_eq!(config_file("PHPStan").unwrap(), "phpstan.neon");
    }

    #[test]
    fn unknown_linter_errors() {
        let err = config_file("clippy").unwrap_err();
        assert!(matches!(err, StencilError::UnknownLinter(_)));
    }

    #[test]
    fn config_exists_checks_root() {
        let dir = TempDir::new().unwrap();
        assert!(!config_exists(dir.path(), "eslint").unwrap());
        std::fs::write(dir.path().join(".eslintrc.js"), "module.exports = {}").unwrap();
        assert!(config_exists(dir.path(), "eslint").unwrap());
    }
}
