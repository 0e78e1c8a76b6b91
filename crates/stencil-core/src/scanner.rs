use crate::error::{Result, StencilError};
use std::path::Path;
use std::process::Command;

// ---------------------------------------------------------------------------
// CommandProbe
// ---------------------------------------------------------------------------

/// PATH lookup for external tools. Injected so callers never depend on the
/// real environment in tests.
pub trait CommandProbe {
    fn exists(&self, name: &str) -> bool;
}

/// Probe backed by the real PATH.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathProbe;

impl CommandProbe for PathProbe {
    fn exists(&self, name: &str) -> bool {
        which::which(name).is_ok()
    }
}

// ---------------------------------------------------------------------------
// SecretScanner
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutcome {
    /// The scanner ran and found nothing.
    Clean,
    /// The scanner binary is not installed. Non-fatal; the caller reports
    /// a warning.
    ToolMissing,
    /// The scanner ran and reported findings.
    Findings(Vec<String>),
}

/// A secret-scanning capability: one synchronous call, path in, outcome out.
pub trait SecretScanner {
    fn scan(&self, path: &Path) -> Result<ScanOutcome>;
}

/// Production scanner shelling out to `gitleaks detect -s <path>`.
pub struct GitleaksScanner<P: CommandProbe = PathProbe> {
    probe: P,
}

impl GitleaksScanner<PathProbe> {
    pub fn new() -> Self {
        Self { probe: PathProbe }
    }
}

impl Default for GitleaksScanner<PathProbe> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: CommandProbe> GitleaksScanner<P> {
    pub fn with_probe(probe: P) -> Self {
        Self { probe }
    }
}

impl<P: CommandProbe> SecretScanner for GitleaksScanner<P> {
    fn scan(&self, path: &Path) -> Result<ScanOutcome> {
        if !self.probe.exists("gitleaks") {
            return Ok(ScanOutcome::ToolMissing);
        }

        let output = Command::new("gitleaks")
            .args(["detect", "-s"])
            .arg(path)
            .output()
            .map_err(|e| StencilError::ScannerFailed(e.to_string()))?;

        if output.status.success() {
            return Ok(ScanOutcome::Clean);
        }

        // gitleaks exits non-zero when it finds secrets; the findings are in
        // its combined output. Non-zero with no output is a genuine crash.
        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        let findings: Vec<String> = combined
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(str::to_string)
            .collect();
        if findings.is_empty() {
            return Err(StencilError::ScannerFailed(format!(
                "gitleaks exited with {} and no output",
                output.status
            )));
        }
        Ok(ScanOutcome::Findings(findings))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    struct NoTools;

    impl CommandProbe for NoTools {
        fn exists(&self, _name: &str) -> bool {
            false
        }
    }

    #[test]
    fn missing_binary_degrades_to_tool_missing() {
        let scanner = GitleaksScanner::with_probe(NoTools);
        let outcome = scanner.scan(Path::new("/tmp")).unwrap();
        assert_eq!(outcome, ScanOutcome::ToolMissing);
    }

    #[test]
    fn path_probe_finds_common_shell() {
        // `sh` exists on any unix test environment.
        assert!(PathProbe.exists("sh"));
        assert!(!PathProbe.exists("definitely-not-a-real-tool-xyz"));
    }
}
