use crate::coverage;
use crate::error::{Result, StencilError};
use crate::linter;
use crate::paths;
use crate::recipe::Recipe;
use crate::scanner::{ScanOutcome, SecretScanner};
use serde::Serialize;
use std::path::Path;

// ---------------------------------------------------------------------------
// VerifyOptions / CheckResult / VerifyReport
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct VerifyOptions<'a> {
    pub root: &'a Path,
    /// Minimum acceptable coverage percentage; strictly-below fails.
    pub min_coverage: u32,
    pub recipe: Option<&'a Recipe>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Passed,
    Failed,
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckResult {
    pub name: &'static str,
    pub status: CheckStatus,
    pub detail: String,
}

/// The ordered outcome of one verification run. Policy failures are data
/// here; only unexpected I/O or parse errors surface as Rust errors.
#[derive(Debug, Clone, Default, Serialize)]
pub struct VerifyReport {
    pub checks: Vec<CheckResult>,
}

impl VerifyReport {
    fn record(&mut self, name: &'static str, status: CheckStatus, detail: impl Into<String>) {
        self.checks.push(CheckResult {
            name,
            status,
            detail: detail.into(),
        });
    }

    pub fn passed(&self) -> bool {
        self.checks.iter().all(|c| c.status != CheckStatus::Failed)
    }

    pub fn first_failure(&self) -> Option<&CheckResult> {
        self.checks.iter().find(|c| c.status == CheckStatus::Failed)
    }
}

// ---------------------------------------------------------------------------
// Verifier
// ---------------------------------------------------------------------------

/// Run the full compliance checklist against an initialized project.
///
/// Every check contributes exactly one line item; a failed check never
/// suppresses the checks after it, so a single run reports everything
/// wrong. Within the required-paths check all missing paths are collected
/// before the check fails as one item.
pub fn run(opts: &VerifyOptions, scanner: &dyn SecretScanner) -> Result<VerifyReport> {
    let mut report = VerifyReport::default();

    if let Some(recipe) = opts.recipe {
        check_linter(opts.root, recipe, &mut report);
        check_persistence(opts.root, recipe, &mut report);
        check_deployment(opts.root, recipe, &mut report);
    }
    check_coverage(opts, &mut report)?;
    check_secrets(opts.root, scanner, &mut report)?;
    check_required_paths(opts.root, &mut report);

    Ok(report)
}

fn check_linter(root: &Path, recipe: &Recipe, report: &mut VerifyReport) {
    let declared = recipe
        .stack
        .as_ref()
        .map(|s| s.linter.as_str())
        .unwrap_or("");
    if declared.is_empty() {
        report.record(
            "linter",
            CheckStatus::Skipped,
            "no linter declared in recipe",
        );
        return;
    }
    match linter::config_file(declared) {
        Err(_) => report.record(
            "linter",
            CheckStatus::Failed,
            format!("unknown linter '{declared}'"),
        ),
        Ok(file) if root.join(file).exists() => report.record(
            "linter",
            CheckStatus::Passed,
            format!("{file} found for '{declared}'"),
        ),
        Ok(file) => report.record(
            "linter",
            CheckStatus::Failed,
            format!("config {file} for '{declared}' not found"),
        ),
    }
}

fn check_persistence(root: &Path, recipe: &Recipe, report: &mut VerifyReport) {
    if !recipe.persistence.is_configured() {
        report.record(
            "persistence",
            CheckStatus::Skipped,
            "no persistence layer declared in recipe",
        );
        return;
    }
    let kind = &recipe.persistence.kind;
    if paths::compose_path(root).exists() {
        report.record(
            "persistence",
            CheckStatus::Passed,
            format!("{} found for '{kind}'", paths::COMPOSE_FILE),
        );
    } else {
        report.record(
            "persistence",
            CheckStatus::Failed,
            format!("{} not found for persistence layer '{kind}'", paths::COMPOSE_FILE),
        );
    }
}

fn check_deployment(root: &Path, recipe: &Recipe, report: &mut VerifyReport) {
    if !recipe.deployment.is_configured() {
        report.record(
            "deployment",
            CheckStatus::Skipped,
            "no deployment layer declared in recipe",
        );
        return;
    }
    let kind = &recipe.deployment.kind;
    if paths::deploy_dir(root).is_dir() {
        report.record(
            "deployment",
            CheckStatus::Passed,
            format!("{}/ found for '{kind}'", paths::DEPLOY_DIR),
        );
    } else {
        report.record(
            "deployment",
            CheckStatus::Failed,
            format!("{}/ not found for deployment layer '{kind}'", paths::DEPLOY_DIR),
        );
    }
}

fn check_coverage(opts: &VerifyOptions, report: &mut VerifyReport) -> Result<()> {
    match coverage::find_and_parse(opts.root) {
        Ok((pct, path)) => {
            if pct < f64::from(opts.min_coverage) {
                report.record(
                    "coverage",
                    CheckStatus::Failed,
                    format!(
                        "coverage {pct:.2}% is below the required minimum of {}%",
                        opts.min_coverage
                    ),
                );
            } else {
                report.record(
                    "coverage",
                    CheckStatus::Passed,
                    format!(
                        "coverage {pct:.2}% >= {}% ({})",
                        opts.min_coverage,
                        path.display()
                    ),
                );
            }
            Ok(())
        }
        // Absence is a policy failure, distinct from "too low".
        Err(StencilError::CoverageReportNotFound(searched)) => {
            report.record(
                "coverage",
                CheckStatus::Failed,
                format!("no coverage report found (searched: {searched})"),
            );
            Ok(())
        }
        // Unreadable or malformed reports abort the run.
        Err(e) => Err(e),
    }
}

fn check_secrets(
    root: &Path,
    scanner: &dyn SecretScanner,
    report: &mut VerifyReport,
) -> Result<()> {
    match scanner.scan(root)? {
        ScanOutcome::Clean => {
            report.record("secrets", CheckStatus::Passed, "no secrets found");
        }
        ScanOutcome::ToolMissing => {
            report.record(
                "secrets",
                CheckStatus::Skipped,
                "gitleaks not found, skipping secret scan",
            );
        }
        ScanOutcome::Findings(findings) => {
            report.record(
                "secrets",
                CheckStatus::Failed,
                format!(
                    "{} potential secret(s) found:\n{}",
                    findings.len(),
                    findings.join("\n")
                ),
            );
        }
    }
    Ok(())
}

fn check_required_paths(root: &Path, report: &mut VerifyReport) {
    let missing: Vec<&str> = paths::REQUIRED_PATHS
        .iter()
        .copied()
        .filter(|p| !root.join(p).exists())
        .collect();
    if missing.is_empty() {
        report.record(
            "required-paths",
            CheckStatus::Passed,
            "all required files and directories present",
        );
    } else {
        report.record(
            "required-paths",
            CheckStatus::Failed,
            format!("missing: {}", missing.join(", ")),
        );
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
