use crate::error::{Result, StencilError};
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Report discovery
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Line-oriented per-statement profile (`coverage.out`).
    StatementProfile,
    /// JSON summary with a nested aggregate line percentage.
    JsonSummary,
}

/// Candidate report locations relative to the project root, tried in order.
const CANDIDATES: &[(&str, ReportFormat)] = &[
    ("coverage.out", ReportFormat::StatementProfile),
    ("coverage/coverage-summary.json", ReportFormat::JsonSummary),
    ("coverage-summary.json", ReportFormat::JsonSummary),
];

/// Locate and parse a coverage report under `root`, returning the aggregate
/// percentage and the file it came from. No report at any known location is
/// an error of its own, never an implicit pass.
pub fn find_and_parse(root: &Path) -> Result<(f64, PathBuf)> {
    for (relative, format) in CANDIDATES {
        let path = root.join(relative);
        if !path.exists() {
            continue;
        }
        let pct = match format {
            ReportFormat::StatementProfile => parse_statement_profile(&path)?,
            ReportFormat::JsonSummary => parse_json_summary(&path)?,
        };
        return Ok((pct, path));
    }
    let searched = CANDIDATES
        .iter()
        .map(|(p, _)| *p)
        .collect::<Vec<_>>()
        .join(", ");
    Err(StencilError::CoverageReportNotFound(searched))
}

// ---------------------------------------------------------------------------
// Statement profile
// ---------------------------------------------------------------------------

/// Percentage = covered statements / total statements. A line counts as one
/// statement when it has exactly three whitespace-separated fields; it is
/// covered when the final count field is a positive integer. `mode:` header
/// lines are ignored.
pub fn parse_statement_profile(path: &Path) -> Result<f64> {
    let content = std::fs::read_to_string(path)?;
    let mut total = 0u64;
    let mut covered = 0u64;

    for line in content.lines() {
        if line.starts_with("mode:") {
            continue;
        }
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() != 3 {
            continue;
        }
        let count: u64 = parts[2]
            .parse()
            .map_err(|_| StencilError::InvalidCoverageReport {
                path: path.display().to_string(),
                reason: format!("bad statement count '{}'", parts[2]),
            })?;
        total += 1;
        if count > 0 {
            covered += 1;
        }
    }

    if total == 0 {
        return Ok(0.0);
    }
    Ok(covered as f64 / total as f64 * 100.0)
}

// ---------------------------------------------------------------------------
// JSON summary
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct JsonSummary {
    total: SummaryTotal,
}

#[derive(Deserialize)]
struct SummaryTotal {
    lines: SummaryLines,
}

#[derive(Deserialize)]
struct SummaryLines {
    pct: f64,
}

pub fn parse_json_summary(path: &Path) -> Result<f64> {
    let data = std::fs::read(path)?;
    let summary: JsonSummary =
        serde_json::from_slice(&data).map_err(|e| StencilError::InvalidCoverageReport {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
    Ok(summary.total.lines.pct)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn profile_with(total: usize, covered: usize) -> String {
        let mut s = String::from("mode: set\n");
        for i in 0..total {
            let count = if i < covered { 1 } else { 0 };
            s.push_str(&format!("pkg/file.go:{}.1,{}.2 1 {}\n", i, i, count));
        }
        s
    }

    #[test]
    fn profile_eight_of_ten_is_eighty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("coverage.out");
        std::fs::write(&path, profile_with(10, 8)).unwrap();
        let pct = parse_statement_profile(&path).unwrap();
        assert!((pct - 80.0).abs() < f64::EPSILON);
    }

    #[test]
    fn profile_counts_above_one_are_covered() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("coverage.out");
        std::fs::write(&path, "mode: count\na.go:1.1,2.2 1 7\nb.go:1.1,2.2 1 0\n").unwrap();
        let pct = parse_statement_profile(&path).unwrap();
        assert!((pct - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn profile_without_statements_is_zero() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("coverage.out");
        std::fs::write(&path, "mode: set\n").unwrap();
        assert_eq!(parse_statement_profile(&path).unwrap(), 0.0);
    }

    #[test]
    fn profile_with_garbage_count_errors() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("coverage.out");
        std::fs::write(&path, "a.go:1.1,2.2 1 maybe\n").unwrap();
        let err = parse_statement_profile(&path).unwrap_err();
        assert!(matches!(err, StencilError::InvalidCoverageReport { .. }));
    }

    #[test]
    fn json_summary_extracts_line_pct() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("coverage-summary.json");
        std::fs::write(
            &path,
            r#"{"total": {"lines": {"total": 200, "covered": 165, "pct": 82.5}}}"#,
        )
        .unwrap();
        let pct = parse_json_summary(&path).unwrap();
        assert!((pct - 82.5).abs() < f64::EPSILON);
    }

    #[test]
    fn find_prefers_statement_profile() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("coverage.out"), profile_with(10, 8)).unwrap();
        std::fs::write(
            dir.path().join("coverage-summary.json"),
            r#"{"total": {"lines": {"pct": 10.0}}}"#,
        )
        .unwrap();
        let (pct, path) = find_and_parse(dir.path()).unwrap();
        assert!((pct - 80.0).abs() < f64::EPSILON);
        assert!(path.ends_with("coverage.out"));
    }

    #[test]
    fn find_falls_back_to_json_summary_in_coverage_dir() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("coverage")).unwrap();
        std::fs::write(
            dir.path().join("coverage/coverage-summary.json"),
            r#"{"total": {"lines": {"pct": 91.3}}}"#,
        )
        .unwrap();
        let (pct, _) = find_and_parse(dir.path()).unwrap();
        assert!((pct - 91.3).abs() < f64::EPSILON);
    }

    #[test]
    fn no_report_is_a_distinct_error() {
        let dir = TempDir::new().unwrap();
        let err = find_and_parse(dir.path()).unwrap_err();
        assert!(matches!(err, StencilError::CoverageReportNotFound(_)));
    }
}
