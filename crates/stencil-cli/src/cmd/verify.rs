use crate::output;
use stencil_core::recipe::Recipe;
use stencil_core::scanner::GitleaksScanner;
use stencil_core::verify::{self, CheckStatus, VerifyOptions};
use std::path::Path;

pub fn run(root: &Path, min_coverage: u32, json: bool) -> anyhow::Result<()> {
    let recipe = Recipe::load(root)?;

    if !json {
        println!(
            "Verifying '{}' against the standards checklist...",
            recipe.project.name
        );
    }

    let options = VerifyOptions {
        root,
        min_coverage,
        recipe: Some(&recipe),
    };
    let scanner = GitleaksScanner::new();
    let report = verify::run(&options, &scanner)?;

    if json {
        output::print_json(&report)?;
    } else {
        for check in &report.checks {
            let marker = match check.status {
                CheckStatus::Passed => "✓",
                CheckStatus::Failed => "✗",
                CheckStatus::Skipped => "!",
            };
            println!("  [{marker}] {}: {}", check.name, check.detail);
        }
    }

    if let Some(failure) = report.first_failure() {
        anyhow::bail!("verification failed: {}", failure.name);
    }
    println!("\nProject verified successfully.");
    Ok(())
}
