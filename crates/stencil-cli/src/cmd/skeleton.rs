use crate::output;
use clap::Subcommand;
use serde::Serialize;
use stencil_core::paths;
use stencil_core::skeleton::SkeletonStore;

#[derive(Subcommand)]
pub enum SkeletonSubcommand {
    /// List the skeletons in the cache
    List,
}

#[derive(Serialize)]
struct SkeletonRow {
    name: String,
    kind: String,
    files: usize,
    description: String,
}

pub fn run(subcommand: SkeletonSubcommand, json: bool) -> anyhow::Result<()> {
    match subcommand {
        SkeletonSubcommand::List => list(json),
    }
}

fn list(json: bool) -> anyhow::Result<()> {
    let store = SkeletonStore::new(paths::skeletons_dir()?);
    let mut rows = Vec::new();
    for name in store.list()? {
        let manifest = store.manifest(&name)?;
        rows.push(SkeletonRow {
            name,
            kind: format!("{:?}", manifest.kind).to_lowercase(),
            files: manifest.files.len(),
            description: manifest.description,
        });
    }

    if json {
        return output::print_json(&rows);
    }
    if rows.is_empty() {
        println!("no skeletons installed (run 'stencil init' once to populate the cache)");
        return Ok(());
    }
    output::print_table(
        &["NAME", "TYPE", "FILES", "DESCRIPTION"],
        rows.into_iter()
            .map(|r| {
                vec![
                    r.name,
                    r.kind,
                    r.files.to_string(),
                    r.description,
                ]
            })
            .collect(),
    );
    Ok(())
}
