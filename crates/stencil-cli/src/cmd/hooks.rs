use clap::Subcommand;
use stencil_core::git::SystemGit;
use stencil_core::{hooks, paths};
use std::path::Path;

#[derive(Subcommand)]
pub enum HooksSubcommand {
    /// Point core.hooksPath at the tracked .githooks directory
    Install,
}

pub fn run(root: &Path, subcommand: HooksSubcommand) -> anyhow::Result<()> {
    match subcommand {
        HooksSubcommand::Install => {
            hooks::install(&SystemGit, root)?;
            println!("hooks installed: core.hooksPath -> {}", paths::HOOKS_DIR);
            Ok(())
        }
    }
}
