mod cmd;
mod embed;
mod output;
mod root;
mod survey;

use clap::{Parser, Subcommand};
use cmd::{hooks::HooksSubcommand, skeleton::SkeletonSubcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "stencil",
    about = "Scaffold standardized projects from skeletons and verify them against policy",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from stencil.yaml or .git/)
    #[arg(long, global = true, env = "STENCIL_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a project: write the recipe and scaffold the skeletons
    Init {
        /// Read the recipe from a file instead of running the survey
        #[arg(long)]
        recipe: Option<PathBuf>,

        /// Skip git init and branch setup
        #[arg(long)]
        no_git: bool,
    },

    /// Verify an existing project against the compliance checklist
    Verify {
        /// Minimum required test coverage percentage
        #[arg(long, default_value = "80")]
        min_coverage: u32,
    },

    /// Inspect the installed skeletons
    Skeleton {
        #[command(subcommand)]
        subcommand: SkeletonSubcommand,
    },

    /// Check that required external tools are available
    Doctor,

    /// Manage repository hooks
    Hooks {
        #[command(subcommand)]
        subcommand: HooksSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Init { recipe, no_git } => cmd::init::run(&root, recipe.as_deref(), no_git),
        Commands::Verify { min_coverage } => cmd::verify::run(&root, min_coverage, cli.json),
        Commands::Skeleton { subcommand } => cmd::skeleton::run(subcommand, cli.json),
        Commands::Doctor => cmd::doctor::run(cli.json),
        Commands::Hooks { subcommand } => cmd::hooks::run(&root, subcommand),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
