use std::path::PathBuf;

use clap::Parser;
use scaffold_sync::{GitignoreStrategy, TriggerPoint};

/// Scaffold - place package scaffold files into a project
#[derive(Parser, Debug)]
#[command(name = "scaffold")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Packages are read from scaffold.toml at the project root.")]
pub struct Cli {
    /// Project root (contains scaffold.toml)
    #[arg(default_value = ".")]
    pub project_root: PathBuf,

    /// Overwrite existing files that scaffold does not manage
    #[arg(long)]
    pub allow_overwrite: bool,

    /// Dry run - show what would be done
    #[arg(long)]
    pub dry_run: bool,

    /// Fail instead of warning on refused overwrites and modified append targets
    #[arg(long)]
    pub strict: bool,

    /// Lifecycle event that triggered this run
    #[arg(long, value_enum, default_value_t = TriggerPoint::PostInstall)]
    pub event: TriggerPoint,

    /// What to do with .gitignore after post-create-project
    #[arg(long, value_enum)]
    pub gitignore: Option<GitignoreStrategy>,

    /// Output format for CI
    #[arg(long)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
