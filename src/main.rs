//! Scaffold CLI - place package scaffold files into a project
//!
//! Usage: scaffold [OPTIONS] [PROJECT_ROOT]
//!
//! Exit codes: 0 success, 1 invalid plan (conflicts, unsafe paths,
//! validation or strict-mode refusals), 2 partial failure or interrupted.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use is_terminal::IsTerminal;

use scaffold_sync::application::on_event;
use scaffold_sync::config::{load_user_defaults, with_env_overrides, Config, OptionsConfig};
use scaffold_sync::infrastructure::{GitignoreChange, GitignoreWriter, TomlPackageSource};
use scaffold_sync::presentation::factory::create_scaffold_use_case;
use scaffold_sync::presentation::output::{create_renderer, OutputFormat};
use scaffold_sync::{CancellationToken, GitignoreStrategy, ScaffoldOptions, TriggerPoint, CONFIG_FILE};

mod cli;
mod logging;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let code = run(&cli)?;
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<i32> {
    let root = cli
        .project_root
        .canonicalize()
        .with_context(|| format!("project root '{}' not found", cli.project_root.display()))?;

    let mut config = load_config(&root)?;
    let options = resolve_options(cli, &config);
    config.options.symlink = options.symlink;

    let scaffold_options = ScaffoldOptions::new(&root)
        .with_locations(config.locations()?)
        .with_allow_overwrite(options.allow_overwrite())
        .with_strict(options.strict())
        .with_dry_run(cli.dry_run);

    let cancel = CancellationToken::new();
    let handler_token = cancel.clone();
    if let Err(e) = ctrlc::set_handler(move || handler_token.cancel()) {
        tracing::warn!("cannot install interrupt handler: {}", e);
    }

    let use_case = create_scaffold_use_case(cancel);
    let source = TomlPackageSource::new(config, &root);
    let result = on_event(&use_case, cli.event, &source, &scaffold_options)?;

    if cli.event == TriggerPoint::PostCreateProject && !cli.dry_run && result.is_success() {
        let strategy = options
            .gitignore
            .or_else(|| prompt_gitignore(cli.json))
            .unwrap_or_default();
        let change = GitignoreWriter::new(use_case.file_system())
            .apply(&root, strategy, &result.managed_paths)
            .context("cannot update .gitignore")?;
        if change != GitignoreChange::Unchanged {
            tracing::info!(?change, "applied .gitignore strategy");
        }
    }

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    let unicode = std::io::stdout().is_terminal();
    let renderer = create_renderer(format, unicode, cli.verbose);
    print!("{}", renderer.render(&result, &root));

    Ok(result.exit_code())
}

/// `scaffold.toml`, or an empty package list when the file does not exist
fn load_config(root: &Path) -> Result<Config> {
    let path = root.join(CONFIG_FILE);
    if !path.exists() {
        tracing::warn!("{} not found; no packages declared", path.display());
        return Ok(Config::default());
    }

    let (config, warnings) = Config::load_with_warnings(&path)?;
    for warning in warnings {
        tracing::warn!("{}", warning);
    }
    Ok(config)
}

/// CLI flags > environment > project `[options]` > user defaults
fn resolve_options(cli: &Cli, config: &Config) -> OptionsConfig {
    let mut options = config.options.clone();
    if let Some((defaults, path)) = load_user_defaults() {
        tracing::debug!("user defaults from {}", path.display());
        options = options.or(defaults);
    }
    let options = with_env_overrides(options);

    let flags = OptionsConfig {
        allow_overwrite: cli.allow_overwrite.then_some(true),
        strict: cli.strict.then_some(true),
        symlink: None,
        gitignore: cli.gitignore,
    };
    flags.or(options)
}

/// Ask for a `.gitignore` strategy; `None` when there is nobody to ask
fn prompt_gitignore(json: bool) -> Option<GitignoreStrategy> {
    use dialoguer::Select;

    if json || !std::io::stdin().is_terminal() {
        return None;
    }

    let choices = [
        (
            GitignoreStrategy::IncludeManagedFiles,
            "Commit scaffold files to version control",
        ),
        (
            GitignoreStrategy::IgnoreManagedFiles,
            "Keep scaffold files out of version control",
        ),
        (GitignoreStrategy::None, "Leave .gitignore alone"),
    ];
    let items: Vec<&str> = choices.iter().map(|(_, label)| *label).collect();

    let selection = Select::new()
        .with_prompt("How should scaffold files be handled in .gitignore?")
        .items(&items)
        .default(2)
        .interact_opt()
        .ok()
        .flatten()?;
    Some(choices[selection].0)
}
