use std::io::{self, Write};

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use punch_cli::commands::{cancel, delete, edit, report, resume, start, status, stop};
use punch_cli::{Cli, Commands, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let now = Local::now();
    let mut stdout = io::stdout().lock();

    match &cli.command {
        Some(Commands::Start(args)) => start::run(&mut stdout, args, &config, &now)?,
        Some(Commands::Stop(args)) => stop::run(&mut stdout, args, &config, &now)?,
        Some(Commands::Resume) => resume::run(&mut stdout, &config, &now)?,
        Some(Commands::Cancel) => cancel::run(&mut stdout, &config)?,
        Some(Commands::Status) => status::run(&mut stdout, &config, &now)?,
        Some(Commands::Report(args)) => report::run(&mut stdout, args, &config, &now)?,
        Some(Commands::Edit(args)) => edit::run(&mut stdout, args, &config)?,
        Some(Commands::Delete { id }) => delete::run(&mut stdout, *id, &config)?,
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            writeln!(stdout)?;
        }
    }

    Ok(())
}
