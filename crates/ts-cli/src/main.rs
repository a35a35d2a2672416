use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ts_cli::{Cli, Config, commands};
use ts_db::{EntryStore, SqliteStore};

/// Load config and open the store, ensuring the parent directory exists.
fn open_store(config_path: Option<&Path>) -> Result<EntryStore<SqliteStore>> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let data_file = config.data_file()?;
    if let Some(parent) = data_file.parent() {
        std::fs::create_dir_all(parent).context("failed to create data directory")?;
    }

    let backing = SqliteStore::open(data_file)
        .with_context(|| format!("failed to open {}", data_file.display()))?;
    let store = EntryStore::open(backing)
        .with_context(|| format!("failed to read {}", data_file.display()))?;
    Ok(store)
}

fn run(cli: &Cli) -> Result<()> {
    let Some(command) = &cli.command else {
        // No subcommand, show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let mut store = open_store(cli.config.as_deref())?;
    let mut stdout = std::io::stdout().lock();
    commands::run(&mut stdout, &mut store, command, Local::now().date_naive())
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    match run(&cli) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        // --debug keeps the full error chain and backtrace
        Err(err) if cli.debug => Err(err),
        Err(err) => {
            eprintln!("{err:#}");
            Ok(ExitCode::FAILURE)
        }
    }
}
