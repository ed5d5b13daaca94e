mod cli;

use std::fs::OpenOptions;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use cli::Cli;
use crypto_dash::config::{load_config, resolve_config_path, validate_config};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_file)?;

    let config_path = resolve_config_path(cli.config.as_deref())?;
    match &config_path {
        Some(path) => info!("Using config {}", path.display()),
        None => info!("No config file found, using built-in defaults"),
    }

    let mut config = load_config(config_path.as_deref())?;
    config.apply_overrides(cli.overrides());
    validate_config(&config)?;

    crypto_dash::app::run(config).await?;
    info!("Dashboard closed");
    Ok(())
}

/// The dashboard owns the terminal, so records are appended to a file instead.
fn init_logging(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}
