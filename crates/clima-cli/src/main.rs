//! Clima CLI - interactive city weather lookup
//!
//! Search a city by name, pick the right match and see its current weather.
//! Every lookup is kept in a local history; the five most recent are listed
//! under "History".

mod display;
mod menu;
mod session;

use anyhow::{Context, Result};
use clap::Parser;
use clima_core::{AppError, Config, ConfigError};
use clima_weather::WeatherLookup;
use colored::Colorize;
use std::path::PathBuf;

use session::Session;

#[derive(Parser)]
#[command(name = "clima")]
#[command(about = "Interactive city weather lookup", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (defaults to <config dir>/clima/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// History file, overrides storage.history_path
    #[arg(long)]
    history_file: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // API keys may come from a .env file next to the binary's working directory
    let dotenv = dotenvy::dotenv();

    clima_core::init(cli.verbose)?;

    if let Err(e) = dotenv {
        tracing::debug!("No .env file loaded: {}", e);
    }

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            if let Some(config_err) = e.downcast_ref::<ConfigError>() {
                eprintln!("{}", config_err.user_message().red());
            }
            return Err(e);
        }
    };

    tracing::info!(
        history = %config.storage.history_path.display(),
        units = config.weather.units.as_query(),
        "Starting Clima"
    );

    let lookup = WeatherLookup::new(&config)
        .map_err(AppError::from)
        .context("Failed to set up weather lookup")?;

    Session::new(lookup).run().await
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match cli.config.as_deref() {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    if let Some(path) = &cli.history_file {
        config.storage.history_path = path.clone();
    }

    let (config, _warnings) = config.validated()?;
    Ok(config)
}
