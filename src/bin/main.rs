//! Simple API binary.
//!
//! Entry point for the item registry HTTP service.

use anyhow::{Context, Result};
use clap::Parser;
use simple_api_core::{
    cli::commands::Commands,
    cli::handlers::{handle_config, handle_server},
    config::Settings,
};
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = match &cli.command {
        Commands::Server(cmd) => cmd.config.clone(),
        Commands::Config(cmd) => cmd.config.clone(),
    };
    let settings = Settings::load(config_path.as_deref()).context("Failed to load configuration")?;

    // CLI logging flags win over configured ones
    let logging = cli.command.logging();
    let level = if logging.verbose > 0 || logging.log_level.is_some() {
        logging.get_effective_level().to_string()
    } else {
        settings.logging.level.clone()
    };
    let filter = logging
        .log_filter
        .clone()
        .or_else(|| settings.logging.filter.clone())
        .unwrap_or_else(|| format!("simple_api_core={level},tower_http={level}"));

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(level.parse().unwrap_or(Level::INFO).into())
                .parse_lossy(filter),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .init();

    info!("Simple API starting up");

    match cli.command {
        Commands::Server(cmd) => handle_server(cmd, settings).await?,
        Commands::Config(_) => handle_config(&settings)?,
    }

    Ok(())
}
