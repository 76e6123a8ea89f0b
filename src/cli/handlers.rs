use anyhow::{Context, Result};
use std::net::SocketAddr;
use tracing::info;

use crate::cli::commands::ServerCommand;
use crate::config::{ServerConfig, Settings};
use crate::server::{self, state::ServerState};

/// Apply command-line overrides on top of loaded settings
pub fn apply_server_overrides(cmd: &ServerCommand, config: &mut ServerConfig) -> Result<()> {
    if let Some(listen) = &cmd.listen {
        config.set_listen(listen).context("Invalid --listen value")?;
    }
    if cmd.no_seed {
        config.seed_sample_items = false;
    }
    Ok(())
}

async fn resolve_addr(config: &ServerConfig) -> Result<SocketAddr> {
    tokio::net::lookup_host((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("Failed to resolve {}:{}", config.host, config.port))?
        .next()
        .with_context(|| format!("No address found for {}:{}", config.host, config.port))
}

pub async fn handle_server(cmd: ServerCommand, settings: Settings) -> Result<()> {
    let mut config = settings.server;
    apply_server_overrides(&cmd, &mut config)?;

    let addr = resolve_addr(&config).await?;
    let state = ServerState::new(config);
    info!(
        items = state.registry.len(),
        seeded = state.config.seed_sample_items,
        "Item registry ready"
    );

    server::start_server(addr, state).await
}

pub fn handle_config(settings: &Settings) -> Result<()> {
    let rendered = settings.to_toml().context("Failed to render configuration")?;
    println!("{}", rendered);
    Ok(())
}
