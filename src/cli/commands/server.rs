use clap::Args;
use std::path::PathBuf;

use super::config::LoggingConfig;

#[derive(Args)]
pub struct ServerCommand {
    /// Listen address in host:port format
    #[arg(long, value_name = "HOST:PORT", env = "SIMPLE_API_LISTEN")]
    pub listen: Option<String>,

    /// Configuration file path
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Start with an empty registry instead of the sample items
    #[arg(long)]
    pub no_seed: bool,

    #[command(flatten)]
    pub logging: LoggingConfig,
}
