pub mod config;
pub mod server;

pub use config::{ConfigCommand, LoggingConfig};
pub use server::ServerCommand;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Start the Simple API server
    Server(ServerCommand),
    /// Print the effective configuration
    Config(ConfigCommand),
}

impl Commands {
    pub fn logging(&self) -> &LoggingConfig {
        match self {
            Commands::Server(cmd) => &cmd.logging,
            Commands::Config(cmd) => &cmd.logging,
        }
    }
}
