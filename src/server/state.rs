//! Server state management

use std::sync::Arc;

use crate::registry::ItemRegistry;

pub use crate::config::{CorsConfig, ServerConfig};

/// Shared server state handed to every handler
#[derive(Clone)]
pub struct ServerState {
    /// The item registry; owned here for the lifetime of the server
    pub registry: Arc<ItemRegistry>,

    pub config: Arc<ServerConfig>,
}

impl ServerState {
    /// Create server state, seeding the registry when the config asks for it
    pub fn new(config: ServerConfig) -> Self {
        let registry = if config.seed_sample_items {
            ItemRegistry::seeded()
        } else {
            ItemRegistry::new()
        };
        Self::with_registry(config, registry)
    }

    pub fn with_registry(config: ServerConfig, registry: ItemRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            config: Arc::new(config),
        }
    }
}
