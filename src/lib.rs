//! In-memory item registry served over HTTP.
//!
//! The registry holds items keyed by integer id in insertion order and
//! exposes list, get, create, partial update and delete through an axum
//! router built by [`server::create_app`].

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod registry;
pub mod serde_helpers;
pub mod server;

// Re-export commonly used types
pub use error::{Error, Result};
pub use models::{Item, ItemUpdate, ListParams, NewItem};
pub use registry::ItemRegistry;
pub use server::{create_app, state::ServerState};
