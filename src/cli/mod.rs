//! Command-line interface module.
//!
//! This module provides the CLI functionality for:
//! - Server management
//! - Configuration inspection

pub mod commands;
pub mod handlers;

pub use handlers::{handle_config, handle_server};
