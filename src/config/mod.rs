//! Configuration module for Lookout
//!
//! Precedence:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (LOOKOUT_*)
//! 3. Checkout config (`lookout.json` or `lookout.toml`)

mod loader;
mod types;

// Re-export ConfigWarning from domain layer
pub use crate::domain::value_objects::ConfigWarning;

pub use loader::{find_config, DEFAULT_CONFIG_FILE, TOML_CONFIG_FILE};
pub use types::{CommandEntry, Config, SlingInitialContentEntry};
