//! Configuration for the pixicon command surface
//!
//! Provides types and discovery for the optional `pixicon.toml`.

pub mod loader;
pub mod schema;

pub use loader::{find_config, find_config_from, load_config, ConfigError, CONFIG_FILE_NAME};
pub use schema::*;
