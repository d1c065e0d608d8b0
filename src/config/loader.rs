//! Configuration loading and discovery for `pixicon.toml`

use super::schema::PixiconConfig;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::error::PixiconError;

/// File name looked for during discovery.
pub const CONFIG_FILE_NAME: &str = "pixicon.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse pixicon.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

impl From<ConfigError> for PixiconError {
    fn from(e: ConfigError) -> Self {
        PixiconError::invalid_param(e.to_string(), "--config")
    }
}

/// Find pixicon.toml by walking up from the current working directory,
/// falling back to `XDG_CONFIG_HOME/pixicon/pixicon.toml`.
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Checks XDG_CONFIG_HOME/pixicon/pixicon.toml or ~/.config/pixicon/pixicon.toml
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("pixicon").join(CONFIG_FILE_NAME);
    config_path.exists().then_some(config_path)
}

/// Find pixicon.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from `path`, or from the discovered file, or defaults
/// when there is none.
///
/// ```ignore
/// let config = load_config(None)?;
/// let config = load_config(Some(Path::new("icons/pixicon.toml")))?;
/// ```
pub fn load_config(path: Option<&Path>) -> Result<PixiconConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => load_config_file(&p),
        None => Ok(PixiconConfig::default()),
    }
}

fn load_config_file(path: &Path) -> Result<PixiconConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: PixiconConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}
