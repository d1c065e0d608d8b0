//! Configuration schema types for `pixicon.toml`
//!
//! Every section and field is optional; an empty file is a valid config.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::models::MAX_GRID_DIM;
use crate::state::DEFAULT_BG_COLOR;

/// Defaults applied by commands when the caller omits a value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Rows for `grid create`
    #[serde(default = "default_dim")]
    pub rows: usize,
    /// Columns for `grid create`
    #[serde(default = "default_dim")]
    pub cols: usize,
    /// Frame rate for multi-frame exports
    #[serde(default = "default_fps")]
    pub fps: f64,
    /// Background color for new documents
    #[serde(default = "default_bg_color")]
    pub bg_color: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            rows: default_dim(),
            cols: default_dim(),
            fps: default_fps(),
            bg_color: default_bg_color(),
        }
    }
}

fn default_dim() -> usize {
    8
}

fn default_fps() -> f64 {
    2.0
}

fn default_bg_color() -> String {
    DEFAULT_BG_COLOR.to_string()
}

/// Gallery store location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryConfig {
    /// Directory holding `manifest.json` and saved documents
    #[serde(default = "default_gallery_dir")]
    pub dir: PathBuf,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self { dir: default_gallery_dir() }
    }
}

fn default_gallery_dir() -> PathBuf {
    PathBuf::from("public/gallery")
}

/// Root of `pixicon.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PixiconConfig {
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub gallery: GalleryConfig,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "defaults.rows")
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "pixicon.toml: '{}' {}", self.field, self.message)
    }
}

impl PixiconConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();
        let mut push = |field: &str, message: String| {
            errors.push(ConfigValidationError { field: field.to_string(), message });
        };

        let in_bounds = |n: usize| (1..=MAX_GRID_DIM).contains(&n);
        if !in_bounds(self.defaults.rows) {
            push("defaults.rows", format!("must be between 1 and {MAX_GRID_DIM}"));
        }
        if !in_bounds(self.defaults.cols) {
            push("defaults.cols", format!("must be between 1 and {MAX_GRID_DIM}"));
        }
        if !(self.defaults.fps.is_finite() && self.defaults.fps > 0.0) {
            push("defaults.fps", "must be a positive number".to_string());
        }
        if !crate::color::is_valid_color(&self.defaults.bg_color) {
            push("defaults.bg_color", "must be a CSS color".to_string());
        }
        if self.gallery.dir.as_os_str().is_empty() {
            push("gallery.dir", "must be a non-empty path".to_string());
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}
