//! Pixicon - animated pixel icon documents
//!
//! This library provides functionality to:
//! - Load and save versioned icon documents (grid, frames, per-cell motion)
//! - Edit them through a pure reducer with undo/redo history
//! - Export single-frame or timeline animations as SVG, CSS or React source
//! - Drive all of the above from the `pixicon` command line

pub mod action;
pub mod cli;
pub mod color;
pub mod config;
pub mod error;
pub mod export;
pub mod gallery;
pub mod history;
pub mod import;
pub mod models;
pub mod palettes;
pub mod patterns;
pub mod presets;
pub mod reducer;
pub mod stagger;
pub mod state;
pub mod targets;
pub mod validate;

pub use error::{PixiconError, Result};
