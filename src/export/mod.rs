//! Code generation for finished icons.
//!
//! Each format has a [`CodeGenerator`] that projects either one frame
//! (per-cell motion curves) or a frame sequence (step-function playback at a
//! given frame rate) into source text. Every generator crops to the same
//! bounding box of active cells and returns an empty string when there is
//! nothing to draw.
//!
//! # Supported Formats
//!
//! - **SVG**: standalone `<svg>` with an embedded `<style>` block
//! - **CSS**: an HTML `<div>` grid with a scoped stylesheet
//! - **React**: a `PixelGrid` function component with a `size` prop
//!
//! # Example
//!
//! ```ignore
//! use pixicon::export::{export_state, ExportFormat, ExportOptions};
//!
//! let result = export_state(&state, ExportFormat::Svg, &ExportOptions::default());
//! println!("{}", result.code);
//! ```

pub mod css;
pub mod keyframes;
pub mod layout;
pub mod react;
pub mod svg;

pub use css::CssGenerator;
pub use keyframes::{dedupe_keyframes, DedupedKeyframes, KeyframeStyle};
pub use react::ReactGenerator;
pub use svg::SvgGenerator;

use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::error::{PixiconError, Result};
use crate::state::{Frame, State};

/// Output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Svg,
    Css,
    React,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Svg, ExportFormat::Css, ExportFormat::React];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Svg => "svg",
            ExportFormat::Css => "css",
            ExportFormat::React => "react",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == name)
    }

    /// Default file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Svg => "svg",
            ExportFormat::Css => "html",
            ExportFormat::React => "jsx",
        }
    }

    pub fn generator(&self) -> Box<dyn CodeGenerator> {
        match self {
            ExportFormat::Svg => Box::new(SvgGenerator),
            ExportFormat::Css => Box::new(CssGenerator),
            ExportFormat::React => Box::new(ReactGenerator),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for export operations.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    /// Playback rate for multi-frame documents
    pub fps: f64,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self { fps: 2.0 }
    }
}

impl ExportOptions {
    pub fn with_fps(fps: f64) -> Result<Self> {
        if !(fps.is_finite() && fps > 0.0) {
            return Err(PixiconError::invalid_param("fps must be a positive number", "data.fps"));
        }
        Ok(Self { fps })
    }
}

/// Trait for code generator implementations.
pub trait CodeGenerator {
    /// Source for a single frame's active cells.
    fn generate(&self, frame: &Frame) -> String;

    /// Source for a frame sequence played back at `fps`.
    fn generate_frames(&self, frames: &[Arc<Frame>], fps: f64) -> String;

    /// The format this generator produces.
    fn format(&self) -> ExportFormat;

    /// Default file extension for this format.
    fn extension(&self) -> &'static str {
        self.format().extension()
    }
}

/// One generated artifact plus how many distinct cells it draws.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResult {
    pub format: ExportFormat,
    pub code: String,
    pub active_cell_count: usize,
}

/// Number of distinct cell ids active in any frame.
pub fn active_cell_count(state: &State) -> usize {
    state
        .frames
        .iter()
        .flat_map(|f| f.active_cells().map(|c| c.id))
        .collect::<HashSet<_>>()
        .len()
}

/// Generate one format; multi-frame states use the timeline generators.
pub fn export_state(state: &State, format: ExportFormat, options: &ExportOptions) -> ExportResult {
    let generator = format.generator();
    let code = if state.is_multi_frame() {
        generator.generate_frames(&state.frames, options.fps)
    } else {
        generator.generate(state.active_frame())
    };
    tracing::trace!(format = %format, bytes = code.len(), frames = state.frame_count(), "generated");
    ExportResult { format, code, active_cell_count: active_cell_count(state) }
}

/// Generate every format.
pub fn export_all(state: &State, options: &ExportOptions) -> Vec<ExportResult> {
    ExportFormat::ALL.iter().map(|format| export_state(state, *format, options)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;
    use crate::models::{CellId, GridSize};
    use crate::reducer::reduce;

    #[test]
    fn test_export_options_default() {
        assert_eq!(ExportOptions::default().fps, 2.0);
        assert!(ExportOptions::with_fps(0.0).is_err());
        assert!(ExportOptions::with_fps(f64::NAN).is_err());
        assert_eq!(ExportOptions::with_fps(12.0).unwrap().fps, 12.0);
    }

    #[test]
    fn test_format_names() {
        assert_eq!(ExportFormat::from_name("react"), Some(ExportFormat::React));
        assert_eq!(ExportFormat::from_name("png"), None);
        assert_eq!(ExportFormat::Css.extension(), "html");
        assert_eq!(SvgGenerator.extension(), "svg");
    }

    #[test]
    fn test_blank_document_exports_nothing() {
        let state = State::new(GridSize::new(4, 4));
        for result in export_all(&state, &ExportOptions::default()) {
            assert_eq!(result.code, "");
            assert_eq!(result.active_cell_count, 0);
        }
    }

    #[test]
    fn test_multi_frame_selects_timeline() {
        let state = Arc::new(State::new(GridSize::new(4, 4)));
        let state = reduce(&state, &Action::ToggleCell { id: CellId::new(0, 0) });
        let state = reduce(&state, &Action::AddFrame);
        let state = reduce(&state, &Action::ToggleCell { id: CellId::new(1, 1) });
        let state = reduce(&state, &Action::ToggleCell { id: CellId::new(0, 0) });

        let result = export_state(&state, ExportFormat::Svg, &ExportOptions::default());
        assert!(result.code.contains("show-frame-1"));
        assert_eq!(result.active_cell_count, 2);

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["format"], "svg");
        assert_eq!(json["activeCellCount"], 2);
    }
}
