//! Data models for pixicon documents (grid, cells, frames)

mod cell;
mod core;
mod document;

// Re-export all public types
pub use cell::{
    AnimationType, Cell, CellPatch, CellProps, Direction, FillMode, IterationCount, DEFAULT_EASING,
    DEFAULT_FILL, EASING_OPTIONS,
};
pub use core::{CellId, GridSize, ParseCellIdError, Range, MAX_GRID_DIM};
pub use document::{Document, FrameDocument, DOCUMENT_VERSION};
