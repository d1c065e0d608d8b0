//! Geometry and timing shared by every generator.
//!
//! All three formats crop to the same bounding box and derive multi-frame
//! timing from the same `frames / fps` cycle, so their outputs line up.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::models::{Cell, CellId, CellProps};
use crate::state::Frame;

/// Rendered cell edge in pixels.
pub const CELL_PX: usize = 10;
/// Gap between cells in pixels.
pub const GAP_PX: usize = 2;
/// SVG canvas padding in pixels.
pub const SVG_PADDING: usize = 4;

/// Number formatted the way it appears in CSS: `1`, `0.25`, never `1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Num(pub f64);

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0.0 {
            f.write_str("0")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Percentage with one decimal, as used for timeline stops.
pub fn pct(value: f64) -> String {
    format!("{:.1}", value)
}

/// Tight bounds over a set of active cells, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub min_row: usize,
    pub max_row: usize,
    pub min_col: usize,
    pub max_col: usize,
}

impl BoundingBox {
    /// `None` when there are no ids.
    pub fn from_ids(ids: impl IntoIterator<Item = CellId>) -> Option<Self> {
        ids.into_iter().fold(None, |acc, id| {
            Some(match acc {
                None => BoundingBox { min_row: id.row, max_row: id.row, min_col: id.col, max_col: id.col },
                Some(b) => BoundingBox {
                    min_row: b.min_row.min(id.row),
                    max_row: b.max_row.max(id.row),
                    min_col: b.min_col.min(id.col),
                    max_col: b.max_col.max(id.col),
                },
            })
        })
    }

    pub fn span_rows(&self) -> usize {
        self.max_row - self.min_row + 1
    }

    pub fn span_cols(&self) -> usize {
        self.max_col - self.min_col + 1
    }

    /// 1-based CSS grid placement `(row, col)` of a cell.
    pub fn grid_position(&self, id: CellId) -> (usize, usize) {
        (id.row - self.min_row + 1, id.col - self.min_col + 1)
    }

    /// Top-left pixel of a cell on the padded SVG canvas.
    pub fn svg_origin(&self, id: CellId) -> (usize, usize) {
        (
            (id.col - self.min_col) * (CELL_PX + GAP_PX) + SVG_PADDING,
            (id.row - self.min_row) * (CELL_PX + GAP_PX) + SVG_PADDING,
        )
    }

    /// Padded SVG canvas `(width, height)`.
    pub fn svg_size(&self) -> (usize, usize) {
        (
            self.span_cols() * (CELL_PX + GAP_PX) - GAP_PX + SVG_PADDING * 2,
            self.span_rows() * (CELL_PX + GAP_PX) - GAP_PX + SVG_PADDING * 2,
        )
    }
}

/// Active cells of one frame, row-major.
pub fn active_cells(frame: &Frame) -> Vec<&Cell> {
    frame.active_cells().collect()
}

/// CSS `animation` shorthand for a cell.
pub fn animation_shorthand(name: &str, props: &CellProps) -> String {
    format!(
        "{} {}s {} {}s {} {} {}",
        name,
        Num(props.duration),
        props.easing,
        Num(props.delay),
        props.iteration_count,
        props.direction.as_str(),
        props.fill_mode.as_str()
    )
}

/// A frame sequence prepared for step-function playback.
#[derive(Debug, Clone)]
pub struct Timeline<'a> {
    pub frames: &'a [Arc<Frame>],
    /// Every id active in some frame, in first-seen order
    pub cell_ids: Vec<CellId>,
    pub bounds: BoundingBox,
    /// Seconds for one pass over all frames
    pub total_duration: f64,
}

impl<'a> Timeline<'a> {
    /// `None` when no cell is active in any frame.
    pub fn new(frames: &'a [Arc<Frame>], fps: f64) -> Option<Self> {
        let mut seen = HashSet::new();
        let cell_ids: Vec<CellId> = frames
            .iter()
            .flat_map(|f| f.active_cells().map(|c| c.id))
            .filter(|id| seen.insert(*id))
            .collect();
        let bounds = BoundingBox::from_ids(cell_ids.iter().copied())?;
        Some(Self { frames, cell_ids, bounds, total_duration: frames.len() as f64 / fps })
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Start of frame `index` as a percentage of the cycle.
    pub fn start_pct(&self, index: usize) -> f64 {
        index as f64 / self.frames.len() as f64 * 100.0
    }

    fn active_in(&self, index: usize, id: CellId) -> Option<&'a Cell> {
        self.frames[index].cells.get(&id).filter(|c| c.is_active())
    }

    /// Fill of the first frame in which the cell is active.
    pub fn first_fill(&self, id: CellId) -> &'a str {
        (0..self.frames.len())
            .find_map(|i| self.active_in(i, id))
            .map(|c| c.props.fill.as_str())
            .unwrap_or("transparent")
    }

    /// `@keyframes frame-<id>` with one stop per frame plus a closing 100% stop.
    /// Frames where the cell is inactive render transparent.
    pub fn cell_keyframes(&self, id: CellId) -> String {
        let mut stops = Vec::with_capacity(self.frames.len() + 1);
        for i in 0..self.frames.len() {
            let (fill, opacity) = match self.active_in(i, id) {
                Some(cell) => (cell.props.fill.as_str(), Num(cell.props.opacity.from)),
                None => ("transparent", Num(0.0)),
            };
            stops.push(format!("  {}% {{ background: {}; opacity: {}; }}", pct(self.start_pct(i)), fill, opacity));
            if i == self.frames.len() - 1 {
                stops.push(format!("  100% {{ background: {}; opacity: {}; }}", fill, opacity));
            }
        }
        format!("@keyframes frame-{} {{\n{}\n}}", id, stops.join("\n"))
    }

    /// `.c-<id>` rule driving the cell's step animation.
    pub fn cell_rule(&self, id: CellId) -> String {
        format!(".c-{id} {{ animation: frame-{id} {}s step-end infinite; }}", Num(self.total_duration))
    }
}
