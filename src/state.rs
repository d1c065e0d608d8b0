//! Working state of an edit session.
//!
//! `State` is the denormalized in-memory form the reducer operates on. Frames
//! are held behind `Arc` so a new snapshot shares every frame it did not touch
//! with its predecessor; a touched frame is cloned on write with
//! [`Arc::make_mut`], which keeps old snapshots in the undo history intact.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::models::{Cell, CellId, GridSize};

/// Background color of a fresh document.
pub const DEFAULT_BG_COLOR: &str = "#1a1a24";

/// One still of a multi-frame animation.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Stable id, assigned at creation and never reused
    pub id: u32,
    /// Exactly one cell per grid coordinate
    pub cells: BTreeMap<CellId, Cell>,
}

impl Frame {
    /// A frame of default, inactive cells.
    pub fn blank(id: u32, grid: GridSize) -> Self {
        Self { id, cells: build_cells(grid) }
    }

    /// Rebuild the cell map at new dimensions.
    ///
    /// Cells that still fit are carried over unchanged, new coordinates get
    /// default cells and coordinates outside the new grid are dropped.
    pub fn resized(&self, grid: GridSize) -> Self {
        let cells = grid
            .cell_ids()
            .map(|id| (id, self.cells.get(&id).cloned().unwrap_or_else(|| Cell::new(id))))
            .collect();
        Self { id: self.id, cells }
    }

    pub fn active_cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.values().filter(|c| c.is_active())
    }
}

/// Default cells for every coordinate of `grid`, row-major.
pub fn build_cells(grid: GridSize) -> BTreeMap<CellId, Cell> {
    grid.cell_ids().map(|id| (id, Cell::new(id))).collect()
}

/// Translucent overlay of neighboring frames while editing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnionSkin {
    pub enabled: bool,
    pub prev_count: u32,
    pub next_count: u32,
    pub opacity: f64,
}

impl Default for OnionSkin {
    fn default() -> Self {
        Self { enabled: false, prev_count: 1, next_count: 0, opacity: 0.2 }
    }
}

/// Partial onion-skin settings, shallow-merged.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnionSkinPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

impl OnionSkin {
    pub fn merged(mut self, patch: &OnionSkinPatch) -> Self {
        if let Some(enabled) = patch.enabled {
            self.enabled = enabled;
        }
        if let Some(prev_count) = patch.prev_count {
            self.prev_count = prev_count;
        }
        if let Some(next_count) = patch.next_count {
            self.next_count = next_count;
        }
        if let Some(opacity) = patch.opacity {
            self.opacity = opacity;
        }
        self
    }
}

/// In-memory editing state.
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    pub grid_size: GridSize,
    pub frames: Vec<Arc<Frame>>,
    /// Always a valid index into `frames`
    pub active_frame_index: usize,
    /// Strictly greater than every frame id ever handed out
    pub next_frame_id: u32,
    /// Transient, never persisted
    pub selected_cell_ids: Vec<CellId>,
    /// Anchor for range selection, transient
    pub last_selected_id: Option<CellId>,
    pub onion_skin: OnionSkin,
    pub bg_color: String,
}

impl State {
    /// A single blank frame at the given size.
    pub fn new(grid_size: GridSize) -> Self {
        Self {
            grid_size,
            frames: vec![Arc::new(Frame::blank(0, grid_size))],
            active_frame_index: 0,
            next_frame_id: 1,
            selected_cell_ids: Vec::new(),
            last_selected_id: None,
            onion_skin: OnionSkin::default(),
            bg_color: DEFAULT_BG_COLOR.to_string(),
        }
    }

    pub fn active_frame(&self) -> &Frame {
        &self.frames[self.active_frame_index]
    }

    /// Cells of the active frame.
    pub fn cells(&self) -> &BTreeMap<CellId, Cell> {
        &self.active_frame().cells
    }

    /// Mutable access to the active frame, cloning it if it is shared.
    pub fn active_frame_mut(&mut self) -> &mut Frame {
        Arc::make_mut(&mut self.frames[self.active_frame_index])
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn is_multi_frame(&self) -> bool {
        self.frames.len() > 1
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new(GridSize::default())
    }
}
