//! The persisted/wire form of an icon and its conversions to working state.
//!
//! A document stores frames with compact cell maps keyed by `"<row>-<col>"`;
//! cell coordinates, the selection, and the derived active-cell view live only
//! in [`State`].

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::cell::{Cell, CellProps};
use super::core::{CellId, GridSize};
use crate::error::{PixiconError, Result};
use crate::state::{Frame, OnionSkin, State, DEFAULT_BG_COLOR};

/// Current document schema version.
pub const DOCUMENT_VERSION: u32 = 1;

/// One frame in document form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameDocument {
    pub id: u32,
    #[serde(default)]
    pub cells: BTreeMap<CellId, CellProps>,
}

/// Versioned, serializable icon document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default = "default_version")]
    pub version: u32,
    pub grid_size: GridSize,
    #[serde(default = "default_bg_color")]
    pub bg_color: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub active_frame_index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_frame_id: Option<u32>,
    pub frames: Vec<FrameDocument>,
}

fn default_version() -> u32 {
    DOCUMENT_VERSION
}

fn default_bg_color() -> String {
    DEFAULT_BG_COLOR.to_string()
}

fn is_zero(n: &usize) -> bool {
    *n == 0
}

impl Document {
    /// A fresh document: one frame of default, inactive cells.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        let grid_size = GridSize::new(rows, cols).validate()?;
        let cells = grid_size.cell_ids().map(|id| (id, CellProps::default())).collect();
        Ok(Self {
            version: DOCUMENT_VERSION,
            grid_size,
            bg_color: default_bg_color(),
            active_frame_index: 0,
            next_frame_id: None,
            frames: vec![FrameDocument { id: 0, cells }],
        })
    }

    /// Decode a document from parsed JSON, checking the frame list first so a
    /// missing `frames` array gets a precise error.
    pub fn from_value(value: Value) -> Result<Self> {
        match value.get("frames") {
            Some(Value::Array(_)) => {}
            _ => {
                return Err(PixiconError::invalid_document(
                    "Document is missing frames array. Use \"grid create\" or \"anim preset\" to create a valid document.",
                    "document.frames",
                ))
            }
        }
        serde_json::from_value(value)
            .map_err(|e| PixiconError::invalid_document(format!("Malformed document: {}", e), "document"))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text).map_err(|e| PixiconError::malformed("document", e))?;
        Self::from_value(value)
    }

    /// Hydrate into working state.
    ///
    /// Cells missing from a frame are filled with defaults and out-of-bounds
    /// keys are dropped, so every frame holds exactly `rows x cols` cells.
    pub fn to_state(&self) -> Result<State> {
        let grid_size = self.grid_size.validate()?;
        if self.frames.is_empty() {
            return Err(PixiconError::invalid_document("Document has no frames", "document.frames"));
        }

        let frames: Vec<Arc<Frame>> = self
            .frames
            .iter()
            .map(|f| {
                let dropped = f.cells.keys().filter(|id| !grid_size.contains(**id)).count();
                if dropped > 0 {
                    tracing::debug!(frame = f.id, dropped, "dropping out-of-bounds cells");
                }
                let cells = grid_size
                    .cell_ids()
                    .map(|id| {
                        let props = f.cells.get(&id).cloned().unwrap_or_default();
                        (id, Cell::with_props(id, props))
                    })
                    .collect();
                Arc::new(Frame { id: f.id, cells })
            })
            .collect();

        let max_id = frames.iter().map(|f| f.id).max().unwrap_or(0);
        let next_frame_id = self.next_frame_id.unwrap_or(max_id + 1).max(max_id + 1);
        let active_frame_index = self.active_frame_index.min(frames.len() - 1);

        Ok(State {
            grid_size,
            frames,
            active_frame_index,
            next_frame_id,
            selected_cell_ids: Vec::new(),
            last_selected_id: None,
            onion_skin: OnionSkin::default(),
            bg_color: self.bg_color.clone(),
        })
    }
}

impl State {
    /// Project into document form, dropping transient fields.
    pub fn to_document(&self) -> Document {
        let frames = self
            .frames
            .iter()
            .map(|f| FrameDocument {
                id: f.id,
                cells: f.cells.iter().map(|(id, cell)| (*id, cell.props.clone())).collect(),
            })
            .collect();

        Document {
            version: DOCUMENT_VERSION,
            grid_size: self.grid_size,
            bg_color: self.bg_color.clone(),
            active_frame_index: self.active_frame_index,
            next_frame_id: Some(self.next_frame_id),
            frames,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_document() {
        let doc = Document::new(4, 5).unwrap();
        assert_eq!(doc.frames.len(), 1);
        assert_eq!(doc.frames[0].cells.len(), 20);
        assert_eq!(doc.bg_color, DEFAULT_BG_COLOR);
        assert!(Document::new(0, 5).is_err());
        assert!(Document::new(8, 65).is_err());
    }

    #[test]
    fn test_wire_shape() {
        let doc = Document::new(1, 1).unwrap();
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["version"], 1);
        assert_eq!(json["gridSize"], json!({"rows": 1, "cols": 1}));
        assert!(json.get("activeFrameIndex").is_none());
        assert!(json["frames"][0]["cells"]["0-0"].get("id").is_none());
        assert!(json["frames"][0]["cells"]["0-0"].get("row").is_none());
    }

    #[test]
    fn test_to_state_defaults() {
        let value = json!({
            "version": 1,
            "gridSize": {"rows": 2, "cols": 2},
            "frames": [
                {"id": 4, "cells": {"0-0": {"active": true, "fill": "#ff0000"}}},
                {"id": 2, "cells": {}}
            ]
        });
        let state = Document::from_value(value).unwrap().to_state().unwrap();
        assert_eq!(state.next_frame_id, 5);
        assert_eq!(state.bg_color, DEFAULT_BG_COLOR);
        assert_eq!(state.active_frame_index, 0);
        assert_eq!(state.frames[1].cells.len(), 4);
        let cell = &state.cells()[&CellId::new(0, 0)];
        assert!(cell.is_active());
        assert_eq!(cell.row(), 0);
        assert_eq!(cell.props.fill, "#ff0000");
    }

    #[test]
    fn test_missing_frames_is_invalid_document() {
        let err = Document::from_value(json!({"version": 1, "gridSize": {"rows": 2, "cols": 2}}))
            .unwrap_err();
        assert_eq!(err.kind(), "INVALID_DOCUMENT");
        assert_eq!(err.path(), Some("document.frames"));
    }

    #[test]
    fn test_empty_frames_rejected() {
        let doc = Document::from_value(json!({"gridSize": {"rows": 2, "cols": 2}, "frames": []})).unwrap();
        assert!(doc.to_state().is_err());
    }

    #[test]
    fn test_out_of_bounds_cells_dropped() {
        let value = json!({
            "gridSize": {"rows": 1, "cols": 1},
            "frames": [{"id": 0, "cells": {"5-5": {"active": true}}}]
        });
        let state = Document::from_value(value).unwrap().to_state().unwrap();
        assert_eq!(state.cells().len(), 1);
    }

    #[test]
    fn test_round_trip_preserves_content() {
        let mut state = State::new(GridSize::new(3, 3));
        state.active_frame_mut().cells.get_mut(&CellId::new(1, 2)).unwrap().props.active = true;
        state.frames.push(Arc::new(Frame::blank(7, GridSize::new(3, 3))));
        state.next_frame_id = 8;
        state.active_frame_index = 1;
        state.selected_cell_ids = vec![CellId::new(0, 0)];

        let doc = state.to_document();
        assert_eq!(doc.active_frame_index, 1);
        let back = doc.to_state().unwrap();
        assert_eq!(back.frames, state.frames);
        assert_eq!(back.grid_size, state.grid_size);
        assert_eq!(back.next_frame_id, 8);
        assert_eq!(back.active_frame_index, 1);
        assert!(back.selected_cell_ids.is_empty());
    }
}
