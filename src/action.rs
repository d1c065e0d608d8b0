//! The closed set of state transitions.
//!
//! On the wire an action is `{"type": "SET_GRID_SIZE", "payload": {...}}`.
//! Unrecognized types decode to [`Action::Unknown`], which every reducer
//! treats as a no-op.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{AnimationType, CellId, CellPatch, CellProps, GridSize};
use crate::state::OnionSkinPatch;

/// A named, payload-carrying request to transition [`State`](crate::state::State).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    content = "payload",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum Action {
    SetGridSize {
        rows: usize,
        cols: usize,
    },
    ToggleCell {
        id: CellId,
    },
    PaintCell {
        id: CellId,
        fill: String,
    },
    SelectCell {
        id: CellId,
        #[serde(default)]
        shift: bool,
        #[serde(default)]
        meta: bool,
    },
    SelectRange {
        ids: Vec<CellId>,
        #[serde(default)]
        anchor_id: Option<CellId>,
    },
    DeselectAll,
    UpdateCellProps {
        ids: Vec<CellId>,
        props: CellPatch,
    },
    ApplyAnimationType {
        ids: Vec<CellId>,
        animation_type: AnimationType,
    },
    /// Replace the whole document with a single frame built from a preset.
    LoadPreset {
        cells: BTreeMap<CellId, CellProps>,
        #[serde(default)]
        grid_size: Option<GridSize>,
    },
    /// Restyle already-active cells with a preset's animation, scaled to the
    /// current grid. Preset cells carry only the fields they define.
    ApplyPresetAnimation {
        cells: BTreeMap<CellId, CellPatch>,
        #[serde(default)]
        grid_size: Option<GridSize>,
    },
    ClearAll,
    DeactivateCells {
        ids: Vec<CellId>,
    },
    AddFrame,
    DuplicateFrame,
    RemoveFrame,
    /// `index == -1` advances to the next frame, wrapping after the last.
    SetActiveFrame {
        index: i64,
    },
    ApplyStagger {
        delays: BTreeMap<CellId, f64>,
    },
    SetOnionSkin(OnionSkinPatch),
    SetBgColor {
        color: String,
    },
    Undo,
    Redo,
    #[serde(other)]
    Unknown,
}

impl Action {
    /// Wire name of the action type.
    pub fn name(&self) -> &'static str {
        match self {
            Action::SetGridSize { .. } => "SET_GRID_SIZE",
            Action::ToggleCell { .. } => "TOGGLE_CELL",
            Action::PaintCell { .. } => "PAINT_CELL",
            Action::SelectCell { .. } => "SELECT_CELL",
            Action::SelectRange { .. } => "SELECT_RANGE",
            Action::DeselectAll => "DESELECT_ALL",
            Action::UpdateCellProps { .. } => "UPDATE_CELL_PROPS",
            Action::ApplyAnimationType { .. } => "APPLY_ANIMATION_TYPE",
            Action::LoadPreset { .. } => "LOAD_PRESET",
            Action::ApplyPresetAnimation { .. } => "APPLY_PRESET_ANIMATION",
            Action::ClearAll => "CLEAR_ALL",
            Action::DeactivateCells { .. } => "DEACTIVATE_CELLS",
            Action::AddFrame => "ADD_FRAME",
            Action::DuplicateFrame => "DUPLICATE_FRAME",
            Action::RemoveFrame => "REMOVE_FRAME",
            Action::SetActiveFrame { .. } => "SET_ACTIVE_FRAME",
            Action::ApplyStagger { .. } => "APPLY_STAGGER",
            Action::SetOnionSkin(_) => "SET_ONION_SKIN",
            Action::SetBgColor { .. } => "SET_BG_COLOR",
            Action::Undo => "UNDO",
            Action::Redo => "REDO",
            Action::Unknown => "UNKNOWN",
        }
    }

    /// Whether a change made by this action is recorded in undo history.
    ///
    /// Selection, frame navigation and view settings are cosmetic: they update
    /// the present without touching past or future.
    pub fn is_undoable(&self) -> bool {
        !matches!(
            self,
            Action::SelectCell { .. }
                | Action::SelectRange { .. }
                | Action::DeselectAll
                | Action::SetActiveFrame { .. }
                | Action::SetOnionSkin(_)
                | Action::SetBgColor { .. }
                | Action::Undo
                | Action::Redo
                | Action::Unknown
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_payload_action() {
        let action: Action = serde_json::from_value(json!({
            "type": "UPDATE_CELL_PROPS",
            "payload": {"ids": ["0-1", "2-2"], "props": {"animationType": "spin"}}
        }))
        .unwrap();
        match action {
            Action::UpdateCellProps { ids, props } => {
                assert_eq!(ids, vec![CellId::new(0, 1), CellId::new(2, 2)]);
                assert_eq!(props.animation_type, Some(AnimationType::Spin));
            }
            other => panic!("unexpected action {:?}", other),
        }
    }

    #[test]
    fn test_decode_unit_action() {
        let action: Action = serde_json::from_value(json!({"type": "ADD_FRAME"})).unwrap();
        assert_eq!(action, Action::AddFrame);
    }

    #[test]
    fn test_decode_camel_case_fields() {
        let action: Action = serde_json::from_value(json!({
            "type": "SELECT_RANGE",
            "payload": {"ids": ["1-1"], "anchorId": "1-1"}
        }))
        .unwrap();
        assert_eq!(
            action,
            Action::SelectRange { ids: vec![CellId::new(1, 1)], anchor_id: Some(CellId::new(1, 1)) }
        );
    }

    #[test]
    fn test_unknown_type_decodes() {
        let action: Action = serde_json::from_value(json!({"type": "EXPLODE"})).unwrap();
        assert_eq!(action, Action::Unknown);
    }

    #[test]
    fn test_undoable_set() {
        assert!(Action::AddFrame.is_undoable());
        assert!(Action::ToggleCell { id: CellId::new(0, 0) }.is_undoable());
        assert!(!Action::DeselectAll.is_undoable());
        assert!(!Action::SetActiveFrame { index: 0 }.is_undoable());
        assert!(!Action::SetBgColor { color: "#000000".into() }.is_undoable());
        assert_eq!(Action::SetOnionSkin(OnionSkinPatch::default()).name(), "SET_ONION_SKIN");
    }
}
