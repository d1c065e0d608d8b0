//! Pure state transitions.
//!
//! [`reduce`] never mutates its input. A transition that changes nothing
//! returns the input `Arc` itself, so callers can detect no-ops with
//! [`Arc::ptr_eq`]. Untouched frames are shared between the old and new
//! snapshot; touched frames are cloned on write.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::action::Action;
use crate::models::{AnimationType, CellId, CellPatch, CellProps, GridSize};
use crate::state::{build_cells, Frame, State};

/// Apply one action, returning the next state.
pub fn reduce(state: &Arc<State>, action: &Action) -> Arc<State> {
    match transition(state, action) {
        Some(next) => Arc::new(next),
        None => {
            tracing::trace!(action = action.name(), "no-op");
            Arc::clone(state)
        }
    }
}

/// `None` means the action leaves the state unchanged.
fn transition(state: &State, action: &Action) -> Option<State> {
    match action {
        Action::SetGridSize { rows, cols } => set_grid_size(state, GridSize::new(*rows, *cols)),

        Action::ToggleCell { id } => update_cells(state, [id], |props| props.active = !props.active),

        Action::PaintCell { id, fill } => update_cells(state, [id], |props| {
            props.active = true;
            props.fill = fill.clone();
        }),

        Action::SelectCell { id, shift, meta } => select_cell(state, *id, *shift, *meta),

        Action::SelectRange { ids, anchor_id } => {
            let mut next = state.clone();
            next.selected_cell_ids = ids.iter().copied().filter(|id| state.grid_size.contains(*id)).collect();
            next.last_selected_id = *anchor_id;
            Some(next)
        }

        Action::DeselectAll => {
            if state.selected_cell_ids.is_empty() && state.last_selected_id.is_none() {
                return None;
            }
            let mut next = state.clone();
            next.selected_cell_ids.clear();
            next.last_selected_id = None;
            Some(next)
        }

        Action::UpdateCellProps { ids, props } => update_cells(state, ids, |cell| props.apply(cell)),

        Action::ApplyAnimationType { ids, animation_type } => {
            update_cells(state, ids, |props| props.animation_type = *animation_type)
        }

        Action::LoadPreset { cells, grid_size } => load_preset(state, cells, *grid_size),

        Action::ApplyPresetAnimation { cells, grid_size } => {
            apply_preset_animation(state, cells, grid_size.unwrap_or_default())
        }

        Action::ClearAll => {
            let mut next = state.clone();
            next.frames = vec![Arc::new(Frame::blank(0, state.grid_size))];
            next.active_frame_index = 0;
            next.next_frame_id = 1;
            next.selected_cell_ids.clear();
            next.last_selected_id = None;
            Some(next)
        }

        Action::DeactivateCells { ids } => {
            let deactivated = update_cells(state, ids, |props| {
                props.active = false;
                props.animation_type = AnimationType::None;
            });
            let mut next = match deactivated {
                Some(next) => next,
                None if state.selected_cell_ids.is_empty() => return None,
                None => state.clone(),
            };
            next.selected_cell_ids.clear();
            Some(next)
        }

        Action::AddFrame => {
            let mut next = state.clone();
            next.frames.push(Arc::new(Frame::blank(state.next_frame_id, state.grid_size)));
            next.active_frame_index = next.frames.len() - 1;
            next.next_frame_id += 1;
            Some(next)
        }

        Action::DuplicateFrame => {
            let copy = Frame { id: state.next_frame_id, cells: state.cells().clone() };
            let mut next = state.clone();
            next.frames.insert(state.active_frame_index + 1, Arc::new(copy));
            next.active_frame_index += 1;
            next.next_frame_id += 1;
            Some(next)
        }

        Action::RemoveFrame => {
            if state.frames.len() <= 1 {
                return None;
            }
            let mut next = state.clone();
            next.frames.remove(state.active_frame_index);
            next.active_frame_index = state.active_frame_index.min(next.frames.len() - 1);
            Some(next)
        }

        Action::SetActiveFrame { index } => {
            let index = if *index == -1 {
                (state.active_frame_index + 1) % state.frames.len()
            } else {
                usize::try_from(*index).ok().filter(|i| *i < state.frames.len())?
            };
            if index == state.active_frame_index {
                return None;
            }
            let mut next = state.clone();
            next.active_frame_index = index;
            Some(next)
        }

        Action::ApplyStagger { delays } => {
            update_each(state, delays.iter().map(|(id, delay)| (id, *delay)), |props, delay| props.delay = delay)
        }

        Action::SetOnionSkin(patch) => {
            let onion_skin = state.onion_skin.merged(patch);
            if onion_skin == state.onion_skin {
                return None;
            }
            let mut next = state.clone();
            next.onion_skin = onion_skin;
            Some(next)
        }

        Action::SetBgColor { color } => {
            if *color == state.bg_color {
                return None;
            }
            let mut next = state.clone();
            next.bg_color = color.clone();
            Some(next)
        }

        Action::Undo | Action::Redo | Action::Unknown => None,
    }
}

/// Apply `f` to every named cell of the active frame that exists.
fn update_cells<'a>(
    state: &State,
    ids: impl IntoIterator<Item = &'a CellId>,
    mut f: impl FnMut(&mut CellProps),
) -> Option<State> {
    update_each(state, ids.into_iter().map(|id| (id, ())), |props, ()| f(props))
}

/// Like [`update_cells`], with a per-cell value. Unknown ids are skipped; if
/// none match, nothing changes.
fn update_each<'a, T>(
    state: &State,
    entries: impl IntoIterator<Item = (&'a CellId, T)>,
    mut f: impl FnMut(&mut CellProps, T),
) -> Option<State> {
    let entries: Vec<(&CellId, T)> =
        entries.into_iter().filter(|(id, _)| state.cells().contains_key(*id)).collect();
    if entries.is_empty() {
        return None;
    }

    let mut next = state.clone();
    let cells = &mut next.active_frame_mut().cells;
    for (id, value) in entries {
        if let Some(cell) = cells.get_mut(id) {
            f(&mut cell.props, value);
        }
    }
    Some(next)
}

fn set_grid_size(state: &State, grid_size: GridSize) -> Option<State> {
    let grid_size = grid_size.validate().ok()?;
    if grid_size == state.grid_size {
        return None;
    }

    let mut next = state.clone();
    next.grid_size = grid_size;
    next.frames = state.frames.iter().map(|f| Arc::new(f.resized(grid_size))).collect();
    next.selected_cell_ids.retain(|id| grid_size.contains(*id));
    next.last_selected_id = state.last_selected_id.filter(|id| grid_size.contains(*id));
    Some(next)
}

fn select_cell(state: &State, id: CellId, shift: bool, meta: bool) -> Option<State> {
    if !state.grid_size.contains(id) {
        return None;
    }
    let mut next = state.clone();

    if meta {
        if let Some(pos) = next.selected_cell_ids.iter().position(|s| *s == id) {
            next.selected_cell_ids.remove(pos);
        } else {
            next.selected_cell_ids.push(id);
        }
        next.last_selected_id = Some(id);
        return Some(next);
    }

    match (shift, state.last_selected_id) {
        (true, Some(anchor)) => {
            let (r0, r1) = (anchor.row.min(id.row), anchor.row.max(id.row));
            let (c0, c1) = (anchor.col.min(id.col), anchor.col.max(id.col));
            next.selected_cell_ids =
                (r0..=r1).flat_map(|r| (c0..=c1).map(move |c| CellId::new(r, c))).collect();
        }
        _ => {
            next.selected_cell_ids = vec![id];
            next.last_selected_id = Some(id);
        }
    }
    Some(next)
}

fn load_preset(state: &State, preset: &BTreeMap<CellId, CellProps>, grid_size: Option<GridSize>) -> Option<State> {
    let grid_size = grid_size.unwrap_or(state.grid_size).validate().ok()?;

    let mut cells = build_cells(grid_size);
    for (id, props) in preset {
        if let Some(cell) = cells.get_mut(id) {
            cell.props = props.clone();
        }
    }

    let mut next = state.clone();
    next.grid_size = grid_size;
    next.frames = vec![Arc::new(Frame { id: 0, cells })];
    next.active_frame_index = 0;
    next.next_frame_id = 1;
    next.selected_cell_ids.clear();
    next.last_selected_id = None;
    Some(next)
}

fn apply_preset_animation(
    state: &State,
    preset: &BTreeMap<CellId, CellPatch>,
    preset_size: GridSize,
) -> Option<State> {
    if preset_size.rows == 0 || preset_size.cols == 0 {
        return None;
    }
    let scale_r = state.grid_size.rows as f64 / preset_size.rows as f64;
    let scale_c = state.grid_size.cols as f64 / preset_size.cols as f64;
    let cells = state.cells();

    // Preset cell (r, c) covers target rows floor(r*s)..floor((r+1)*s).
    let mut targets: Vec<(&CellId, CellPatch)> = Vec::new();
    for (pid, patch) in preset.iter().filter(|(_, p)| p.active == Some(true)) {
        let animation = CellPatch { fill: None, active: None, ..patch.clone() };
        let start_r = (pid.row as f64 * scale_r).floor() as usize;
        let end_r = ((pid.row + 1) as f64 * scale_r).floor() as usize;
        let start_c = (pid.col as f64 * scale_c).floor() as usize;
        let end_c = ((pid.col + 1) as f64 * scale_c).floor() as usize;

        for r in start_r..end_r {
            for c in start_c..end_c {
                if let Some((id, cell)) = cells.get_key_value(&CellId::new(r, c)) {
                    if cell.is_active() {
                        targets.push((id, animation.clone()));
                    }
                }
            }
        }
    }

    update_each(state, targets, |cell, patch| patch.apply(cell))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Range;
    use crate::state::OnionSkinPatch;

    fn id(row: usize, col: usize) -> CellId {
        CellId::new(row, col)
    }

    fn fresh(rows: usize, cols: usize) -> Arc<State> {
        Arc::new(State::new(GridSize::new(rows, cols)))
    }

    fn dispatch(state: &Arc<State>, actions: &[Action]) -> Arc<State> {
        actions.iter().fold(Arc::clone(state), |s, a| reduce(&s, a))
    }

    #[test]
    fn test_toggle_missing_cell_is_same_reference() {
        let state = fresh(4, 4);
        let next = reduce(&state, &Action::ToggleCell { id: id(9, 9) });
        assert!(Arc::ptr_eq(&state, &next));
    }

    #[test]
    fn test_unknown_action_is_same_reference() {
        let state = fresh(4, 4);
        assert!(Arc::ptr_eq(&state, &reduce(&state, &Action::Unknown)));
        assert!(Arc::ptr_eq(&state, &reduce(&state, &Action::Undo)));
    }

    #[test]
    fn test_toggle_flips_active_on_active_frame_only() {
        let state = dispatch(&fresh(2, 2), &[Action::AddFrame, Action::ToggleCell { id: id(0, 1) }]);
        assert!(state.cells()[&id(0, 1)].is_active());
        assert!(!state.frames[0].cells[&id(0, 1)].is_active());
        let back = reduce(&state, &Action::ToggleCell { id: id(0, 1) });
        assert!(!back.cells()[&id(0, 1)].is_active());
    }

    #[test]
    fn test_untouched_frames_are_shared() {
        let state = dispatch(&fresh(2, 2), &[Action::AddFrame]);
        let next = reduce(&state, &Action::PaintCell { id: id(1, 1), fill: "#ff0000".into() });
        assert!(Arc::ptr_eq(&state.frames[0], &next.frames[0]));
        assert!(!Arc::ptr_eq(&state.frames[1], &next.frames[1]));
        assert_eq!(next.cells()[&id(1, 1)].props.fill, "#ff0000");
        assert!(next.cells()[&id(1, 1)].is_active());
        assert!(!state.cells()[&id(1, 1)].is_active());
    }

    #[test]
    fn test_resize_round_trip_preserves_cells() {
        let painted = dispatch(
            &fresh(4, 4),
            &[
                Action::PaintCell { id: id(1, 1), fill: "#00ff00".into() },
                Action::PaintCell { id: id(3, 3), fill: "#0000ff".into() },
                Action::SelectCell { id: id(3, 3), shift: false, meta: false },
            ],
        );
        let smaller = reduce(&painted, &Action::SetGridSize { rows: 2, cols: 2 });
        assert_eq!(smaller.cells().len(), 4);
        assert!(smaller.selected_cell_ids.is_empty());

        let restored = reduce(&smaller, &Action::SetGridSize { rows: 4, cols: 4 });
        assert_eq!(restored.cells()[&id(1, 1)], painted.cells()[&id(1, 1)]);
        assert!(!restored.cells()[&id(3, 3)].is_active());
    }

    #[test]
    fn test_resize_invalid_is_noop() {
        let state = fresh(4, 4);
        assert!(Arc::ptr_eq(&state, &reduce(&state, &Action::SetGridSize { rows: 0, cols: 4 })));
        assert!(Arc::ptr_eq(&state, &reduce(&state, &Action::SetGridSize { rows: 4, cols: 4 })));
    }

    #[test]
    fn test_select_modes() {
        let state = reduce(&fresh(4, 4), &Action::SelectCell { id: id(1, 1), shift: false, meta: false });
        assert_eq!(state.selected_cell_ids, vec![id(1, 1)]);
        assert_eq!(state.last_selected_id, Some(id(1, 1)));

        let meta = reduce(&state, &Action::SelectCell { id: id(0, 3), shift: false, meta: true });
        assert_eq!(meta.selected_cell_ids, vec![id(1, 1), id(0, 3)]);
        let meta = reduce(&meta, &Action::SelectCell { id: id(1, 1), shift: false, meta: true });
        assert_eq!(meta.selected_cell_ids, vec![id(0, 3)]);
        assert_eq!(meta.last_selected_id, Some(id(1, 1)));

        let range = reduce(&state, &Action::SelectCell { id: id(0, 0), shift: true, meta: false });
        assert_eq!(range.selected_cell_ids, vec![id(0, 0), id(0, 1), id(1, 0), id(1, 1)]);
        assert_eq!(range.last_selected_id, Some(id(1, 1)));

        let cleared = reduce(&range, &Action::DeselectAll);
        assert!(cleared.selected_cell_ids.is_empty());
        assert!(cleared.last_selected_id.is_none());
    }

    #[test]
    fn test_update_props_skips_unknown_ids() {
        let patch = CellPatch { duration: Some(3.0), ..Default::default() };
        let state = reduce(&fresh(2, 2), &Action::UpdateCellProps { ids: vec![id(0, 0), id(5, 5)], props: patch });
        assert_eq!(state.cells()[&id(0, 0)].props.duration, 3.0);
        assert_eq!(state.cells()[&id(0, 1)].props.duration, 1.0);
    }

    #[test]
    fn test_deactivate_clears_selection_and_animation() {
        let state = dispatch(
            &fresh(2, 2),
            &[
                Action::PaintCell { id: id(0, 0), fill: "#ffffff".into() },
                Action::ApplyAnimationType { ids: vec![id(0, 0)], animation_type: AnimationType::Pulse },
                Action::SelectCell { id: id(0, 0), shift: false, meta: false },
                Action::DeactivateCells { ids: vec![id(0, 0)] },
            ],
        );
        let cell = &state.cells()[&id(0, 0)];
        assert!(!cell.is_active());
        assert_eq!(cell.props.animation_type, AnimationType::None);
        assert_eq!(cell.props.fill, "#ffffff");
        assert!(state.selected_cell_ids.is_empty());
    }

    #[test]
    fn test_frame_lifecycle() {
        let state = dispatch(&fresh(2, 2), &[Action::PaintCell { id: id(0, 0), fill: "#123456".into() }]);
        let dup = reduce(&state, &Action::DuplicateFrame);
        assert_eq!(dup.frames.len(), 2);
        assert_eq!(dup.active_frame_index, 1);
        assert_eq!(dup.frames[1].id, 1);
        assert_eq!(dup.cells()[&id(0, 0)].props.fill, "#123456");
        assert_eq!(dup.next_frame_id, 2);

        let added = reduce(&dup, &Action::AddFrame);
        assert_eq!(added.frames.len(), 3);
        assert_eq!(added.frames[2].id, 2);
        assert!(added.cells().values().all(|c| !c.is_active()));

        let removed = reduce(&added, &Action::RemoveFrame);
        assert_eq!(removed.frames.len(), 2);
        assert_eq!(removed.active_frame_index, 1);
        assert_eq!(removed.next_frame_id, 3);

        let again = reduce(&removed, &Action::AddFrame);
        assert_eq!(again.frames[2].id, 3);
    }

    #[test]
    fn test_remove_last_frame_is_noop() {
        let state = fresh(2, 2);
        assert!(Arc::ptr_eq(&state, &reduce(&state, &Action::RemoveFrame)));
    }

    #[test]
    fn test_set_active_frame_wraps() {
        let state = dispatch(&fresh(2, 2), &[Action::AddFrame, Action::AddFrame]);
        assert_eq!(state.active_frame_index, 2);
        let wrapped = reduce(&state, &Action::SetActiveFrame { index: -1 });
        assert_eq!(wrapped.active_frame_index, 0);
        let next = reduce(&wrapped, &Action::SetActiveFrame { index: -1 });
        assert_eq!(next.active_frame_index, 1);
        assert!(Arc::ptr_eq(&next, &reduce(&next, &Action::SetActiveFrame { index: 7 })));
    }

    #[test]
    fn test_clear_all_resets_frames() {
        let state = dispatch(
            &fresh(3, 3),
            &[Action::AddFrame, Action::PaintCell { id: id(0, 0), fill: "#fff".into() }, Action::ClearAll],
        );
        assert_eq!(state.frames.len(), 1);
        assert_eq!(state.next_frame_id, 1);
        assert_eq!(state.grid_size, GridSize::new(3, 3));
        assert_eq!(state.active_frame().active_cells().count(), 0);
    }

    #[test]
    fn test_load_preset_replaces_document() {
        let mut preset = BTreeMap::new();
        preset.insert(id(1, 1), CellProps { active: true, fill: "#ef4444".into(), ..Default::default() });
        let state = dispatch(
            &fresh(3, 3),
            &[
                Action::AddFrame,
                Action::LoadPreset { cells: preset, grid_size: Some(GridSize::new(4, 4)) },
            ],
        );
        assert_eq!(state.grid_size, GridSize::new(4, 4));
        assert_eq!(state.frames.len(), 1);
        assert_eq!(state.cells().len(), 16);
        assert_eq!(state.cells()[&id(1, 1)].props.fill, "#ef4444");
        assert_eq!(state.next_frame_id, 1);
    }

    #[test]
    fn test_preset_animation_scales_coordinates() {
        let mut preset = BTreeMap::new();
        preset.insert(
            id(0, 0),
            CellPatch {
                active: Some(true),
                animation_type: Some(AnimationType::Bounce),
                scale: Some(Range::new(1.0, 1.3)),
                fill: Some("#000000".into()),
                ..Default::default()
            },
        );
        let mut state = fresh(16, 16);
        for cell in [id(0, 0), id(0, 1), id(1, 0), id(2, 2)] {
            state = reduce(&state, &Action::ToggleCell { id: cell });
        }
        let next = reduce(
            &state,
            &Action::ApplyPresetAnimation { cells: preset, grid_size: Some(GridSize::new(8, 8)) },
        );

        for cell in [id(0, 0), id(0, 1), id(1, 0)] {
            assert_eq!(next.cells()[&cell].props.animation_type, AnimationType::Bounce);
            assert_eq!(next.cells()[&cell].props.fill, crate::models::DEFAULT_FILL);
        }
        // inactive cell inside the covered block stays untouched
        assert_eq!(next.cells()[&id(1, 1)].props.animation_type, AnimationType::None);
        assert_eq!(next.cells()[&id(2, 2)].props.animation_type, AnimationType::None);
    }

    #[test]
    fn test_preset_animation_on_blank_grid_is_noop() {
        let mut preset = BTreeMap::new();
        preset.insert(id(0, 0), CellPatch::activate());
        let state = fresh(8, 8);
        let next = reduce(&state, &Action::ApplyPresetAnimation { cells: preset, grid_size: None });
        assert!(Arc::ptr_eq(&state, &next));
    }

    #[test]
    fn test_partial_preset_keeps_undefined_fields() {
        let mut state = reduce(&fresh(8, 8), &Action::ToggleCell { id: id(3, 3) });
        state = reduce(
            &state,
            &Action::UpdateCellProps {
                ids: vec![id(3, 3)],
                props: CellPatch { delay: Some(0.4), duration: Some(2.5), ..Default::default() },
            },
        );
        let action: Action = serde_json::from_value(serde_json::json!({
            "type": "APPLY_PRESET_ANIMATION",
            "payload": {
                "cells": {"3-3": {"active": true, "animationType": "bounce"}},
                "gridSize": {"rows": 8, "cols": 8}
            }
        }))
        .unwrap();
        let next = reduce(&state, &action);

        let props = &next.cells()[&id(3, 3)].props;
        assert_eq!(props.animation_type, AnimationType::Bounce);
        assert_eq!(props.delay, 0.4);
        assert_eq!(props.duration, 2.5);
    }

    #[test]
    fn test_apply_stagger_sets_delays() {
        let mut delays = BTreeMap::new();
        delays.insert(id(0, 0), 0.0);
        delays.insert(id(0, 1), 0.75);
        let state = reduce(&fresh(2, 2), &Action::ApplyStagger { delays });
        assert_eq!(state.cells()[&id(0, 1)].props.delay, 0.75);
    }

    #[test]
    fn test_view_settings() {
        let state = reduce(&fresh(2, 2), &Action::SetBgColor { color: "#000000".into() });
        assert_eq!(state.bg_color, "#000000");
        let patch = OnionSkinPatch { enabled: Some(true), ..Default::default() };
        let onion = reduce(&state, &Action::SetOnionSkin(patch));
        assert!(onion.onion_skin.enabled);
        assert!(Arc::ptr_eq(&onion, &reduce(&onion, &Action::SetOnionSkin(patch))));
    }
}
