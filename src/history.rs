//! Undo/redo around the reducer.
//!
//! One edit session owns one [`History`]. Snapshots are `Arc<State>` values
//! produced by [`reduce`], so keeping fifty of them costs only the frames
//! that actually differ between them.

use std::collections::VecDeque;
use std::sync::Arc;

use crate::action::Action;
use crate::reducer::reduce;
use crate::state::State;

/// Maximum number of undo steps retained.
pub const MAX_HISTORY: usize = 50;

/// Past, present and future snapshots of one edit session.
#[derive(Debug, Clone)]
pub struct History {
    past: VecDeque<Arc<State>>,
    present: Arc<State>,
    future: VecDeque<Arc<State>>,
}

impl History {
    pub fn new(state: State) -> Self {
        Self { past: VecDeque::new(), present: Arc::new(state), future: VecDeque::new() }
    }

    pub fn present(&self) -> &Arc<State> {
        &self.present
    }

    pub fn into_present(self) -> Arc<State> {
        self.present
    }

    pub fn past_len(&self) -> usize {
        self.past.len()
    }

    pub fn future_len(&self) -> usize {
        self.future.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Run one action. Returns whether the present changed.
    ///
    /// `UNDO`/`REDO` are routed to [`undo`](Self::undo)/[`redo`](Self::redo).
    /// Other actions go through the reducer; a real change to an undoable
    /// action pushes the old present and clears the redo branch, while
    /// cosmetic actions replace the present and leave both stacks alone.
    pub fn dispatch(&mut self, action: &Action) -> bool {
        match action {
            Action::Undo => return self.undo(),
            Action::Redo => return self.redo(),
            _ => {}
        }

        let next = reduce(&self.present, action);
        if Arc::ptr_eq(&next, &self.present) {
            return false;
        }

        let previous = std::mem::replace(&mut self.present, next);
        if action.is_undoable() {
            self.past.push_back(previous);
            while self.past.len() > MAX_HISTORY {
                self.past.pop_front();
            }
            self.future.clear();
        }
        tracing::debug!(
            action = action.name(),
            past = self.past.len(),
            future = self.future.len(),
            "dispatched"
        );
        true
    }

    /// Dispatch a batch in order; returns how many actions changed the state.
    pub fn dispatch_all<'a>(&mut self, actions: impl IntoIterator<Item = &'a Action>) -> usize {
        actions.into_iter().filter(|action| self.dispatch(action)).count()
    }

    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.past.pop_back() else {
            return false;
        };
        let restored = self.restore(&previous);
        let current = std::mem::replace(&mut self.present, restored);
        self.future.push_front(current);
        tracing::debug!(past = self.past.len(), future = self.future.len(), "undo");
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(next) = self.future.pop_front() else {
            return false;
        };
        let restored = self.restore(&next);
        let current = std::mem::replace(&mut self.present, restored);
        self.past.push_back(current);
        tracing::debug!(past = self.past.len(), future = self.future.len(), "redo");
        true
    }

    /// A historical snapshot carrying the current selection, with the active
    /// frame index clamped to the snapshot's frame list.
    fn restore(&self, snapshot: &Arc<State>) -> Arc<State> {
        let mut state = State::clone(snapshot);
        state.selected_cell_ids = self.present.selected_cell_ids.clone();
        state.last_selected_id = self.present.last_selected_id;
        state.active_frame_index = self.present.active_frame_index.min(state.frames.len() - 1);
        Arc::new(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CellId, GridSize};

    fn toggle(row: usize, col: usize) -> Action {
        Action::ToggleCell { id: CellId::new(row, col) }
    }

    fn session() -> History {
        History::new(State::new(GridSize::new(4, 4)))
    }

    #[test]
    fn test_undo_redo_inverse() {
        let mut history = session();
        let start = Arc::clone(history.present());
        let actions = [toggle(0, 0), toggle(1, 1), Action::AddFrame, toggle(2, 2)];
        history.dispatch_all(&actions);
        let end = Arc::clone(history.present());

        for _ in 0..actions.len() {
            assert!(history.undo());
        }
        assert!(!history.undo());
        assert_eq!(history.present().frames, start.frames);

        for _ in 0..actions.len() {
            assert!(history.redo());
        }
        assert!(!history.redo());
        assert_eq!(history.present().frames, end.frames);
    }

    #[test]
    fn test_noop_leaves_history_alone() {
        let mut history = session();
        history.dispatch(&toggle(0, 0));
        history.undo();
        assert_eq!(history.future_len(), 1);
        assert!(!history.dispatch(&toggle(9, 9)));
        assert_eq!(history.future_len(), 1);
        assert_eq!(history.past_len(), 0);
    }

    #[test]
    fn test_cosmetic_actions_skip_history() {
        let mut history = session();
        history.dispatch(&toggle(0, 0));
        history.undo();
        assert!(history.dispatch(&Action::SelectCell { id: CellId::new(1, 1), shift: false, meta: false }));
        assert!(history.dispatch(&Action::SetBgColor { color: "#000000".into() }));
        assert_eq!(history.past_len(), 0);
        assert_eq!(history.future_len(), 1);
    }

    #[test]
    fn test_undoable_action_clears_future() {
        let mut history = session();
        history.dispatch(&toggle(0, 0));
        history.undo();
        history.dispatch(&toggle(1, 1));
        assert!(!history.can_redo());
        assert_eq!(history.past_len(), 1);
    }

    #[test]
    fn test_history_cap() {
        let mut history = session();
        for i in 0..(MAX_HISTORY + 10) {
            history.dispatch(&toggle(i % 4, (i / 4) % 4));
        }
        assert_eq!(history.past_len(), MAX_HISTORY);
        let mut undone = 0;
        while history.undo() {
            undone += 1;
        }
        assert_eq!(undone, MAX_HISTORY);
    }

    #[test]
    fn test_undo_keeps_selection_and_clamps_frame() {
        let mut history = session();
        history.dispatch(&Action::AddFrame);
        history.dispatch(&Action::SelectCell { id: CellId::new(2, 3), shift: false, meta: false });
        assert_eq!(history.present().active_frame_index, 1);

        assert!(history.dispatch(&Action::Undo));
        let present = history.present();
        assert_eq!(present.frames.len(), 1);
        assert_eq!(present.active_frame_index, 0);
        assert_eq!(present.selected_cell_ids, vec![CellId::new(2, 3)]);
        assert_eq!(present.last_selected_id, Some(CellId::new(2, 3)));
    }
}
