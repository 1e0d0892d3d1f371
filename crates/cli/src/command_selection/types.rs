//! Type definitions for the filter widget state.
//!
//! This module defines the UI state of the terminal filter: the query being
//! typed, the highlighted row, the scrolled viewport and marked candidates.

use indexmap::IndexSet;

/// Direction to cycle through candidates in the selection UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleDirection {
    Up,
    Down,
}

/// State for the UI viewport.
///
/// Tracks the visible portion of the candidate list when there are more
/// matches than can fit on screen.
#[derive(Clone, PartialEq, Debug)]
pub struct ViewportState {
    pub offset: usize,
    pub height: u16,
    pub width: u16,
}

/// Complete UI state for the filter widget.
#[derive(Clone, PartialEq, Debug)]
pub struct UiState {
    /// Highlighted row, as an index into the current matches
    pub selected_index: usize,
    /// Viewport state for scrolling
    pub viewport: ViewportState,
    /// Current query text
    pub query: String,
    /// Candidate indexes marked for multi-selection, in marking order
    pub marked: IndexSet<usize>,
}

impl UiState {
    #[must_use]
    pub fn new(query: &str, viewport: ViewportState) -> Self {
        Self {
            selected_index: 0,
            viewport,
            query: query.to_string(),
            marked: IndexSet::new(),
        }
    }

    /// Copy with a new query; the highlight returns to the top.
    #[must_use]
    pub fn with_query(&self, query: String) -> Self {
        Self {
            selected_index: 0,
            viewport: ViewportState {
                offset: 0,
                ..self.viewport.clone()
            },
            query,
            marked: self.marked.clone(),
        }
    }

    /// Marks `candidate`, or unmarks it if already marked. Marks beyond
    /// `limit` are refused.
    pub fn toggle_mark(&mut self, candidate: usize, limit: usize) {
        if !self.marked.shift_remove(&candidate) && self.marked.len() < limit {
            self.marked.insert(candidate);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> ViewportState {
        ViewportState {
            offset: 3,
            height: 10,
            width: 80,
        }
    }

    #[test]
    fn test_with_query_resets_position() {
        let mut state = UiState::new("", viewport());
        state.selected_index = 5;
        state.marked.insert(2);

        let updated = state.with_query("git".to_string());

        assert_eq!(updated.selected_index, 0);
        assert_eq!(updated.viewport.offset, 0);
        assert_eq!(updated.viewport.height, 10);
        assert_eq!(updated.query, "git");
        assert!(updated.marked.contains(&2));
    }

    #[test]
    fn test_toggle_mark_respects_limit() {
        let mut state = UiState::new("", viewport());

        state.toggle_mark(4, 2);
        state.toggle_mark(1, 2);
        state.toggle_mark(7, 2);
        assert_eq!(state.marked.iter().copied().collect::<Vec<_>>(), vec![4, 1]);

        state.toggle_mark(4, 2);
        state.toggle_mark(7, 2);
        assert_eq!(state.marked.iter().copied().collect::<Vec<_>>(), vec![1, 7]);
    }

    #[test]
    fn test_ui_state_equality() {
        let state1 = UiState::new("", viewport());
        let state2 = UiState::new("", viewport());
        let state3 = UiState::new("x", viewport());

        assert_eq!(state1, state2);
        assert_ne!(state1, state3);
    }
}
