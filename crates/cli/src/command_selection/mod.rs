//! Interactive terminal filter.
//!
//! This module provides the terminal-based chooser the navigator hands each
//! level of the tree to.
//!
//! # Key Features
//!
//! - **Scrolling Candidate List**: Indicator on the highlighted row, marks for multi-selection
//! - **Fuzzy or Exact Matching**: Matched characters are highlighted as you type
//! - **Hints**: The footer shows a group's children or a command's description
//! - **Keyboard Navigation**: Full keyboard control with mouse support
//!
//! # User Interface
//!
//! The interface supports:
//! - Arrow keys or Ctrl-p/Ctrl-n (Ctrl-k/Ctrl-j) navigation
//! - Enter or Right to pick, Left on an empty query to go back
//! - Tab to mark candidates when several may be selected
//! - Typing to filter candidates
//! - Escape or Ctrl-c to quit

pub mod colors;
pub mod matching;
pub mod types;
pub mod ui;

// Re-exports for convenience
pub use colors::{parse_color, Palette};
pub use matching::{find_matches, Match};
pub use ui::TerminalFilter;
