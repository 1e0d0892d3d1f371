//! Bounded, most-recent-first list of committed commands.

use std::path::PathBuf;

use indexmap::IndexSet;

use crate::element::{Element, Tree};
use crate::error::Result;
use crate::file_handling::write_history;

/// Top-level key of the history group, in content and in the history file.
pub const HISTORY_KEY: &str = "history";
/// Default number of remembered commands.
pub const DEFAULT_HISTORY_SIZE: usize = 11;

#[derive(Debug, Clone)]
pub struct History {
    path: Option<PathBuf>,
    max_size: usize,
}

impl History {
    /// A history persisted at `path`; `None` keeps it in memory only.
    #[must_use]
    pub fn new(path: Option<PathBuf>, max_size: usize) -> Self {
        Self { path, max_size }
    }

    /// Current entries, most recent first.
    #[must_use]
    pub fn entries(tree: &Tree) -> Vec<String> {
        tree.history()
            .map(|history| {
                tree.get(history)
                    .children()
                    .iter()
                    .map(|&child| tree.get(child).content.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Moves `committed` to the front of the history group of `tree`,
    /// dropping older copies and anything beyond the maximum size.
    pub fn record(&self, tree: &mut Tree, committed: &str) -> Vec<String> {
        let entries: Vec<String> = std::iter::once(committed.to_string())
            .chain(Self::entries(tree))
            .collect::<IndexSet<String>>()
            .into_iter()
            .take(self.max_size)
            .collect();

        let history = match tree.history() {
            Some(history) => history,
            None => {
                let history = tree.insert(Element::new(HISTORY_KEY, false));
                tree.set_history(history);
                history
            }
        };

        let children = entries
            .iter()
            .map(|entry| tree.insert(Element::new(entry, true)))
            .collect();
        tree.replace_children(history, children);

        entries
    }

    /// Writes `entries` to the history file, if there is one.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, entries: &[String]) -> Result<()> {
        match &self.path {
            Some(path) => write_history(path, entries),
            None => Ok(()),
        }
    }

    /// Records `committed` and persists the result.
    ///
    /// The tree is updated even when saving fails.
    ///
    /// # Errors
    ///
    /// Returns an error if the history file cannot be written.
    pub fn commit(&self, tree: &mut Tree, committed: &str) -> Result<Vec<String>> {
        let entries = self.record(tree, committed);
        self.save(&entries)?;
        Ok(entries)
    }
}
