//! The navigation state machine.
//!
//! A [`Navigator`] starts browsing at the root and repeatedly hands the
//! current group's children to a [`Filter`]. Picking a group descends into
//! it, picking a command commits it. The session ends by emitting the
//! committed command, a passthrough selection, or the fallback command when
//! the user aborts.

use log::{debug, info, warn};

use crate::element::{ElementId, Tree};
use crate::error::{Error, FilterError, Result};
use crate::history::History;
use crate::output::OutputSink;

/// Command emitted when the session ends without a choice.
pub const FALLBACK_COMMAND: &str = "pwd";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    #[default]
    Fuzzy,
    /// Case-insensitive substring matching.
    Exact,
}

/// Everything a filter needs to present one level of the tree.
#[derive(Debug, Clone)]
pub struct FilterRequest<'a> {
    pub candidates: &'a [String],
    /// One hint per candidate, shown for the highlighted entry.
    pub hints: &'a [String],
    pub match_mode: MatchMode,
    /// Initial query text.
    pub query: &'a str,
    /// Maximum number of candidates selectable at once.
    pub limit: usize,
    /// Refuse typed text that matches nothing.
    pub strict: bool,
    pub header: &'a str,
}

/// What the user did with a [`FilterRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOutcome {
    /// Several candidates marked at once.
    Selected(Vec<String>),
    /// The `index`-th entry of `matches`, the candidates matching the final
    /// query in match order.
    Picked { index: usize, matches: Vec<String> },
    Back,
    /// Free text typed without any match.
    Typed(String),
    Aborted,
}

/// An interactive chooser over a list of candidates.
pub trait Filter {
    /// Presents `request` and waits for the user.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::NoCandidates`] when there is nothing to show,
    /// or another [`FilterError`] if the filter itself fails.
    fn run(&mut self, request: &FilterRequest<'_>) -> std::result::Result<FilterOutcome, FilterError>;
}

#[derive(Debug, Clone)]
pub struct NavigatorOptions {
    pub match_mode: MatchMode,
    pub limit: usize,
    pub strict: bool,
    /// Query for the first filter call only.
    pub seed_query: Option<String>,
}

impl Default for NavigatorOptions {
    fn default() -> Self {
        Self {
            match_mode: MatchMode::Fuzzy,
            limit: 1,
            strict: true,
            seed_query: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavState {
    Browsing(ElementId),
    Committed(String),
    Emitted(Vec<String>),
    Aborted,
}

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A command was chosen and recorded in history.
    Committed(String),
    /// Text was emitted without touching history.
    Emitted(Vec<String>),
    /// The fallback command was emitted.
    Aborted,
}

pub struct Navigator<'a> {
    tree: &'a mut Tree,
    filter: &'a mut dyn Filter,
    sink: &'a mut dyn OutputSink,
    history: History,
    options: NavigatorOptions,
}

impl<'a> Navigator<'a> {
    pub fn new(
        tree: &'a mut Tree,
        filter: &'a mut dyn Filter,
        sink: &'a mut dyn OutputSink,
        history: History,
        options: NavigatorOptions,
    ) -> Self {
        Self {
            tree,
            filter,
            sink,
            history,
            options,
        }
    }

    /// Runs the session to completion and emits its result.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The filter fails for a reason other than having no candidates
    /// - The filter picks something that is not a child of the current group
    /// - The sink cannot emit
    pub fn run(mut self) -> Result<Outcome> {
        let mut state = NavState::Browsing(self.tree.root());

        while let NavState::Browsing(id) = state {
            state = self.browse(id)?;
        }

        self.finish(state)
    }

    /// One iteration of browsing `id`.
    fn browse(&mut self, id: ElementId) -> Result<NavState> {
        let children = self.tree.prune_empty_groups(id);
        if children.is_empty() {
            debug!("Nothing to choose under {}", self.tree.get(id));
            return Ok(self.ascend(id));
        }

        let candidates: Vec<String> = children
            .iter()
            .map(|&child| self.tree.get(child).content.clone())
            .collect();
        let hints: Vec<String> = children.iter().map(|&child| self.hint(child)).collect();
        let header = self.breadcrumb(id);
        let query = self.options.seed_query.take().unwrap_or_default();

        let request = FilterRequest {
            candidates: &candidates,
            hints: &hints,
            match_mode: self.options.match_mode,
            query: &query,
            limit: self.options.limit,
            strict: self.options.strict,
            header: &header,
        };

        let outcome = match self.filter.run(&request) {
            Ok(outcome) => outcome,
            Err(FilterError::NoCandidates) => return Ok(self.ascend(id)),
            Err(e) => return Err(e.into()),
        };

        Ok(match outcome {
            FilterOutcome::Selected(items) => NavState::Emitted(items),
            FilterOutcome::Typed(text) => NavState::Emitted(vec![text]),
            FilterOutcome::Aborted => NavState::Aborted,
            FilterOutcome::Back => NavState::Browsing(self.tree.parent(id).unwrap_or(id)),
            FilterOutcome::Picked { index, matches } => {
                let choice = matches
                    .get(index)
                    .ok_or_else(|| Error::UnknownChoice(format!("#{index}")))?;
                let target = self
                    .tree
                    .get(id)
                    .child(choice)
                    .ok_or_else(|| Error::UnknownChoice(choice.clone()))?;

                if self.tree.get(target).is_command {
                    NavState::Committed(self.tree.rendered_content(target))
                } else {
                    NavState::Browsing(target)
                }
            }
        })
    }

    fn finish(&mut self, state: NavState) -> Result<Outcome> {
        match state {
            NavState::Committed(command) => {
                if let Err(e) = self.history.commit(self.tree, &command) {
                    warn!("Unable to save history: {e}");
                }
                self.sink.emit(&command)?;
                Ok(Outcome::Committed(command))
            }
            NavState::Emitted(items) => {
                for item in &items {
                    self.sink.emit(item)?;
                }
                Ok(Outcome::Emitted(items))
            }
            NavState::Aborted | NavState::Browsing(_) => {
                info!("No command chosen");
                self.sink.emit_fallback(FALLBACK_COMMAND)?;
                Ok(Outcome::Aborted)
            }
        }
    }

    fn ascend(&self, id: ElementId) -> NavState {
        match self.tree.parent(id) {
            Some(parent) => NavState::Browsing(parent),
            None => NavState::Aborted,
        }
    }

    fn hint(&self, id: ElementId) -> String {
        let element = self.tree.get(id);
        if element.is_command {
            element.description.clone()
        } else {
            self.tree.child_keys_label(id)
        }
    }

    /// Contents from the root's child down to `id`, joined by `/`.
    fn breadcrumb(&self, id: ElementId) -> String {
        let mut path = Vec::new();
        let mut current = Some(id);

        while let Some(element) = current {
            if element == self.tree.root() {
                break;
            }
            path.push(self.tree.get(element).content.as_str());
            current = self.tree.parent(element);
        }

        path.reverse();
        path.join(" / ")
    }
}
