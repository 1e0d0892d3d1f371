//! Command-line argument parsing.
//!
//! This module defines the command-line interface structure using the `clap`
//! crate and derives the admission [`Criteria`] from it.

use clap::Parser;
use treecuts_core::criteria::{Criteria, FilterMode};
use treecuts_core::navigator::MatchMode;

/// Command-line arguments for the treecuts CLI tool.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use treecuts_cli::cli_args::Args;
///
/// let args = Args::parse_from(["tcut", "--tags", "git"]);
/// assert!(args.is_flat());
/// ```
#[derive(Parser, Debug)] // requires `derive` feature
#[command(term_width = 0)] // Just to make testing across clap features easier
#[allow(clippy::struct_excessive_bools)] // silence clippy's warning on this struct
pub struct Args {
    /// Create a local `.treecuts/content.yml` with sample content and exit.
    #[arg(long, short = 'i', action)]
    pub init: bool,

    /// Show every command in one list instead of browsing groups.
    #[arg(long, short = 'f', action)]
    pub flat: bool,

    /// Treat PATHS as tags; only commands with a matching tag are shown.
    ///
    /// Implies `--flat`.
    #[arg(long, short = 't', action, conflicts_with = "all")]
    pub tags: bool,

    /// Treat PATHS as text matched against tags, commands and descriptions.
    ///
    /// Implies `--flat`.
    #[arg(long, short = 'a', action)]
    pub all: bool,

    /// Copy the chosen command to the clipboard instead of printing it.
    #[arg(long, short = 'c', action)]
    pub copy: bool,

    /// Treat PATHS as extra content files or URLs (the default).
    #[arg(long, short = 's', action)]
    pub files: bool,

    /// Match the query as a case-insensitive substring instead of fuzzily.
    #[arg(long, short = 'e', action)]
    pub exact: bool,

    /// Initial query for the first list.
    #[arg(long, short = 'q')]
    pub query: Option<String>,

    /// Directory holding content, history and settings.
    ///
    /// If not provided, defaults to `~/.treecuts`.
    #[arg(long, short = 'd')]
    pub data_dir: Option<String>,

    /// Extra content files or URLs, or filter strings with `--tags`/`--all`.
    pub paths: Vec<String>,
}

impl Args {
    /// How [`Args::paths`] are interpreted.
    #[must_use]
    pub fn filter_mode(&self) -> FilterMode {
        if self.tags {
            FilterMode::Tags
        } else if self.all {
            FilterMode::Anything
        } else if self.files {
            FilterMode::Files
        } else {
            FilterMode::None
        }
    }

    /// Filtering implies flat mode.
    #[must_use]
    pub fn is_flat(&self) -> bool {
        self.flat || self.tags || self.all
    }

    #[must_use]
    pub fn criteria(&self) -> Criteria {
        match self.filter_mode() {
            mode @ (FilterMode::Tags | FilterMode::Anything) => {
                Criteria::new(mode, self.paths.clone())
            }
            mode => Criteria::new(mode, Vec::new()),
        }
    }

    /// Extra sources to merge; empty when paths are filter strings.
    #[must_use]
    pub fn extra_sources(&self) -> &[String] {
        match self.filter_mode() {
            FilterMode::None | FilterMode::Files => &self.paths,
            FilterMode::Tags | FilterMode::Anything => &[],
        }
    }

    /// Command line `--exact` wins over the `fuzzy` setting.
    #[must_use]
    pub fn match_mode(&self, fuzzy_setting: bool) -> MatchMode {
        if self.exact || !fuzzy_setting {
            MatchMode::Exact
        } else {
            MatchMode::Fuzzy
        }
    }
}
