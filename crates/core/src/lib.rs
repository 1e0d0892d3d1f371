//! Treecuts Core Library
//!
//! This crate provides the core functionality for treecuts, an interactive
//! launcher that turns nested, tag-annotated YAML declarations of shell
//! commands into a tree the user narrows down with a filter.
//!
//! # Key Features
//!
//! - **Tree Building**: Groups, commands, `^` descriptions and inherited `@tags`
//! - **Admission Criteria**: Keep only commands matching tag or text filters
//! - **Flattening**: Project the tree into one list, rendering `<>` templates
//! - **Navigation**: Walk the tree through a pluggable [`navigator::Filter`]
//! - **History**: Bounded, deduplicated, most-recent-first command history
//!
//! # Examples
//!
//! Building a tree and choosing a command:
//!
//! ```
//! use treecuts_core::builder::{BuildOptions, TreeBuilder};
//! use treecuts_core::document::RawValue;
//! use treecuts_core::error::FilterError;
//! use treecuts_core::history::History;
//! use treecuts_core::navigator::{
//!     Filter, FilterOutcome, FilterRequest, Navigator, NavigatorOptions, Outcome,
//! };
//!
//! /// Always picks the first candidate.
//! struct First;
//!
//! impl Filter for First {
//!     fn run(&mut self, request: &FilterRequest<'_>) -> Result<FilterOutcome, FilterError> {
//!         Ok(FilterOutcome::Picked { index: 0, matches: request.candidates.to_vec() })
//!     }
//! }
//!
//! let document = RawValue::from_yaml_str("example", "group10: [ls -la, echo hi]")?;
//! let mut tree = TreeBuilder::new(BuildOptions::default()).build(&document)?;
//! let mut sink: Vec<String> = Vec::new();
//!
//! let outcome = Navigator::new(
//!     &mut tree,
//!     &mut First,
//!     &mut sink,
//!     History::new(None, 11),
//!     NavigatorOptions::default(),
//! )
//! .run()?;
//!
//! assert_eq!(outcome, Outcome::Committed("ls -la".to_string()));
//! assert_eq!(sink, vec!["ls -la"]);
//! # Ok::<(), treecuts_core::error::Error>(())
//! ```

pub mod builder;
pub mod config;
pub mod criteria;
pub mod document;
pub mod element;
pub mod error;
pub mod file_handling;
pub mod flatten;
pub mod history;
pub mod navigator;
pub mod output;
pub mod template;
