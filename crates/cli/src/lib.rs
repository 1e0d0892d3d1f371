//! Treecuts CLI Library
//!
//! This crate provides the command-line interface for treecuts: it gathers
//! content from files and URLs, draws the interactive filter, and prints or
//! copies the chosen command.
//!
//! # Architecture
//!
//! The CLI is organized into several key modules:
//!
//! - [`cli_args`]: Command-line argument parsing
//! - [`sources`]: Loading and merging content files and URLs
//! - [`command_selection`]: The crossterm filter widget
//! - [`sinks`]: Printing or copying the result
//!
//! # Examples
//!
//! The CLI binary (`tcut`) is meant to be wrapped by a shell function that
//! evaluates what it prints:
//!
//! ```bash
//! # Browse the tree
//! tcut
//!
//! # One flat list of commands tagged with something containing `git`
//! tcut -t git
//!
//! # Add a file and a URL to the merged content
//! tcut extra.yml https://example.com/cuts.yml
//!
//! # Copy the chosen command instead of printing it
//! tcut -c
//! ```

pub mod cli_args;
pub mod command_selection;
pub mod sinks;
pub mod sources;
