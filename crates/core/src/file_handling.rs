//! File handling for treecuts content, history and settings.
//!
//! This module reads content documents, reads and writes the history store,
//! loads settings and seeds first-run files.

use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::{Settings, SettingsDocument};
use crate::document::RawValue;
use crate::error::{Error, Result};

/// Command stored in a freshly seeded history.
pub const SEED_HISTORY_COMMAND: &str = "pwd";

/// Sample group offered until the user adds content.
const SAMPLE_CONTENT: &str = "group10:
  - ls -la
  - echo hi
  - (dummy) add your own groups and commands to this file
";

#[derive(Deserialize, Serialize, Debug, Default)]
struct HistoryDocument {
    #[serde(default)]
    history: Vec<String>,
}

fn get_reader(file_description: &str, path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        Error::io_error(
            file_description.to_string(),
            path.display().to_string(),
            e,
        )
    })
}

fn yaml_error(action: &str, file_description: &str, path: &Path, e: serde_yaml::Error) -> Error {
    Error::yaml_error(
        action.to_string(),
        file_description.to_string(),
        path.display().to_string(),
        e,
    )
}

/// Sample content, with its top-level group name prefixed by `prefix`.
#[must_use]
pub fn sample_content(prefix: &str) -> String {
    format!("{prefix}{SAMPLE_CONTENT}")
}

/// Document used when no source provided any content.
///
/// # Errors
///
/// Never fails in practice; the sample content is valid YAML.
pub fn placeholder_document() -> Result<RawValue> {
    RawValue::from_yaml_str("placeholder", &sample_content(""))
}

/// Reads a content document from disk.
///
/// Returns `None` if the file doesn't exist.
///
/// # Errors
///
/// Returns an error if:
/// - The file exists but cannot be read
/// - The file contains invalid YAML
pub fn read_document(file_description: &str, path: &Path) -> Result<Option<RawValue>> {
    if !path.exists() {
        debug!("No {file_description} file at `{}`", path.display());
        return Ok(None);
    }

    let mut text = String::new();
    get_reader(file_description, path)?
        .read_to_string(&mut text)
        .map_err(|e| Error::io_error(file_description.to_string(), path.display().to_string(), e))?;

    RawValue::from_yaml_str(&path.display().to_string(), &text).map(Some)
}

/// Reads the history entries, most recent first.
///
/// A missing file is an empty history.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a history document.
pub fn read_history(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let reader = get_reader("history", path)?;
    let document: HistoryDocument =
        serde_yaml::from_reader(reader).map_err(|e| yaml_error("reading", "history", path, e))?;

    Ok(document.history)
}

/// Writes the history entries, replacing the previous file.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be created or written to
/// - Serialization to YAML fails
pub fn write_history(path: &Path, entries: &[String]) -> Result<()> {
    let f = File::create(path)
        .map_err(|e| Error::io_error("history".to_string(), path.display().to_string(), e))?;

    let document = HistoryDocument {
        history: entries.to_vec(),
    };

    serde_yaml::to_writer(f, &document).map_err(|e| yaml_error("writing", "history", path, e))
}

/// Creates the history file holding a single harmless command, unless it
/// already exists.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn ensure_history_file(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }

    debug!("History does not exist, creating `{}`", path.display());
    ensure_parent_dir("history", path)?;
    write_history(path, &[SEED_HISTORY_COMMAND.to_string()])
}

/// Creates a content file with the sample group, unless it already exists.
///
/// Returns whether a file was created.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be created.
pub fn ensure_content_file(path: &Path, group_prefix: &str) -> Result<bool> {
    if path.exists() {
        debug!("Content file `{}` already exists", path.display());
        return Ok(false);
    }

    ensure_parent_dir("content", path)?;
    fs::write(path, sample_content(group_prefix))
        .map_err(|e| Error::io_error("content".to_string(), path.display().to_string(), e))?;

    debug!("Created content file `{}`", path.display());
    Ok(true)
}

/// Loads settings, writing the defaults first if the file doesn't exist.
///
/// # Errors
///
/// Returns an error if the file cannot be read, written or parsed.
pub fn load_or_create_settings(path: &Path) -> Result<Settings> {
    if !path.exists() {
        debug!("Settings file does not exist, creating `{}`", path.display());
        ensure_parent_dir("settings", path)?;

        let f = File::create(path)
            .map_err(|e| Error::io_error("settings".to_string(), path.display().to_string(), e))?;
        serde_yaml::to_writer(f, &SettingsDocument::default())
            .map_err(|e| yaml_error("writing", "settings", path, e))?;
    }

    let reader = get_reader("settings", path)?;
    let document: Option<SettingsDocument> =
        serde_yaml::from_reader(reader).map_err(|e| yaml_error("reading", "settings", path, e))?;

    Ok(document.unwrap_or_default().settings)
}

fn ensure_parent_dir(file_description: &str, path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)
            .map_err(|e| Error::io_error(file_description.to_string(), parent.display().to_string(), e)),
        _ => Ok(()),
    }
}
