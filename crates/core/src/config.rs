//! Configuration paths and settings for treecuts.
//!
//! This module resolves where content, history and settings live and defines
//! the [`Settings`] stored in the settings file. Shell expansions like `~` are
//! resolved in paths.

use serde::{Deserialize, Serialize};

use crate::builder::DEFAULT_LABEL_MAX_SIZE;
use crate::history::DEFAULT_HISTORY_SIZE;

/// Default directory holding user content, history and settings
const DEFAULT_DATA_DIR: &str = "~/.treecuts";

/// Directory, relative to the working directory, holding local content
pub const LOCAL_DATA_DIR: &str = ".treecuts";
/// Content file name inside a data directory
pub const CONTENT_FILE: &str = "content.yml";
/// History file name inside the user data directory
pub const HISTORY_FILE: &str = "history.yml";
/// Settings file name inside the user data directory
pub const SETTINGS_FILE: &str = "settings.yml";

/// Extra list rows granted in flat mode
pub const FLAT_EXTRA_HEIGHT: u16 = 4;

/// Resolves the data directory.
///
/// If a custom directory is provided, uses that directory. Otherwise, uses
/// the default `~/.treecuts`. Shell expansions like `~` are resolved.
///
/// # Examples
///
/// ```
/// use treecuts_core::config::get_data_dir;
///
/// // Use default directory
/// let default_dir = get_data_dir(&None);
///
/// // Use custom directory
/// let custom_dir = get_data_dir(&Some("/path/to/data".to_string()));
/// ```
#[must_use]
pub fn get_data_dir(data_dir_arg: &Option<String>) -> String {
    let data_dir = match data_dir_arg {
        Some(data_dir) => data_dir,
        None => DEFAULT_DATA_DIR,
    };

    shellexpand::tilde(data_dir).to_string()
}

#[must_use]
pub fn content_path(data_dir: &str) -> String {
    format!("{data_dir}/{CONTENT_FILE}")
}

#[must_use]
pub fn history_path(data_dir: &str) -> String {
    format!("{data_dir}/{HISTORY_FILE}")
}

#[must_use]
pub fn settings_path(data_dir: &str) -> String {
    format!("{data_dir}/{SETTINGS_FILE}")
}

#[must_use]
pub fn local_content_path() -> String {
    content_path(LOCAL_DATA_DIR)
}

/// User settings, read from the `settings` key of the settings file.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Rows of the candidate list
    pub height: u16,
    /// Number of remembered commands
    pub history_size: usize,
    /// Length of child labels shown in hints
    pub footer_key_max_size: usize,
    pub log_level: String,
    pub indicator_color: String,
    pub match_color: String,
    pub header_color: String,
    pub prompt_color: String,
    /// Fuzzy matching; exact substring matching otherwise
    pub fuzzy: bool,
    /// Reject typed text that matches nothing
    pub strict: bool,
    /// Maximum number of items selectable at once
    pub select_limit: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            height: 11,
            history_size: DEFAULT_HISTORY_SIZE,
            footer_key_max_size: DEFAULT_LABEL_MAX_SIZE,
            log_level: "info".to_string(),
            indicator_color: "80".to_string(),
            match_color: "201".to_string(),
            header_color: "33".to_string(),
            prompt_color: "23".to_string(),
            fuzzy: true,
            strict: true,
            select_limit: 1,
        }
    }
}

impl Settings {
    /// List height, grown in flat mode where everything is in one list.
    #[must_use]
    pub fn list_height(&self, flat: bool) -> u16 {
        if flat {
            self.height.saturating_add(FLAT_EXTRA_HEIGHT)
        } else {
            self.height
        }
    }
}

/// Layout of the settings file.
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct SettingsDocument {
    #[serde(default)]
    pub settings: Settings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_data_dir_with_custom_path() {
        let custom_path = Some("/custom/path".to_string());
        let result = get_data_dir(&custom_path);
        assert_eq!(result, "/custom/path");
    }

    #[test]
    fn test_get_data_dir_with_none() {
        let result = get_data_dir(&None);
        // Should expand the tilde in the default path
        assert!(result.ends_with(".treecuts"));
        assert!(!result.starts_with('~'));
    }

    #[test]
    fn test_get_data_dir_with_tilde() {
        let tilde_path = Some("~/my-cuts".to_string());
        let result = get_data_dir(&tilde_path);
        assert!(!result.starts_with('~'));
        assert!(result.ends_with("my-cuts"));
    }

    #[test]
    fn test_file_paths() {
        assert_eq!(content_path("/d"), "/d/content.yml");
        assert_eq!(history_path("/d"), "/d/history.yml");
        assert_eq!(settings_path("/d"), "/d/settings.yml");
        assert_eq!(local_content_path(), ".treecuts/content.yml");
    }

    #[test]
    fn test_partial_settings_use_defaults() {
        let document: SettingsDocument =
            serde_yaml::from_str("settings:\n  height: 20\n  fuzzy: false\n").unwrap();
        let settings = document.settings;

        assert_eq!(settings.height, 20);
        assert!(!settings.fuzzy);
        assert_eq!(settings.history_size, DEFAULT_HISTORY_SIZE);
        assert_eq!(settings.match_color, "201");
    }

    #[test]
    fn test_list_height() {
        let settings = Settings::default();
        assert_eq!(settings.list_height(false), 11);
        assert_eq!(settings.list_height(true), 15);
    }
}
