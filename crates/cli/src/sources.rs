//! Loading and merging content documents from files and URLs.

use std::path::Path;
use std::time::Duration;

use log::{debug, warn};
use treecuts_core::config::{content_path, history_path, local_content_path};
use treecuts_core::document::RawValue;
use treecuts_core::error::{Error, Result};
use treecuts_core::file_handling::{
    ensure_content_file, ensure_history_file, placeholder_document, read_document,
};

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);
const USER_AGENT: &str = concat!("treecuts/", env!("CARGO_PKG_VERSION"));
/// Prefix of the sample group seeded into the user content file
const USER_GROUP_PREFIX: &str = "userhome ";

#[must_use]
pub fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Sources in merge order: user content, local content, history, extras.
#[must_use]
pub fn source_order(data_dir: &str, extras: &[String]) -> Vec<String> {
    [content_path(data_dir), local_content_path(), history_path(data_dir)]
        .into_iter()
        .chain(extras.iter().cloned())
        .collect()
}

/// Creates the user content and history files on first run.
///
/// Failures are logged; the session goes on with whatever can be read.
pub fn seed_user_files(data_dir: &str) {
    let content = content_path(data_dir);
    if let Err(e) = ensure_content_file(Path::new(&content), USER_GROUP_PREFIX) {
        warn!("Unable to create content file: {e}");
    }

    let history = history_path(data_dir);
    if let Err(e) = ensure_history_file(Path::new(&history)) {
        warn!("Unable to create history file: {e}");
    }
}

/// Downloads the body of `url`.
///
/// # Errors
///
/// Returns [`Error::Fetch`] if the request fails or the server does not
/// answer with a success status.
pub fn fetch_url(url: &str) -> Result<String> {
    let http = reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| Error::fetch_error(url, e))?;

    let response = http.get(url).send().map_err(|e| Error::fetch_error(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::fetch_error(url, format!("HTTP {status}")));
    }

    response.text().map_err(|e| Error::fetch_error(url, e))
}

/// Reads one source. Missing files are `None`.
///
/// # Errors
///
/// Returns an error if the source cannot be read, fetched or parsed.
pub fn read_source(source: &str) -> Result<Option<RawValue>> {
    if is_url(source) {
        debug!("Fetching `{source}`");
        let text = fetch_url(source)?;
        return RawValue::from_yaml_str(source, &text).map(Some);
    }

    let path = shellexpand::tilde(source).to_string();
    read_document("content", Path::new(&path))
}

/// Merges `sources` in order; later top-level keys replace earlier ones.
///
/// Sources that fail to load are logged and skipped. When nothing was
/// loaded, the placeholder document is returned.
///
/// # Errors
///
/// Returns an error only if the placeholder document cannot be built.
pub fn merge_sources(sources: &[String]) -> Result<RawValue> {
    let mut merged = RawValue::Null;

    for source in sources {
        match read_source(source) {
            Ok(Some(document @ RawValue::Mapping(_))) => {
                debug!("Merging `{source}`");
                merged.merge(document);
            }
            Ok(Some(RawValue::Null)) | Ok(None) => {}
            Ok(Some(_)) => warn!("Skipping `{source}`: top level is not a mapping"),
            Err(e) => warn!("Skipping `{source}`: {e}"),
        }
    }

    if merged.is_empty() {
        warn!("No content found, using placeholder content");
        return placeholder_document();
    }

    Ok(merged)
}
