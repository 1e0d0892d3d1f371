//! String helpers shared by the tree builder, the flattener and the navigator.
//!
//! Element text in a content document has the shape
//! `content ^ free description with @tags`. Groups tagged [`TEMPLATE_TAG`]
//! are templates: their content holds [`PLACEHOLDER`] tokens that are filled
//! from the comma separated fields of the chosen child.

/// Tag marking a group whose content is a command template.
pub const TEMPLATE_TAG: &str = "comm";
/// Placeholder token inside a template group's content.
pub const PLACEHOLDER: &str = "<>";
/// Separates an element's content from its description.
pub const DESCRIPTION_DELIMITER: char = '^';
/// Prefix of a tag token inside a description.
pub const TAG_PREFIX: char = '@';
/// Elements whose content starts with this marker are never admitted.
pub const DUMMY_MARKER: &str = "(dummy)";
/// Appended to labels cut by [`truncate_label`].
pub const TRUNCATION_SUFFIX: &str = "..";

/// Fills each [`PLACEHOLDER`] of `template`, in order, with the trimmed
/// comma separated fields of `choices`.
///
/// Extra fields are ignored and missing fields leave placeholders untouched.
///
/// # Examples
///
/// ```
/// use treecuts_core::template::render_template;
///
/// let rendered = render_template("deploy <> to <>", "staging, us-east");
/// assert_eq!(rendered, "deploy staging to us-east");
/// ```
#[must_use]
pub fn render_template(template: &str, choices: &str) -> String {
    choices
        .split(',')
        .fold(template.to_string(), |rendered, choice| {
            rendered.replacen(PLACEHOLDER, choice.trim(), 1)
        })
}

/// Cuts `label` down to `max_chars` characters, marking the cut with
/// [`TRUNCATION_SUFFIX`]. A zero length yields an empty label.
#[must_use]
pub fn truncate_label(label: &str, max_chars: usize) -> String {
    if max_chars == 0 {
        return String::new();
    }

    if label.chars().count() <= max_chars {
        return label.to_string();
    }

    let mut truncated: String = label.chars().take(max_chars).collect();
    truncated.push_str(TRUNCATION_SUFFIX);
    truncated
}

/// Splits raw element text into trimmed `(content, description)`.
///
/// Only the text between the first and the second delimiter is kept as
/// description.
#[must_use]
pub fn split_content(raw: &str) -> (String, String) {
    let mut parts = raw.split(DESCRIPTION_DELIMITER);
    let content = parts.next().unwrap_or_default().trim().to_string();
    let description = parts.next().unwrap_or_default().trim().to_string();
    (content, description)
}

/// Extracts `@tag` tokens from a description, without the leading `@`.
///
/// A tag starts at the first `@` of a whitespace delimited token and runs to
/// the end of that token; a bare `@` is not a tag.
#[must_use]
pub fn extract_tags(description: &str) -> Vec<String> {
    description
        .split_whitespace()
        .filter_map(|token| {
            let (_, tag) = token.split_once(TAG_PREFIX)?;
            (!tag.is_empty()).then(|| tag.to_string())
        })
        .collect()
}

/// Whether `tags` mark a template group.
#[must_use]
pub fn has_template_tag(tags: &[String]) -> bool {
    tags.iter().any(|tag| tag == TEMPLATE_TAG)
}
