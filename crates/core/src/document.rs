//! The raw, already parsed shape of a content document.
//!
//! Documents are decoded once into [`RawValue`] so the tree builder can match
//! on the shape of each value instead of inspecting YAML types on the fly.
//! Mapping entries keep their source order.

use indexmap::IndexMap;
use serde_yaml::Value;

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum RawValue {
    #[default]
    Null,
    Scalar(String),
    Sequence(Vec<RawValue>),
    Mapping(IndexMap<String, RawValue>),
}

impl RawValue {
    /// Parses a YAML document. An empty document yields [`RawValue::Null`].
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid YAML.
    pub fn from_yaml_str(source_description: &str, text: &str) -> Result<Self> {
        let value: Value = serde_yaml::from_str(text).map_err(|e| {
            Error::yaml_error(
                "parsing".to_string(),
                "content".to_string(),
                source_description.to_string(),
                e,
            )
        })?;

        Ok(Self::from(value))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            RawValue::Null => true,
            RawValue::Scalar(_) => false,
            RawValue::Sequence(items) => items.is_empty(),
            RawValue::Mapping(entries) => entries.is_empty(),
        }
    }

    /// Merges `other` into `self`.
    ///
    /// Top-level mapping entries of `other` replace entries with the same key;
    /// anything merged into a non-mapping replaces it.
    pub fn merge(&mut self, other: RawValue) {
        match (self, other) {
            (RawValue::Mapping(entries), RawValue::Mapping(other_entries)) => {
                for (key, value) in other_entries {
                    entries.insert(key, value);
                }
            }
            (_, RawValue::Null) => {}
            (this, other) => *this = other,
        }
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some("null".to_string()),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

impl From<Value> for RawValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => RawValue::Null,
            Value::Bool(b) => RawValue::Scalar(b.to_string()),
            Value::Number(n) => RawValue::Scalar(n.to_string()),
            Value::String(s) => RawValue::Scalar(s),
            Value::Sequence(items) => {
                RawValue::Sequence(items.into_iter().map(RawValue::from).collect())
            }
            Value::Mapping(mapping) => RawValue::Mapping(
                mapping
                    .into_iter()
                    .filter_map(|(key, value)| {
                        let key = scalar_to_string(&key)?;
                        Some((key, RawValue::from(value)))
                    })
                    .collect(),
            ),
            Value::Tagged(tagged) => RawValue::from(tagged.value),
        }
    }
}
