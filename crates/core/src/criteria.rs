//! Admission rules deciding which elements make it into the tree.

use crate::element::Element;
use crate::template::DUMMY_MARKER;

/// How the configured filter strings are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// No filtering; extra paths are read as content files.
    #[default]
    None,
    /// Extra paths are content files or URLs.
    Files,
    /// Commands must carry a tag containing a filter string.
    Tags,
    /// Commands must mention a filter string in content, description or tags.
    Anything,
}

#[derive(Debug, Clone, Default)]
pub struct Criteria {
    pub mode: FilterMode,
    pub filter_strings: Vec<String>,
}

impl Criteria {
    #[must_use]
    pub fn new(mode: FilterMode, filter_strings: Vec<String>) -> Self {
        Self {
            mode,
            filter_strings,
        }
    }

    /// Pre-criteria applied when an element is attached to the tree.
    #[must_use]
    pub fn admits(&self, element: &Element) -> bool {
        if element.content.starts_with(DUMMY_MARKER) {
            return false;
        }

        if !element.is_command {
            return true;
        }

        match self.mode {
            FilterMode::None | FilterMode::Files => true,
            FilterMode::Tags => self.any_contained_in(&element.tags),
            FilterMode::Anything => {
                self.any_contained_in(&element.tags)
                    || self.any_contained_in(&[&element.content, &element.description])
            }
        }
    }

    fn any_contained_in<S: AsRef<str>>(&self, haystacks: &[S]) -> bool {
        self.filter_strings.iter().any(|needle| {
            haystacks
                .iter()
                .any(|haystack| haystack.as_ref().contains(needle.as_str()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(content: &str, description: &str, tags: &[&str]) -> Element {
        let mut element = Element::new(content, true);
        element.description = description.to_string();
        element.tags = tags.iter().map(ToString::to_string).collect();
        element
    }

    #[test]
    fn test_no_filter_admits_everything_but_dummies() {
        let criteria = Criteria::default();
        assert!(criteria.admits(&command("ls", "", &[])));
        assert!(!criteria.admits(&command("(dummy) placeholder", "", &[])));
        assert!(!criteria.admits(&Element::new("(dummy) group", false)));
    }

    #[test]
    fn test_tag_filter_matches_substrings() {
        let criteria = Criteria::new(FilterMode::Tags, vec!["ops".to_string()]);
        assert!(criteria.admits(&command("kubectl", "", &["devops"])));
        assert!(!criteria.admits(&command("kubectl ops", "ops", &["k8s"])));
        assert!(!criteria.admits(&command("kubectl", "", &[])));
    }

    #[test]
    fn test_tag_filter_is_case_sensitive() {
        let criteria = Criteria::new(FilterMode::Tags, vec!["Ops".to_string()]);
        assert!(!criteria.admits(&command("kubectl", "", &["ops"])));
    }

    #[test]
    fn test_groups_bypass_filters() {
        let criteria = Criteria::new(FilterMode::Tags, vec!["ops".to_string()]);
        assert!(criteria.admits(&Element::new("unrelated", false)));
    }

    #[test]
    fn test_anything_filter() {
        let criteria = Criteria::new(FilterMode::Anything, vec!["pod".to_string()]);
        assert!(criteria.admits(&command("kubectl get pods", "", &[])));
        assert!(criteria.admits(&command("k get po", "list pods", &[])));
        assert!(criteria.admits(&command("k", "", &["pods"])));
        assert!(!criteria.admits(&command("ls", "list files", &["fs"])));
    }

    #[test]
    fn test_filter_without_strings_rejects_commands() {
        let criteria = Criteria::new(FilterMode::Tags, Vec::new());
        assert!(!criteria.admits(&command("ls", "", &["fs"])));
    }
}
