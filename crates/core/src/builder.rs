//! Builds the command [`Tree`] from a merged content document.
//!
//! Mapping keys become groups, sequence items become commands. Every element
//! has its `^ description` and `@tags` parsed, inherits its parent's tags
//! (except the template tag) and is checked against the admission
//! [`Criteria`] before being attached.

use indexmap::IndexMap;
use log::{debug, warn};

use crate::criteria::Criteria;
use crate::document::RawValue;
use crate::element::{Element, ElementId, Tree};
use crate::error::{Error, Result};
use crate::flatten::flatten;
use crate::history::HISTORY_KEY;
use crate::template::{extract_tags, split_content, TEMPLATE_TAG};

/// Default length of child labels.
pub const DEFAULT_LABEL_MAX_SIZE: usize = 16;

#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub criteria: Criteria,
    /// Project every command into a single list under the root.
    pub flat: bool,
    pub label_max_size: usize,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            criteria: Criteria::default(),
            flat: false,
            label_max_size: DEFAULT_LABEL_MAX_SIZE,
        }
    }
}

pub struct TreeBuilder {
    options: BuildOptions,
}

impl TreeBuilder {
    #[must_use]
    pub fn new(options: BuildOptions) -> Self {
        Self { options }
    }

    /// Builds the tree for `document`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyContent`] if the document is not a non-empty
    /// mapping, and [`Error::NoMatchingContent`] if flat mode leaves the root
    /// without children.
    pub fn build(&self, document: &RawValue) -> Result<Tree> {
        let RawValue::Mapping(entries) = document else {
            return Err(Error::EmptyContent);
        };

        if entries.is_empty() {
            return Err(Error::EmptyContent);
        }

        let mut tree = Tree::new(self.options.label_max_size);
        let root = tree.root();
        self.add_mapping(&mut tree, entries, root, false);

        if let Some(history) = tree.get(root).child(HISTORY_KEY) {
            tree.set_history(history);
        }

        if self.options.flat {
            debug!("Flattening tree");
            flatten(&mut tree, &self.options.criteria);

            if !tree.get(root).has_children() {
                return Err(Error::NoMatchingContent);
            }
        }

        Ok(tree)
    }

    fn add_mapping(
        &self,
        tree: &mut Tree,
        entries: &IndexMap<String, RawValue>,
        parent: ElementId,
        in_history: bool,
    ) {
        for (key, value) in entries {
            let in_history = in_history || (parent == tree.root() && is_history_key(key));

            match value {
                RawValue::Mapping(children) => {
                    if let Some(group) = self.add_element(tree, key, false, parent, in_history) {
                        self.add_mapping(tree, children, group, in_history);
                    }
                }
                RawValue::Sequence(items) => {
                    if let Some(group) = self.add_element(tree, key, false, parent, in_history) {
                        self.add_sequence(tree, items, group, in_history);
                    }
                }
                RawValue::Scalar(_) | RawValue::Null => {
                    debug!("Skipping `{key}`: neither a group nor a command list");
                }
            }
        }
    }

    fn add_sequence(&self, tree: &mut Tree, items: &[RawValue], parent: ElementId, in_history: bool) {
        for item in items {
            match item {
                RawValue::Scalar(raw) => {
                    self.add_element(tree, raw, true, parent, in_history);
                }
                other => warn!(
                    "Skipping non-scalar command under `{}`: {other:?}",
                    tree.get(parent).content
                ),
            }
        }
    }

    /// Parses `raw`, inherits tags from `parent` and attaches the element if
    /// it is admitted.
    fn add_element(
        &self,
        tree: &mut Tree,
        raw: &str,
        is_command: bool,
        parent: ElementId,
        in_history: bool,
    ) -> Option<ElementId> {
        let (content, description) = split_content(raw);

        let mut element = Element::new(&content, is_command);
        element.tags = extract_tags(&description);
        element.description = description;
        element.tags.extend(
            tree.get(parent)
                .tags
                .iter()
                .filter(|tag| *tag != TEMPLATE_TAG)
                .cloned(),
        );

        if !in_history && !self.options.criteria.admits(&element) {
            debug!("Not admitted: {element}");
            return None;
        }

        let id = tree.insert(element);
        tree.attach(parent, id);
        Some(id)
    }
}

fn is_history_key(key: &str) -> bool {
    split_content(key).0 == HISTORY_KEY
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::FilterMode;

    fn document(yaml: &str) -> RawValue {
        RawValue::from_yaml_str("test", yaml).unwrap()
    }

    fn contents(tree: &Tree, id: ElementId) -> Vec<String> {
        tree.get(id)
            .children()
            .iter()
            .map(|&child| tree.get(child).content.clone())
            .collect()
    }

    #[test]
    fn test_groups_and_commands() {
        let tree = TreeBuilder::new(BuildOptions::default())
            .build(&document("group10:\n  - ls -la\n  - echo hi\n"))
            .unwrap();

        let root = tree.root();
        assert_eq!(contents(&tree, root), vec!["group10"]);

        let group = tree.get(root).child("group10").unwrap();
        assert!(!tree.get(group).is_command);
        assert_eq!(contents(&tree, group), vec!["ls -la", "echo hi"]);
        assert!(tree.get(tree.get(group).children()[0]).is_command);
    }

    #[test]
    fn test_nested_groups_keep_document_order() {
        let tree = TreeBuilder::new(BuildOptions::default())
            .build(&document(
                "zeta:\n  inner b: [b]\n  inner a: [a]\nalpha: [x]\n",
            ))
            .unwrap();

        let root = tree.root();
        assert_eq!(contents(&tree, root), vec!["zeta", "alpha"]);
        let zeta = tree.get(root).child("zeta").unwrap();
        assert_eq!(contents(&tree, zeta), vec!["inner b", "inner a"]);
    }

    #[test]
    fn test_description_and_tags_are_parsed_and_inherited() {
        let tree = TreeBuilder::new(BuildOptions::default())
            .build(&document(
                "ops ^ operations @infra:\n  k8s ^ @kube @comm:\n    - get pods ^ list @read\n",
            ))
            .unwrap();

        let ops = tree.get(tree.root()).child("ops").unwrap();
        assert_eq!(tree.get(ops).description, "operations @infra");
        assert_eq!(tree.get(ops).tags, vec!["infra"]);

        let k8s = tree.get(ops).child("k8s").unwrap();
        assert_eq!(tree.get(k8s).tags, vec!["kube", "comm", "infra"]);

        let pods = tree.get(k8s).child("get pods").unwrap();
        assert_eq!(tree.get(pods).description, "list @read");
        assert_eq!(tree.get(pods).tags, vec!["read", "kube", "infra"]);
    }

    #[test]
    fn test_scalar_values_are_skipped() {
        let tree = TreeBuilder::new(BuildOptions::default())
            .build(&document("note: just text\nempty:\ngroup: [a]\n"))
            .unwrap();
        assert_eq!(contents(&tree, tree.root()), vec!["group"]);
    }

    #[test]
    fn test_dummy_elements_are_dropped() {
        let tree = TreeBuilder::new(BuildOptions::default())
            .build(&document(
                "group:\n  - (dummy) edit me\n  - ls\n(dummy) group: [x]\n",
            ))
            .unwrap();
        let group = tree.get(tree.root()).child("group").unwrap();
        assert_eq!(contents(&tree, tree.root()), vec!["group"]);
        assert_eq!(contents(&tree, group), vec!["ls"]);
    }

    #[test]
    fn test_tag_filter_drops_commands_but_not_history() {
        let options = BuildOptions {
            criteria: Criteria::new(FilterMode::Tags, vec!["git".to_string()]),
            flat: false,
            label_max_size: 16,
        };
        let tree = TreeBuilder::new(options)
            .build(&document(
                "vcs ^ @git:\n  - git status\nfs:\n  - ls ^ @files\nhistory:\n  - pwd\n",
            ))
            .unwrap();

        let root = tree.get(tree.root());
        let vcs = root.child("vcs").unwrap();
        let fs = root.child("fs").unwrap();
        assert_eq!(contents(&tree, vcs), vec!["git status"]);
        assert!(contents(&tree, fs).is_empty());

        let history = tree.history().unwrap();
        assert_eq!(contents(&tree, history), vec!["pwd"]);
    }

    #[test]
    fn test_empty_document_is_an_error() {
        let builder = TreeBuilder::new(BuildOptions::default());
        assert!(matches!(builder.build(&RawValue::Null), Err(Error::EmptyContent)));
        assert!(matches!(
            builder.build(&document("- just\n- a list\n")),
            Err(Error::EmptyContent)
        ));
    }

    #[test]
    fn test_flat_mode_without_matches_is_an_error() {
        let options = BuildOptions {
            criteria: Criteria::new(FilterMode::Tags, vec!["nothing".to_string()]),
            flat: true,
            label_max_size: 16,
        };
        let result = TreeBuilder::new(options).build(&document("group: [ls ^ @fs]\n"));
        assert!(matches!(result, Err(Error::NoMatchingContent)));
    }

    #[test]
    fn test_child_keys_are_truncated() {
        let options = BuildOptions {
            label_max_size: 5,
            ..BuildOptions::default()
        };
        let tree = TreeBuilder::new(options)
            .build(&document("group: [kubectl get pods, ls]\n"))
            .unwrap();
        let group = tree.get(tree.root()).child("group").unwrap();
        assert_eq!(tree.get(group).child_keys, vec!["kubec..", "ls"]);
    }
}
