//! The command tree.
//!
//! Elements live in an arena owned by [`Tree`] and refer to each other by
//! [`ElementId`]. A parent owns its children through `children_sorted`; the
//! `parent` field of a child is a plain back index used for navigation.

use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use crate::template::{has_template_tag, render_template, truncate_label};

/// Content of the single root element.
pub const ROOT_CONTENT: &str = "root";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(usize);

/// A group or a command.
#[derive(Debug, Clone)]
pub struct Element {
    pub content: String,
    pub is_command: bool,
    pub description: String,
    pub tags: Vec<String>,
    /// Truncated labels of the children, parallel to `children_sorted`.
    pub child_keys: Vec<String>,
    children: HashMap<String, ElementId>,
    children_sorted: Vec<ElementId>,
    parent: Option<ElementId>,
}

impl Element {
    #[must_use]
    pub fn new(content: &str, is_command: bool) -> Self {
        Self {
            content: content.to_string(),
            is_command,
            description: String::new(),
            tags: Vec::new(),
            child_keys: Vec::new(),
            children: HashMap::new(),
            children_sorted: Vec::new(),
            parent: None,
        }
    }

    #[must_use]
    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    /// Children in display order.
    #[must_use]
    pub fn children(&self) -> &[ElementId] {
        &self.children_sorted
    }

    #[must_use]
    pub fn child(&self, content: &str) -> Option<ElementId> {
        self.children.get(content).copied()
    }

    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.children_sorted.is_empty()
    }

    #[must_use]
    pub fn is_template(&self) -> bool {
        has_template_tag(&self.tags)
    }
}

impl Display for Element {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        let kind = if self.is_command { "command" } else { "group" };
        write!(formatter, "{kind} `{}`", self.content)?;

        if !self.description.is_empty() {
            write!(formatter, " ({})", self.description)?;
        }

        if !self.tags.is_empty() {
            write!(formatter, " [{}]", self.tags.join(", "))?;
        }

        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Tree {
    elements: Vec<Element>,
    root: ElementId,
    history: Option<ElementId>,
    label_max_size: usize,
}

impl Tree {
    /// Creates a tree holding only the root group.
    #[must_use]
    pub fn new(label_max_size: usize) -> Self {
        Self {
            elements: vec![Element::new(ROOT_CONTENT, false)],
            root: ElementId(0),
            history: None,
            label_max_size,
        }
    }

    #[must_use]
    pub fn root(&self) -> ElementId {
        self.root
    }

    #[must_use]
    pub fn history(&self) -> Option<ElementId> {
        self.history
    }

    pub(crate) fn set_history(&mut self, id: ElementId) {
        self.history = Some(id);
    }

    #[must_use]
    pub fn get(&self, id: ElementId) -> &Element {
        &self.elements[id.0]
    }

    pub fn get_mut(&mut self, id: ElementId) -> &mut Element {
        &mut self.elements[id.0]
    }

    #[must_use]
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.get(id).parent
    }

    /// Adds `element` to the arena without linking it to any parent.
    pub fn insert(&mut self, element: Element) -> ElementId {
        self.elements.push(element);
        ElementId(self.elements.len() - 1)
    }

    /// Links `child` as the last child of `parent`.
    pub fn attach(&mut self, parent: ElementId, child: ElementId) {
        let label = truncate_label(&self.get(child).content, self.label_max_size);
        let content = self.get(child).content.clone();

        self.get_mut(child).parent = Some(parent);

        let parent = self.get_mut(parent);
        parent.children.insert(content, child);
        parent.children_sorted.push(child);
        parent.child_keys.push(label);
    }

    /// Replaces the children of `parent` with `children`, in order.
    ///
    /// Lookup, labels and back indices are rebuilt; on duplicate content the
    /// later child wins the lookup while both stay in the ordered list.
    pub fn replace_children(&mut self, parent: ElementId, children: Vec<ElementId>) {
        {
            let element = self.get_mut(parent);
            element.children.clear();
            element.children_sorted.clear();
            element.child_keys.clear();
        }

        for child in children {
            self.attach(parent, child);
        }
    }

    /// Drops groups without children from the children of `parent` and
    /// returns the remaining children.
    pub fn prune_empty_groups(&mut self, parent: ElementId) -> Vec<ElementId> {
        let kept: Vec<ElementId> = self
            .get(parent)
            .children()
            .iter()
            .copied()
            .filter(|&child| {
                let child = self.get(child);
                child.is_command || child.has_children()
            })
            .collect();

        if kept.len() != self.get(parent).children().len() {
            self.replace_children(parent, kept.clone());
        }

        kept
    }

    /// Content of `id` with its parent's template applied when the parent is
    /// a template group.
    #[must_use]
    pub fn rendered_content(&self, id: ElementId) -> String {
        let element = self.get(id);

        match element.parent.map(|parent| self.get(parent)) {
            Some(parent) if parent.is_template() => {
                render_template(&parent.content, &element.content)
            }
            _ => element.content.clone(),
        }
    }

    /// Child labels of `id` in the form `| a | b |`.
    #[must_use]
    pub fn child_keys_label(&self, id: ElementId) -> String {
        format!("| {} |", self.get(id).child_keys.join(" | "))
    }

    /// Every element reachable from the root, in pre-order.
    #[must_use]
    pub fn descendants(&self, from: ElementId) -> Vec<ElementId> {
        let mut visited = Vec::new();
        let mut stack = vec![from];

        while let Some(id) = stack.pop() {
            visited.push(id);
            stack.extend(self.get(id).children().iter().rev().copied());
        }

        visited
    }
}
