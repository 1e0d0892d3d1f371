//! Projects the hierarchical tree into a single list of commands.

use log::debug;

use crate::criteria::Criteria;
use crate::element::{ElementId, Tree};

/// Replaces the root's children with every command of the tree, in
/// pre-order.
///
/// The history subtree is skipped. Commands under a template group are
/// rendered with the group's template before being moved, so a flattened
/// command is always final. Each command is checked against `criteria`
/// again on the way in.
pub fn flatten(tree: &mut Tree, criteria: &Criteria) {
    let root = tree.root();
    let mut commands: Vec<ElementId> = Vec::new();
    let mut stack: Vec<ElementId> = tree.get(root).children().iter().rev().copied().collect();

    while let Some(id) = stack.pop() {
        if Some(id) == tree.history() {
            continue;
        }

        let element = tree.get(id);
        if element.is_command {
            let rendered = tree.rendered_content(id);
            let element = tree.get_mut(id);
            element.content = rendered;

            if criteria.admits(element) {
                commands.push(id);
            } else {
                debug!("Not admitted after flattening: {element}");
            }
        }

        stack.extend(tree.get(id).children().iter().rev().copied());
    }

    tree.replace_children(root, commands);
}
