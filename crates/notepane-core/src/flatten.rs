/// Tree flattener -- turns the scanned tree plus the expansion map into the
/// ordered row list the tree widget renders.
use crate::model::Node;
use std::collections::HashMap;

/// Per-path expanded flag. Paths absent from the map are collapsed.
pub type ExpansionState = HashMap<String, bool>;

/// Pre-order list of the visible nodes below `root`.
///
/// The root itself is never emitted and its children are always shown.
/// Below that, a directory's children appear only while its path maps to
/// `true` in `expanded`.
pub fn flatten<'a>(root: &'a Node, expanded: &ExpansionState) -> Vec<&'a Node> {
    let mut rows = Vec::new();
    for child in &root.children {
        push_visible(child, expanded, &mut rows);
    }
    rows
}

fn push_visible<'a>(node: &'a Node, expanded: &ExpansionState, rows: &mut Vec<&'a Node>) {
    rows.push(node);
    if node.is_dir && is_expanded(expanded, &node.path) {
        for child in &node.children {
            push_visible(child, expanded, rows);
        }
    }
}

/// Whether `path` is marked expanded.
pub fn is_expanded(expanded: &ExpansionState, path: &str) -> bool {
    expanded.get(path).copied().unwrap_or(false)
}
