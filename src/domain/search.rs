//! Case-insensitive substring search over a glossary forest.

use crate::domain::entities::{Children, GlossaryTermNode};

/// Filter the forest to nodes matching `query`, keeping their ancestors.
///
/// A node whose `name` or `display_name` contains the query (ignoring case)
/// is kept whole. Otherwise it is kept only if some descendant matches, with
/// its children pruned to the matching branches. An empty query keeps
/// everything.
pub fn search_tree(forest: &[GlossaryTermNode], query: &str) -> Vec<GlossaryTermNode> {
    let needle = query.to_lowercase();
    filter_nodes(forest, &needle)
}

fn filter_nodes(nodes: &[GlossaryTermNode], needle: &str) -> Vec<GlossaryTermNode> {
    nodes
        .iter()
        .filter_map(|node| filter_node(node, needle))
        .collect()
}

fn filter_node(node: &GlossaryTermNode, needle: &str) -> Option<GlossaryTermNode> {
    if matches(node, needle) {
        return Some(node.clone());
    }
    if node.children.is_empty() {
        return None;
    }
    let children = filter_nodes(node.children.as_slice(), needle);
    if children.is_empty() {
        None
    } else {
        Some(node.with_children(Children::Loaded(children)))
    }
}

fn matches(node: &GlossaryTermNode, needle: &str) -> bool {
    node.name.to_lowercase().contains(needle)
        || node
            .display_name
            .as_ref()
            .is_some_and(|d| d.to_lowercase().contains(needle))
}
