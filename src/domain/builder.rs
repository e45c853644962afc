//! Tree builder for turning flat glossary records into a forest.

use std::collections::HashMap;

use tracing::{debug, instrument};

use crate::domain::entities::{Children, GlossaryTerm, GlossaryTermNode, GLOSSARY_TERM_TYPE};

/// Constructs glossary forests from flat record batches.
///
/// Parent links are resolved through an FQN index into the batch, so a
/// parent outside the batch leaves its child at root level.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    fqn_index: HashMap<String, usize>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a forest from records, preserving input order for roots and children.
    #[instrument(level = "trace", skip_all, fields(records = records.len()))]
    pub fn build(&mut self, records: &[GlossaryTerm]) -> Vec<GlossaryTermNode> {
        // Reset state for a fresh batch
        self.fqn_index.clear();

        let mut nodes: Vec<Option<GlossaryTermNode>> = Vec::with_capacity(records.len());
        for (idx, record) in records.iter().enumerate() {
            self.fqn_index
                .insert(record.fully_qualified_name.clone(), idx);
            nodes.push(Some(GlossaryTermNode::from_record(record)));
        }

        let mut child_lists: Vec<Vec<usize>> = vec![Vec::new(); records.len()];
        let mut roots = Vec::new();
        for (idx, record) in records.iter().enumerate() {
            match self.resolve_parent(record, records) {
                Some(parent_idx) => child_lists[parent_idx].push(idx),
                None => roots.push(idx),
            }
        }

        let forest: Vec<GlossaryTermNode> = roots
            .into_iter()
            .filter_map(|idx| Self::assemble(idx, &mut nodes, &child_lists))
            .collect();
        debug!(
            "build: {} records -> {} roots",
            records.len(),
            forest.len()
        );
        forest
    }

    /// Index of the parent that will adopt `record`, if any.
    ///
    /// Adoption requires the parent to be in the batch and to have announced children.
    fn resolve_parent(&self, record: &GlossaryTerm, records: &[GlossaryTerm]) -> Option<usize> {
        let parent_fqn = record.parent.as_ref()?.fully_qualified_name.as_deref()?;
        let parent_idx = *self.fqn_index.get(parent_fqn)?;
        records[parent_idx].has_children().then_some(parent_idx)
    }

    /// Move node `idx` out of `nodes` together with its adopted children.
    ///
    /// A node already taken is skipped, so cyclic parent chains terminate
    /// instead of recursing forever.
    fn assemble(
        idx: usize,
        nodes: &mut [Option<GlossaryTermNode>],
        child_lists: &[Vec<usize>],
    ) -> Option<GlossaryTermNode> {
        let mut node = nodes[idx].take()?;
        for &child_idx in &child_lists[idx] {
            if let Some(mut child) = Self::assemble(child_idx, nodes, child_lists) {
                child.entity_type = Some(GLOSSARY_TERM_TYPE.to_string());
                node.children.push(child);
            }
        }
        Some(node)
    }
}

/// Build a forest from a flat batch of records.
pub fn build_tree(records: &[GlossaryTerm]) -> Vec<GlossaryTermNode> {
    TreeBuilder::new().build(records)
}

/// Selection criteria for root-level terms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListTermsParams {
    /// Glossary context: select terms without a parent.
    pub glossary: Option<String>,
    /// Parent term id: select direct children of this term.
    pub parent: Option<String>,
}

impl ListTermsParams {
    pub fn for_glossary(glossary: impl Into<String>) -> Self {
        Self {
            glossary: Some(glossary.into()),
            parent: None,
        }
    }

    pub fn for_parent(parent: impl Into<String>) -> Self {
        Self {
            glossary: None,
            parent: Some(parent.into()),
        }
    }
}

/// Filter records down to one level of the hierarchy.
///
/// With a non-empty glossary context, terms without a parent are returned; otherwise
/// terms whose `parent.id` equals `params.parent`. Empty `children` lists are
/// stripped so that the result only marks terms that really have children.
pub fn root_level_terms(records: &[GlossaryTerm], params: &ListTermsParams) -> Vec<GlossaryTerm> {
    records
        .iter()
        .filter(|record| {
            if params.glossary.as_deref().is_some_and(|g| !g.is_empty()) {
                record.parent.is_none()
            } else {
                record.parent.as_ref().map(|p| p.id.as_str()) == params.parent.as_deref()
            }
        })
        .map(|record| {
            let mut term = record.clone();
            if term.children.as_ref().is_some_and(|c| c.is_empty()) {
                term.children = None;
            }
            term
        })
        .collect()
}

/// Replace the children of every node with `id == target_id`, in place.
///
/// Returns true if at least one node was updated. Descends only into loaded,
/// non-empty children.
pub fn replace_children(
    forest: &mut [GlossaryTermNode],
    new_children: &[GlossaryTermNode],
    target_id: &str,
) -> bool {
    let mut found = false;
    for node in forest.iter_mut() {
        if node.id == target_id {
            node.children = Children::Loaded(new_children.to_vec());
            found = true;
        } else if let Children::Loaded(children) = &mut node.children {
            if !children.is_empty() {
                found |= replace_children(children, new_children, target_id);
            }
        }
    }
    found
}

/// Forest with the children of `target_id` replaced by `new_children`.
///
/// An unknown id leaves the forest unchanged.
pub fn update_subtree(
    mut forest: Vec<GlossaryTermNode>,
    new_children: Vec<GlossaryTermNode>,
    target_id: &str,
) -> Vec<GlossaryTermNode> {
    if !replace_children(&mut forest, &new_children, target_id) {
        debug!("update_subtree: no node with id {}", target_id);
    }
    forest
}

/// Depth-first lookup of a node by id.
pub fn find_by_id<'a>(forest: &'a [GlossaryTermNode], id: &str) -> Option<&'a GlossaryTermNode> {
    forest.iter().find_map(|node| {
        if node.id == id {
            Some(node)
        } else {
            find_by_id(node.children.as_slice(), id)
        }
    })
}

/// Total number of nodes in the forest.
pub fn node_count(forest: &[GlossaryTermNode]) -> usize {
    forest.iter().map(GlossaryTermNode::node_count).sum()
}

/// Depth of the deepest tree, 0 for an empty forest.
pub fn depth(forest: &[GlossaryTermNode]) -> usize {
    forest.iter().map(GlossaryTermNode::depth).max().unwrap_or(0)
}

/// FQNs of nodes without loaded children, depth-first.
pub fn leaf_fqns(forest: &[GlossaryTermNode]) -> Vec<String> {
    let mut leaves = Vec::new();
    for node in forest {
        collect_leaves(node, &mut leaves);
    }
    leaves
}

fn collect_leaves(node: &GlossaryTermNode, leaves: &mut Vec<String>) {
    if node.children.is_empty() {
        leaves.push(node.fully_qualified_name.clone());
    } else {
        for child in node.children.as_slice() {
            collect_leaves(child, leaves);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<GlossaryTerm> {
        vec![
            GlossaryTerm::new("1", "A", "A").with_children(["2"]),
            GlossaryTerm::new("2", "A.B", "B").with_parent("1", "A"),
            GlossaryTerm::new("3", "C", "C"),
        ]
    }

    #[test]
    fn given_parent_and_child_when_building_then_child_is_nested() {
        let forest = build_tree(&sample());

        assert_eq!(forest.len(), 2);
        assert_eq!(forest[0].fully_qualified_name, "A");
        assert_eq!(forest[0].children.len(), 1);
        assert_eq!(forest[0].children.as_slice()[0].fully_qualified_name, "A.B");
        assert_eq!(forest[1].fully_qualified_name, "C");
        assert!(forest[1].children.is_absent());
    }

    #[test]
    fn given_nested_child_when_building_then_retagged_as_glossary_term() {
        let forest = build_tree(&sample());
        let child = &forest[0].children.as_slice()[0];
        assert_eq!(child.entity_type.as_deref(), Some(GLOSSARY_TERM_TYPE));
        assert_eq!(forest[0].entity_type, None);
    }

    #[test]
    fn given_parent_without_children_marker_when_building_then_child_is_root() {
        let records = vec![
            GlossaryTerm::new("1", "A", "A"),
            GlossaryTerm::new("2", "A.B", "B").with_parent("1", "A"),
        ];
        let forest = build_tree(&records);
        assert_eq!(forest.len(), 2);
    }

    #[test]
    fn given_child_before_parent_when_building_then_still_nested() {
        let records = vec![
            GlossaryTerm::new("2", "A.B", "B").with_parent("1", "A"),
            GlossaryTerm::new("1", "A", "A").with_children(["2"]),
        ];
        let forest = build_tree(&records);
        assert_eq!(forest.len(), 1);
        assert_eq!(node_count(&forest), 2);
    }

    #[test]
    fn given_self_parent_when_building_then_terminates() {
        let records =
            vec![GlossaryTerm::new("1", "A", "A").with_parent("1", "A").with_children(["1"])];
        let forest = build_tree(&records);
        assert!(forest.is_empty());
    }

    #[test]
    fn given_builder_reused_when_building_then_index_is_reset() {
        let mut builder = TreeBuilder::new();
        builder.build(&sample());
        let forest = builder.build(&[GlossaryTerm::new("2", "A.B", "B").with_parent("1", "A")]);
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].fully_qualified_name, "A.B");
    }

    #[test]
    fn given_forest_when_finding_nested_id_then_returns_node() {
        let forest = build_tree(&sample());
        assert_eq!(find_by_id(&forest, "2").map(|n| n.name.as_str()), Some("B"));
        assert!(find_by_id(&forest, "99").is_none());
    }

    #[test]
    fn given_forest_when_collecting_leaves_then_returns_leaf_fqns() {
        let forest = build_tree(&sample());
        assert_eq!(leaf_fqns(&forest), vec!["A.B".to_string(), "C".to_string()]);
        assert_eq!(depth(&forest), 2);
    }
}
