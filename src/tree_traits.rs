/*
Rendering of glossary forests with termtree.
A forest has several roots, so it renders as a sequence of trees.
 */
use termtree::Tree;

use crate::domain::{Children, GlossaryTermNode};

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for GlossaryTermNode {
    fn to_tree_string(&self) -> Tree<String> {
        let mut label = self.label().to_string();
        if self.display_name.is_some() && self.display_name.as_deref() != Some(self.name.as_str()) {
            label.push_str(&format!(" ({})", self.name));
        }
        // Children announced but not fetched yet
        if matches!(self.children, Children::Pending) {
            label.push_str(" [+]");
        }

        let leaves: Vec<_> = self
            .children
            .as_slice()
            .iter()
            .map(|c| c.to_tree_string())
            .collect();

        Tree::new(label).with_leaves(leaves)
    }
}

/// Render every tree of the forest, one after another.
pub fn render_forest(forest: &[GlossaryTermNode]) -> String {
    forest
        .iter()
        .map(|node| node.to_tree_string().to_string())
        .collect::<Vec<_>>()
        .join("")
}
