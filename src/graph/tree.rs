//! Call tree construction.
//!
//! Each entry point is expanded depth-first into its own tree. Cycles are
//! detected against the current ancestor path only, so a function reached
//! through two unrelated branches is expanded in both. Expansion stops at
//! `max_depth`, which bounds every path to `max_depth + 1` nodes.

use std::collections::HashSet;

use super::engine::DeclarationIndex;
use super::types::{CallTreeNode, Declaration, ImportMap};

pub struct TreeBuilder<'a> {
    index: &'a DeclarationIndex,
    imports: &'a ImportMap,
    max_depth: usize,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(index: &'a DeclarationIndex, imports: &'a ImportMap, max_depth: usize) -> Self {
        Self {
            index,
            imports,
            max_depth,
        }
    }

    /// One root per entry point, in entry point order.
    pub fn build(&self, entry_points: &[Declaration]) -> Vec<CallTreeNode> {
        let mut ancestors = HashSet::new();
        entry_points
            .iter()
            .map(|entry| self.expand(entry, 0, &mut ancestors))
            .collect()
    }

    fn expand(
        &self,
        decl: &Declaration,
        depth: usize,
        ancestors: &mut HashSet<String>,
    ) -> CallTreeNode {
        let mut node = CallTreeNode::from_declaration(decl);
        let key = decl.key();

        if ancestors.contains(&key) {
            node.is_recursive = true;
            return node;
        }
        if depth >= self.max_depth {
            return node;
        }

        ancestors.insert(key.clone());
        for callee in &decl.callee_names {
            let child = match self.index.resolve(callee) {
                Some(target) => self.expand(target, depth + 1, ancestors),
                None => CallTreeNode::external(callee, self.imports),
            };
            node.children.push(child);
        }
        ancestors.remove(&key);

        node
    }
}
