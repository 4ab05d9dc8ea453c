//! The graph assembler for ctree.
//!
//! Merges per-file extraction results into one project-wide declaration
//! index and import table, derives the entry points and resolves callee
//! names into the flat call edge list.

use std::collections::HashMap;
use tracing::{debug, info, warn};

use super::types::*;

/// Project-wide declaration index keyed by `Declaration::key`.
///
/// Iteration follows insertion order. Re-inserting an existing key
/// replaces the stored declaration but keeps its original position.
#[derive(Debug, Clone, Default)]
pub struct DeclarationIndex {
    declarations: Vec<Declaration>,
    /// `declarations[i].key()`, computed once at insertion.
    keys: Vec<String>,
    positions: HashMap<String, usize>,
}

impl DeclarationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a declaration. Returns the declaration it replaced, if any.
    pub fn insert(&mut self, decl: Declaration) -> Option<Declaration> {
        let key = decl.key();
        match self.positions.get(&key) {
            Some(&pos) => Some(std::mem::replace(&mut self.declarations[pos], decl)),
            None => {
                self.positions.insert(key.clone(), self.declarations.len());
                self.keys.push(key);
                self.declarations.push(decl);
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Declaration> {
        self.positions.get(key).map(|&pos| &self.declarations[pos])
    }

    /// Resolve a callee name: exact key first, then the first declaration
    /// whose key ends in `.callee` or whose bare name equals `callee`.
    pub fn resolve(&self, callee: &str) -> Option<&Declaration> {
        if let Some(decl) = self.get(callee) {
            return Some(decl);
        }
        let suffix = format!(".{}", callee);
        self.declarations
            .iter()
            .zip(&self.keys)
            .find(|(decl, key)| decl.name == callee || key.ends_with(&suffix))
            .map(|(decl, _)| decl)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations.iter()
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

/// The assembled project: everything the tree builder and the record need.
#[derive(Debug, Clone, Default)]
pub struct CallGraph {
    /// Every extracted declaration, in file-processing order.
    pub declarations: Vec<Declaration>,
    pub index: DeclarationIndex,
    pub imports: ImportMap,
    pub entry_points: Vec<Declaration>,
    pub edges: Vec<CallEdge>,
    /// Non-fatal conditions found while assembling.
    pub warnings: Vec<String>,
}

impl CallGraph {
    /// Assemble the graph from per-file results given in processing order.
    pub fn build_from_analyses(analyses: Vec<FileAnalysis>) -> Self {
        debug!(file_count = analyses.len(), "assembling call graph");
        let mut graph = CallGraph::default();

        // Phase 1: merge import tables, last write wins
        for analysis in &analyses {
            for (name, path) in &analysis.imports {
                graph.imports.insert(name.clone(), path.clone());
            }
        }

        // Phase 2: declaration index
        for analysis in analyses {
            for decl in analysis.declarations {
                if decl.kind.is_entry() {
                    graph.entry_points.push(decl.clone());
                }
                if let Some(previous) = graph.index.insert(decl.clone()) {
                    debug!(
                        key = %previous.key(),
                        file = %previous.file,
                        "declaration key redefined"
                    );
                }
                graph.declarations.push(decl);
            }
        }

        // Phase 3: entry points
        if graph.entry_points.is_empty() {
            let message = "no entry points found (no main or init functions)".to_string();
            warn!("{}", message);
            graph.warnings.push(message);
        } else {
            info!(count = graph.entry_points.len(), "entry points found");
        }

        // Phase 4: call edges
        graph.edges = graph.resolve_edges();
        debug!(
            declarations = graph.index.len(),
            edges = graph.edges.len(),
            imports = graph.imports.len(),
            "call graph assembled"
        );

        graph
    }

    fn resolve_edges(&self) -> Vec<CallEdge> {
        let mut edges = Vec::new();
        for caller in self.index.iter() {
            let from = caller.key();
            for callee in &caller.callee_names {
                if let Some(target) = self.index.resolve(callee) {
                    edges.push(CallEdge {
                        from: from.clone(),
                        to: target.key(),
                        file: target.file.clone(),
                        line: target.line,
                    });
                }
            }
        }
        edges
    }
}
