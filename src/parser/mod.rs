//! Source parsing: one analyzer per supported language.
//!
//! An analyzer knows how to find its source files, parse them with
//! tree-sitter, list the declarations and import bindings of a file and
//! scan a declaration body for call sites.

pub mod go;
pub mod language;

pub use go::GoAnalyzer;
pub use language::SupportedLanguage;

use std::path::{Path, PathBuf};
use tree_sitter::{Node, Parser, Tree};

use crate::error::{CtreeError, Result};
use crate::graph::locator::DiscoveryOptions;
use crate::graph::types::{Declaration, FileAnalysis};

/// A successfully parsed source file.
pub struct ParsedFile {
    pub path: PathBuf,
    /// Path as written into the analysis record.
    pub display_path: String,
    pub source: String,
    pub tree: Tree,
}

impl ParsedFile {
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Source text of a node.
    pub fn text(&self, node: Node<'_>) -> &str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }
}

/// Capability interface implemented once per source language.
pub trait LanguageAnalyzer {
    fn language(&self) -> SupportedLanguage;

    /// Ordered list of eligible source files under `root`.
    fn discover(&self, root: &Path, options: &DiscoveryOptions) -> Result<Vec<PathBuf>>;

    /// Parse one file. Failures are recoverable `Parse` errors.
    fn parse(&self, path: &Path, display_path: &str) -> Result<ParsedFile>;

    /// Declarations (without callee names) and import bindings of a file.
    fn analyze(&self, file: &ParsedFile) -> FileAnalysis;

    /// De-duplicated callee names referenced inside `decl`'s body.
    fn extract_calls(&self, file: &ParsedFile, decl: &Declaration) -> Vec<String>;
}

/// Get the analyzer for a language.
pub fn analyzer_for(language: SupportedLanguage) -> Box<dyn LanguageAnalyzer> {
    match language {
        SupportedLanguage::Go => Box::new(GoAnalyzer::new()),
    }
}

/// Read and parse a file with the grammar of `language`.
///
/// A tree containing syntax errors is rejected so that partially parsed
/// declarations never reach the graph.
pub(crate) fn parse_source_file(
    language: SupportedLanguage,
    path: &Path,
    display_path: &str,
) -> Result<ParsedFile> {
    let source = std::fs::read_to_string(path)
        .map_err(|e| CtreeError::parse(path, format!("failed to read file: {}", e)))?;

    let mut parser = Parser::new();
    parser
        .set_language(&language.tree_sitter_language())
        .map_err(|e| CtreeError::parse(path, e.to_string()))?;

    let tree = parser
        .parse(&source, None)
        .ok_or_else(|| CtreeError::parse(path, "parser produced no syntax tree"))?;

    if tree.root_node().has_error() {
        return Err(match first_error(tree.root_node()) {
            Some(node) => {
                let pos = node.start_position();
                let message = if node.is_missing() {
                    format!("missing {}", node.kind())
                } else {
                    "syntax error".to_string()
                };
                CtreeError::parse_at(path, message, pos.row + 1, pos.column + 1)
            }
            None => CtreeError::parse(path, "syntax error"),
        });
    }

    Ok(ParsedFile {
        path: path.to_path_buf(),
        display_path: display_path.to_string(),
        source,
        tree,
    })
}

/// Depth-first search for the first ERROR or MISSING node.
fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(found) = first_error(child) {
            return Some(found);
        }
    }
    None
}
