//! Core types for the ctree call graph.
//!
//! Defines declaration kinds, the per-file extraction results, the flat
//! call graph edges and the hierarchical call tree nodes, plus the
//! top-level analysis record that is serialized to YAML/JSON.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Short package name → fully-qualified import path.
pub type ImportMap = BTreeMap<String, String>;

/// The kind of a declaration or call tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// A free function.
    Function,
    /// A function with a receiver.
    Method,
    /// The program's main entry symbol.
    Entrypoint,
    /// An automatically-invoked initializer.
    Initializer,
    /// A callee that could not be resolved to a known declaration.
    External,
}

impl NodeKind {
    /// True for roots of the call tree.
    pub fn is_entry(&self) -> bool {
        matches!(self, NodeKind::Entrypoint | NodeKind::Initializer)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Function => write!(f, "function"),
            NodeKind::Method => write!(f, "method"),
            NodeKind::Entrypoint => write!(f, "entrypoint"),
            NodeKind::Initializer => write!(f, "initializer"),
            NodeKind::External => write!(f, "external"),
        }
    }
}

/// A function parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub ty: String,
}

impl Parameter {
    pub fn named(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ty: ty.into(),
        }
    }

    pub fn unnamed(ty: impl Into<String>) -> Self {
        Self {
            name: None,
            ty: ty.into(),
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} {}", name, self.ty),
            None => write!(f, "{}", self.ty),
        }
    }
}

/// One function- or method-level definition found in source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub name: String,
    pub file: String,
    pub line: usize,
    pub kind: NodeKind,
    #[serde(default)]
    pub signature: String,
    #[serde(rename = "package")]
    pub namespace: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver: Option<String>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub return_types: Vec<String>,
    #[serde(rename = "calls_to", default)]
    pub callee_names: Vec<String>,
}

impl Declaration {
    /// Identity key: `namespace.receiver.name`, receiver omitted when absent.
    pub fn key(&self) -> String {
        match &self.receiver {
            Some(receiver) => format!("{}.{}.{}", self.namespace, receiver, self.name),
            None => format!("{}.{}", self.namespace, self.name),
        }
    }

    /// Canonical signature, e.g. `func (Server) Serve(addr string) (int, error)`.
    pub fn render_signature(&self) -> String {
        let mut sig = String::from("func ");
        if let Some(receiver) = &self.receiver {
            sig.push('(');
            sig.push_str(receiver);
            sig.push_str(") ");
        }
        sig.push_str(&self.name);
        sig.push('(');
        let params: Vec<String> = self.parameters.iter().map(|p| p.to_string()).collect();
        sig.push_str(&params.join(", "));
        sig.push(')');

        match self.return_types.len() {
            0 => {}
            1 => {
                sig.push(' ');
                sig.push_str(&self.return_types[0]);
            }
            _ => {
                sig.push_str(" (");
                sig.push_str(&self.return_types.join(", "));
                sig.push(')');
            }
        }
        sig
    }
}

/// Everything extracted from a single source file.
#[derive(Debug, Clone, Default)]
pub struct FileAnalysis {
    /// Path to the source file.
    pub file_path: PathBuf,
    /// Declarations in source order, with callee names filled in.
    pub declarations: Vec<Declaration>,
    /// Import bindings of this file.
    pub imports: ImportMap,
}

/// A resolved caller → callee relationship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallEdge {
    pub from: String,
    pub to: String,
    /// Definition site of the callee.
    pub file: String,
    pub line: usize,
}

/// One position in the per-entry-point expansion of calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallTreeNode {
    pub title: String,
    pub name: String,
    #[serde(rename = "package", default)]
    pub namespace: String,
    #[serde(
        rename = "package_path",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub namespace_path: Option<String>,
    pub file: String,
    pub line: usize,
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub return_types: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<CallTreeNode>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_recursive: bool,
}

impl CallTreeNode {
    /// Childless node describing a known declaration.
    pub fn from_declaration(decl: &Declaration) -> Self {
        Self {
            title: decl.render_signature(),
            name: decl.name.clone(),
            namespace: decl.namespace.clone(),
            namespace_path: None,
            file: decl.file.clone(),
            line: decl.line,
            kind: decl.kind,
            receiver: decl.receiver.clone(),
            parameters: decl.parameters.clone(),
            return_types: decl.return_types.clone(),
            children: Vec::new(),
            is_recursive: false,
        }
    }

    /// Placeholder leaf for a callee outside the analyzed source set.
    pub fn external(callee: &str, imports: &ImportMap) -> Self {
        let namespace = namespace_prefix(callee).unwrap_or_default().to_string();
        let namespace_path = imports.get(&namespace).cloned();
        Self {
            title: format!("{}()", callee),
            name: callee.to_string(),
            namespace,
            namespace_path,
            file: String::new(),
            line: 0,
            kind: NodeKind::External,
            receiver: None,
            parameters: Vec::new(),
            return_types: Vec::new(),
            children: Vec::new(),
            is_recursive: false,
        }
    }

    pub fn is_external(&self) -> bool {
        self.kind == NodeKind::External
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(|c| c.depth()).max().unwrap_or(0)
    }
}

/// Everything before the last `.` of a qualified name: `pkg.Func` → `pkg`.
pub fn namespace_prefix(name: &str) -> Option<&str> {
    let name = name.strip_suffix("()").unwrap_or(name);
    match name.rfind('.') {
        Some(idx) if idx > 0 => Some(&name[..idx]),
        _ => None,
    }
}

/// Run statistics stored under `metadata`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisStats {
    pub total_files: usize,
    pub parsed_files: usize,
    pub skipped_files: usize,
    pub total_functions: usize,
    pub entry_points: usize,
    pub call_edges: usize,
    pub max_depth: usize,
    pub processing_time: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// The canonical analysis record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(rename = "source_file")]
    pub source_root: String,
    pub language: String,
    #[serde(rename = "functions", default)]
    pub declarations: Vec<Declaration>,
    #[serde(rename = "call_graph", default)]
    pub call_edges: Vec<CallEdge>,
    #[serde(default)]
    pub entry_points: Vec<Declaration>,
    #[serde(default)]
    pub call_tree: Vec<CallTreeNode>,
    #[serde(rename = "call_tree_visualization", default)]
    pub text_visualization: String,
    #[serde(default)]
    pub import_map: ImportMap,
    #[serde(rename = "metadata", default)]
    pub stats: AnalysisStats,
}
