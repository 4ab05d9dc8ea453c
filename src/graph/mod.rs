//! Call graph module, the analysis core of ctree.
//!
//! Provides the data model, source discovery, the project-wide graph
//! assembler, the call tree builder and the end-to-end pipeline.

pub mod builder;
pub mod engine;
pub mod locator;
pub mod tree;
pub mod types;

pub use builder::{analyze_project, AnalysisRequest, Variant};
pub use engine::{CallGraph, DeclarationIndex};
pub use locator::{display_path, find_source_files, DiscoveryOptions, SourceFilter};
pub use tree::TreeBuilder;
pub use types::{
    namespace_prefix, AnalysisResult, AnalysisStats, CallEdge, CallTreeNode, Declaration,
    FileAnalysis, ImportMap, NodeKind, Parameter,
};
