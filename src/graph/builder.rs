//! Analysis pipeline: discover → parse → extract → assemble → build tree.
//!
//! Parse failures are logged and skipped so a run over many files still
//! produces a result; every other failure aborts the run.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::engine::CallGraph;
use super::locator::{display_path, DiscoveryOptions};
use super::tree::TreeBuilder;
use super::types::{AnalysisResult, AnalysisStats, FileAnalysis};
use crate::error::{CtreeError, Result};
use crate::parser::LanguageAnalyzer;
use crate::render::text::TextRenderer;

/// Project flavour selector. Only plain projects are analyzed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Variant {
    #[default]
    Pure,
    Unsupported(String),
}

impl Variant {
    /// `pure` (or nothing) selects plain analysis; any other name is kept
    /// so dispatch can report it.
    pub fn from_name(name: &str) -> Self {
        let name = name.trim().to_ascii_lowercase();
        match name.as_str() {
            "" | "pure" => Variant::Pure,
            _ => Variant::Unsupported(name),
        }
    }
}

impl FromStr for Variant {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Variant::from_name(s))
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Pure => write!(f, "pure"),
            Variant::Unsupported(name) => write!(f, "{}", name),
        }
    }
}

/// Inputs of one analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub source: PathBuf,
    pub variant: Variant,
    pub discovery: DiscoveryOptions,
}

impl AnalysisRequest {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            variant: Variant::Pure,
            discovery: DiscoveryOptions::default(),
        }
    }

    pub fn max_depth(&self) -> usize {
        self.discovery.max_depth
    }
}

/// Run the full pipeline for the requested variant.
pub fn analyze_project(
    analyzer: &dyn LanguageAnalyzer,
    request: &AnalysisRequest,
) -> Result<AnalysisResult> {
    match &request.variant {
        Variant::Pure => analyze_pure(analyzer, request),
        Variant::Unsupported(name) => Err(CtreeError::UnsupportedVariant {
            variant: name.clone(),
        }),
    }
}

fn analyze_pure(
    analyzer: &dyn LanguageAnalyzer,
    request: &AnalysisRequest,
) -> Result<AnalysisResult> {
    let started = Instant::now();
    let language = analyzer.language();

    let files = analyzer.discover(&request.source, &request.discovery)?;
    if files.is_empty() {
        return Err(CtreeError::NoSourceFiles {
            language: language.name().to_string(),
            path: request.source.clone(),
        });
    }
    info!(count = files.len(), language = %language, "analyzing source files");

    let mut stats = AnalysisStats {
        total_files: files.len(),
        max_depth: request.max_depth(),
        ..Default::default()
    };

    let mut analyses: Vec<FileAnalysis> = Vec::with_capacity(files.len());
    for path in &files {
        let shown = display_path(path);
        let parsed = match analyzer.parse(path, &shown) {
            Ok(parsed) => parsed,
            Err(e) if e.is_recoverable() => {
                warn!(file = %shown, "skipping file: {}", e);
                stats.skipped_files += 1;
                stats.warnings.push(e.to_string());
                continue;
            }
            Err(e) => return Err(e),
        };

        let mut analysis = analyzer.analyze(&parsed);
        for decl in &mut analysis.declarations {
            decl.callee_names = analyzer.extract_calls(&parsed, decl);
        }
        debug!(
            file = %shown,
            declarations = analysis.declarations.len(),
            imports = analysis.imports.len(),
            "file analyzed"
        );
        stats.parsed_files += 1;
        analyses.push(analysis);
    }

    let graph = CallGraph::build_from_analyses(analyses);
    let call_tree =
        TreeBuilder::new(&graph.index, &graph.imports, request.max_depth()).build(&graph.entry_points);
    let text_visualization = TextRenderer::plain().render(&call_tree);

    stats.total_functions = graph.declarations.len();
    stats.entry_points = graph.entry_points.len();
    stats.call_edges = graph.edges.len();
    stats.warnings.extend(graph.warnings);
    stats.processing_time = format!("{:?}", started.elapsed());

    Ok(AnalysisResult {
        source_root: display_path(&request.source),
        language: language.id().to_string(),
        declarations: graph.declarations,
        call_edges: graph.edges,
        entry_points: graph.entry_points,
        call_tree,
        text_visualization,
        import_map: graph.imports,
        stats,
    })
}
