//! Output renderers: the structured analysis record (YAML/JSON) and the
//! text tree.
//!
//! Renderers only consume an [`AnalysisResult`], so they work equally on a
//! fresh analysis and on a record loaded back from disk.

pub mod text;

pub use text::TextRenderer;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::error::{CtreeError, Result};
use crate::graph::types::{AnalysisResult, CallTreeNode};

const SUPPORTED_FORMATS: &str = "yaml, json, text";

/// Output notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
    Text,
}

impl OutputFormat {
    /// Structured notation of a saved record, from its file extension.
    pub fn for_record(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => OutputFormat::Json,
            _ => OutputFormat::Yaml,
        }
    }

    pub fn is_structured(&self) -> bool {
        !matches!(self, OutputFormat::Text)
    }
}

impl FromStr for OutputFormat {
    type Err = CtreeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            "json" => Ok(OutputFormat::Json),
            "text" | "tree" => Ok(OutputFormat::Text),
            _ => Err(CtreeError::unsupported_format(s, SUPPORTED_FORMATS)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Yaml => write!(f, "yaml"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Text => write!(f, "text"),
        }
    }
}

/// The document written by `get call-tree` in structured formats.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallTreeDocument {
    #[serde(default)]
    pub call_tree: Vec<CallTreeNode>,
}

/// Serialize any record in a structured notation.
pub fn to_structured<T: Serialize>(value: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(value)?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Text => Err(CtreeError::unsupported_format(
            format.to_string(),
            "yaml, json",
        )),
    }
}

/// Parse an analysis record written by [`to_structured`].
pub fn from_structured(input: &str, format: OutputFormat) -> Result<AnalysisResult> {
    match format {
        OutputFormat::Yaml => Ok(serde_yaml::from_str(input)?),
        OutputFormat::Json => Ok(serde_json::from_str(input)?),
        OutputFormat::Text => Err(CtreeError::unsupported_format(
            format.to_string(),
            "yaml, json",
        )),
    }
}

/// Render a whole analysis: the full record, or its call tree as text.
pub fn render_result(
    result: &AnalysisResult,
    format: OutputFormat,
    renderer: TextRenderer,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(renderer.render(&result.call_tree)),
        _ => to_structured(result, format),
    }
}

/// Render only the call tree: as text, or as a `call_tree` document.
pub fn render_call_tree(
    roots: &[CallTreeNode],
    format: OutputFormat,
    renderer: TextRenderer,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(renderer.render(roots)),
        _ => to_structured(
            &CallTreeDocument {
                call_tree: roots.to_vec(),
            },
            format,
        ),
    }
}

/// Load a saved analysis record; `.json` files are JSON, anything else YAML.
pub fn load_record(path: &Path) -> Result<AnalysisResult> {
    let input = fs::read_to_string(path).map_err(|e| CtreeError::io(path, e))?;
    from_structured(&input, OutputFormat::for_record(path))
}

/// Render the call tree stored in a saved record.
pub fn extract_call_tree(
    record: &Path,
    format: OutputFormat,
    renderer: TextRenderer,
) -> Result<String> {
    let result = load_record(record)?;
    render_call_tree(&result.call_tree, format, renderer)
}
