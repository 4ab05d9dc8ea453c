//! `ctree list <language>`: flat listings over the analysis.

use anyhow::Result;
use clap::{Args, ValueEnum};
use serde::Serialize;

use super::{write_output, SourceArgs};
use crate::config::CtreeConfig;
use crate::graph::{analyze_project, AnalysisRequest, AnalysisResult, Declaration, Variant};
use crate::parser::{analyzer_for, SupportedLanguage};
use crate::render::{to_structured, OutputFormat};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListKind {
    Functions,
    Imports,
    EntryPoints,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    Table,
    Json,
    Yaml,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Source language (go)
    pub language: String,

    #[command(flatten)]
    pub source: SourceArgs,

    /// What to list
    #[arg(short = 't', long = "type", value_enum, default_value = "functions")]
    pub kind: ListKind,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: ListFormat,
}

pub fn run(args: ListArgs, config: &CtreeConfig) -> Result<()> {
    let language: SupportedLanguage = args.language.parse()?;
    let request = AnalysisRequest {
        source: args.source.source_path(config),
        variant: Variant::Pure,
        discovery: args.source.discovery(config),
    };

    let analyzer = analyzer_for(language);
    let result = analyze_project(analyzer.as_ref(), &request)?;
    let rendered = render_listing(&result, args.kind, args.format)?;
    write_output(None, &rendered)
}

/// Render one listing of an analysis.
pub fn render_listing(result: &AnalysisResult, kind: ListKind, format: ListFormat) -> Result<String> {
    let rendered = match (kind, format) {
        (ListKind::Functions, ListFormat::Table) => declaration_table(&result.declarations),
        (ListKind::EntryPoints, ListFormat::Table) => declaration_table(&result.entry_points),
        (ListKind::Imports, ListFormat::Table) => format_table(
            &["NAME", "PATH"],
            result
                .import_map
                .iter()
                .map(|(name, path)| vec![name.clone(), path.clone()])
                .collect(),
        ),
        (ListKind::Functions, _) => structured(&result.declarations, format)?,
        (ListKind::EntryPoints, _) => structured(&result.entry_points, format)?,
        (ListKind::Imports, _) => structured(&result.import_map, format)?,
    };
    Ok(rendered)
}

fn structured<T: Serialize>(value: &T, format: ListFormat) -> Result<String> {
    let format = match format {
        ListFormat::Json => OutputFormat::Json,
        _ => OutputFormat::Yaml,
    };
    Ok(to_structured(value, format)?)
}

fn declaration_table(declarations: &[Declaration]) -> String {
    format_table(
        &["NAME", "KIND", "LOCATION", "SIGNATURE"],
        declarations
            .iter()
            .map(|d| {
                vec![
                    d.key(),
                    d.kind.to_string(),
                    format!("{}:{}", d.file, d.line),
                    d.signature.clone(),
                ]
            })
            .collect(),
    )
}

/// Left-aligned columns separated by two spaces; the last column is not padded.
fn format_table(headers: &[&str], rows: Vec<Vec<String>>) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let render_row = |cells: Vec<&str>| {
        let last = cells.len().saturating_sub(1);
        let mut line = String::new();
        for (i, (cell, width)) in cells.iter().zip(&widths).enumerate() {
            if i == last {
                line.push_str(cell);
            } else {
                line.push_str(&format!("{:<width$}  ", cell, width = *width));
            }
        }
        line.push('\n');
        line
    };

    let mut out = render_row(headers.to_vec());
    for row in &rows {
        out.push_str(&render_row(row.iter().map(String::as_str).collect()));
    }
    out
}
