//! `ctree generate <language>`: run the full analysis.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::{use_color, write_output, SourceArgs};
use crate::config::CtreeConfig;
use crate::graph::{analyze_project, AnalysisRequest, Variant};
use crate::parser::{analyzer_for, SupportedLanguage};
use crate::render::{render_result, OutputFormat, TextRenderer};

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Source language (go)
    pub language: String,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Maximum call tree depth (and directory depth)
    #[arg(short = 'd', long)]
    pub max_depth: Option<usize>,

    /// Project framework (pure, gin, echo)
    #[arg(long, default_value = "pure")]
    pub framework: String,

    /// Output format: yaml, json or text
    #[arg(short, long)]
    pub format: Option<String>,

    /// Print parameters and return types on their own lines (text output)
    #[arg(long)]
    pub expand_signature: bool,

    /// Disable coloured text output
    #[arg(long)]
    pub no_color: bool,
}

impl GenerateArgs {
    pub fn request(&self, config: &CtreeConfig) -> AnalysisRequest {
        let mut discovery = self.source.discovery(config);
        if let Some(max_depth) = self.max_depth {
            discovery.max_depth = max_depth;
        }
        AnalysisRequest {
            source: self.source.source_path(config),
            variant: Variant::from_name(&self.framework),
            discovery,
        }
    }

    pub fn output_format(&self, config: &CtreeConfig) -> Result<OutputFormat> {
        let format = match self.format.as_deref().or(config.format.as_deref()) {
            Some(name) => name.parse()?,
            None => OutputFormat::Yaml,
        };
        Ok(format)
    }
}

pub fn run(args: GenerateArgs, config: &CtreeConfig) -> Result<()> {
    let language: SupportedLanguage = args.language.parse()?;
    let format = args.output_format(config)?;
    let request = args.request(config);

    let analyzer = analyzer_for(language);
    let result = analyze_project(analyzer.as_ref(), &request)?;

    let output = args.output.clone().or_else(|| config.output_path.clone());
    let renderer = TextRenderer::new(
        args.expand_signature,
        use_color(args.no_color, config, output.as_deref()),
    );
    let rendered = render_result(&result, format, renderer)?;
    write_output(output.as_deref(), &rendered)
}
