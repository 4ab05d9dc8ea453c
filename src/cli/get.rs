//! `ctree get call-tree`: render the call tree stored in a saved record.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use std::path::PathBuf;

use super::{use_color, write_output};
use crate::config::CtreeConfig;
use crate::graph::Variant;
use crate::render::{extract_call_tree, OutputFormat, TextRenderer};

#[derive(Subcommand, Debug)]
pub enum GetTarget {
    /// Render the call tree of a generated record
    CallTree(CallTreeArgs),
}

#[derive(Args, Debug)]
pub struct CallTreeArgs {
    /// Record produced by `ctree generate` (.json, else YAML)
    #[arg(short = 'c', long)]
    pub ctree: PathBuf,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format: text, tree, yaml or json
    #[arg(short, long, default_value = "text")]
    pub format: String,

    /// Project framework the record was generated for
    #[arg(long, default_value = "pure")]
    pub framework: String,

    /// Print parameters and return types on their own lines
    #[arg(long)]
    pub expand_signature: bool,

    /// Disable coloured text output
    #[arg(long)]
    pub no_color: bool,
}

pub fn run(target: GetTarget, config: &CtreeConfig) -> Result<()> {
    match target {
        GetTarget::CallTree(args) => call_tree(args, config),
    }
}

fn call_tree(args: CallTreeArgs, config: &CtreeConfig) -> Result<()> {
    if let Variant::Unsupported(name) = Variant::from_name(&args.framework) {
        bail!(crate::error::CtreeError::UnsupportedVariant { variant: name });
    }
    let format: OutputFormat = args.format.parse()?;

    let renderer = TextRenderer::new(
        args.expand_signature,
        use_color(args.no_color, config, args.output.as_deref()),
    );
    let rendered = extract_call_tree(&args.ctree, format, renderer)?;
    write_output(args.output.as_deref(), &rendered)
}
