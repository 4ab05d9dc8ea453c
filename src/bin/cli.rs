//! ctree CLI - call trees for Go projects.
//!
//! Usage:
//!   ctree generate go -s ./project              # YAML record to stdout
//!   ctree generate go -f text --expand-signature
//!   ctree get call-tree -c ctree.yaml           # Render a saved record
//!   ctree list go -t entry-points               # Flat listings

use clap::Parser;
use ctree::cli::{run, Cli};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries only the rendered result.
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
