//! CLI module for ctree.
//!
//! Commands:
//! - generate: analyze a project and emit the call tree record
//! - get: render data from a saved record
//! - list: flat listings of functions, imports or entry points
//! - version

pub mod generate;
pub mod get;
pub mod list;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::CtreeConfig;
use crate::graph::locator::DiscoveryOptions;

#[derive(Parser, Debug)]
#[command(name = "ctree")]
#[command(about = "Static call tree generator for Go projects")]
#[command(version)]
pub struct Cli {
    /// Config file (default: etc/app.toml, then ~/.ctree/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze source files and generate the call tree
    Generate(generate::GenerateArgs),

    /// Render data from a previously generated record
    Get {
        #[command(subcommand)]
        target: get::GetTarget,
    },

    /// List functions, imports or entry points
    List(list::ListArgs),

    /// Show version
    Version,
}

/// Source selection shared by `generate` and `list`.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Source directory or file (default: config source_path, then ".")
    #[arg(short, long)]
    pub source: Option<PathBuf>,

    /// Recursively analyze subdirectories (`-r=false` to disable)
    #[arg(
        short,
        long,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub recursive: Option<bool>,
}

impl SourceArgs {
    pub fn source_path(&self, config: &CtreeConfig) -> PathBuf {
        self.source
            .clone()
            .or_else(|| config.source_path.clone())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn discovery(&self, config: &CtreeConfig) -> DiscoveryOptions {
        let mut options = config.discovery_options();
        if let Some(recursive) = self.recursive {
            options.recursive = recursive;
        }
        options
    }
}

/// Run a parsed command line.
pub fn run(cli: Cli) -> Result<()> {
    let config = CtreeConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Generate(args) => generate::run(args, &config),
        Commands::Get { target } => get::run(target, &config),
        Commands::List(args) => list::run(args, &config),
        Commands::Version => {
            println!("ctree {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// Colour only when allowed and writing to a terminal.
pub(crate) fn use_color(no_color: bool, config: &CtreeConfig, output: Option<&Path>) -> bool {
    !no_color && config.color && output.is_none() && console::Term::stdout().is_term()
}

/// Write rendered output to a file, or to stdout when no path is given.
pub(crate) fn write_output(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            fs::write(path, content)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!("Output written to {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(content.as_bytes())?;
            handle.flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_generate_arguments() {
        let cli = parse(&[
            "ctree",
            "generate",
            "golang",
            "-s",
            "./cmd",
            "-o",
            "out.yaml",
            "-d",
            "4",
            "--framework",
            "gin",
            "--expand-signature",
        ]);
        let Commands::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.language, "golang");
        assert_eq!(args.source.source, Some(PathBuf::from("./cmd")));
        assert_eq!(args.output, Some(PathBuf::from("out.yaml")));
        assert_eq!(args.max_depth, Some(4));
        assert_eq!(args.framework, "gin");
        assert!(args.expand_signature);
        assert_eq!(args.source.recursive, None);
    }

    #[test]
    fn test_recursive_flag_forms() {
        let recursive = |extra: &[&str]| {
            let mut argv = vec!["ctree", "generate", "go"];
            argv.extend_from_slice(extra);
            match parse(&argv).command {
                Commands::Generate(args) => args.source.recursive,
                _ => panic!("expected generate"),
            }
        };
        assert_eq!(recursive(&[]), None);
        assert_eq!(recursive(&["-r"]), Some(true));
        assert_eq!(recursive(&["-r=false"]), Some(false));
        assert_eq!(recursive(&["--recursive=true"]), Some(true));
    }

    #[test]
    fn test_get_call_tree_arguments() {
        let cli = parse(&[
            "ctree", "get", "call-tree", "-c", "tree.yaml", "-f", "json", "--no-color", "-v",
        ]);
        assert!(cli.verbose);
        let Commands::Get {
            target: get::GetTarget::CallTree(args),
        } = cli.command
        else {
            panic!("expected get call-tree");
        };
        assert_eq!(args.ctree, PathBuf::from("tree.yaml"));
        assert_eq!(args.format, "json");
        assert!(args.no_color);
    }

    #[test]
    fn test_list_arguments() {
        let cli = parse(&["ctree", "list", "go", "-t", "entry-points", "-f", "json"]);
        let Commands::List(args) = cli.command else {
            panic!("expected list");
        };
        assert_eq!(args.kind, list::ListKind::EntryPoints);
        assert_eq!(args.format, list::ListFormat::Json);

        assert!(Cli::try_parse_from(["ctree", "list", "go", "-t", "classes"]).is_err());
    }

    #[test]
    fn test_source_args_fall_back_to_config() {
        let config = CtreeConfig {
            source_path: Some(PathBuf::from("./svc")),
            recursive: false,
            max_depth: 3,
            ..Default::default()
        };
        let args = SourceArgs::default();
        assert_eq!(args.source_path(&config), PathBuf::from("./svc"));
        assert!(!args.discovery(&config).recursive);

        let args = SourceArgs {
            source: Some(PathBuf::from("main.go")),
            recursive: Some(true),
        };
        assert_eq!(args.source_path(&config), PathBuf::from("main.go"));
        let options = args.discovery(&config);
        assert!(options.recursive);
        assert_eq!(options.max_depth, 3);

        assert_eq!(
            SourceArgs::default().source_path(&CtreeConfig::default()),
            PathBuf::from(".")
        );
    }

    #[test]
    fn test_write_output_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("reports/tree.txt");
        write_output(Some(&path), "Call Tree:\n").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "Call Tree:\n");
    }

    #[test]
    fn test_no_color_when_writing_files() {
        let config = CtreeConfig::default();
        assert!(!use_color(false, &config, Some(Path::new("out.txt"))));
        assert!(!use_color(true, &config, None));
    }
}
