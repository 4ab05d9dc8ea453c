//! # ctree
//!
//! Static call trees for Go projects.
//!
//! ctree parses every Go file of a project with tree-sitter, indexes its
//! functions and methods, resolves call sites by name and expands each
//! program entry point (`main`, `init`) into a call tree.
//!
//! ## Key Features
//!
//! - **Per-path cycle detection**: recursion is marked where it happens,
//!   shared callees are expanded in every branch
//! - **Bounded**: a maximum depth caps every tree
//! - **External leaves**: unresolved calls keep their import path
//! - **Two outputs**: a YAML/JSON record and an indented text tree
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ctree::{analyze, AnalysisRequest, SupportedLanguage, TextRenderer};
//!
//! let request = AnalysisRequest::new("./cmd/server");
//! let result = analyze(SupportedLanguage::Go, &request)?;
//! print!("{}", TextRenderer::plain().render(&result.call_tree));
//! # Ok::<(), ctree::CtreeError>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod graph;
pub mod parser;
pub mod render;

// Re-exports for convenience
pub use config::CtreeConfig;
pub use error::{CtreeError, Result};

// Graph re-exports
pub use graph::{
    analyze_project, AnalysisRequest, AnalysisResult, CallEdge, CallTreeNode, Declaration,
    DiscoveryOptions, NodeKind, Variant,
};
pub use parser::{analyzer_for, GoAnalyzer, LanguageAnalyzer, SupportedLanguage};
pub use render::{extract_call_tree, OutputFormat, TextRenderer};

/// Analyze a project with the analyzer for `language`.
pub fn analyze(language: SupportedLanguage, request: &AnalysisRequest) -> Result<AnalysisResult> {
    let analyzer = analyzer_for(language);
    analyze_project(analyzer.as_ref(), request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn write(root: &Path, rel: &str, source: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, source).unwrap();
    }

    fn run(root: &Path) -> AnalysisResult {
        analyze(SupportedLanguage::Go, &AnalysisRequest::new(root)).unwrap()
    }

    #[test]
    fn test_single_helper_project() {
        let dir = tempdir().unwrap();
        write(
            dir.path(),
            "main.go",
            r#"package main

func main() {
    helper()
}

func helper() {}
"#,
        );

        let result = run(dir.path());
        assert_eq!(result.language, "go");
        assert_eq!(result.declarations.len(), 2);
        assert_eq!(result.call_tree.len(), 1);

        let root = &result.call_tree[0];
        assert_eq!(root.title, "func main()");
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].name, "helper");
        assert!(root.children[0].children.is_empty());

        assert_eq!(result.call_edges.len(), 1);
        assert_eq!(result.call_edges[0].from, "main.main");
        assert_eq!(result.call_edges[0].to, "main.helper");

        assert_eq!(result.stats.total_files, 1);
        assert_eq!(result.stats.parsed_files, 1);
        assert_eq!(result.stats.entry_points, 1);
        assert!(result.text_visualization.contains("Entry Point 1: func main()"));
    }

    #[test]
    fn test_self_recursive_main() {
        let dir = tempdir().unwrap();
        write(dir.path(), "main.go", "package main\n\nfunc main() {\n    main()\n}\n");

        let result = run(dir.path());
        let child = &result.call_tree[0].children[0];
        assert_eq!(child.name, "main");
        assert!(child.is_recursive);
        assert!(child.children.is_empty());
        assert!(result.text_visualization.contains("[recursive]"));
    }

    #[test]
    fn test_external_call_keeps_import_path() {
        let dir = tempdir().unwrap();
        write(
            dir.path(),
            "main.go",
            r#"package main

import "example.com/pkg"

func main() {
    pkg.Unknown()
}
"#,
        );

        let result = run(dir.path());
        let leaf = &result.call_tree[0].children[0];
        assert_eq!(leaf.kind, NodeKind::External);
        assert_eq!(leaf.title, "pkg.Unknown()");
        assert_eq!(leaf.namespace_path.as_deref(), Some("example.com/pkg"));
        assert_eq!(leaf.file, "");
        assert_eq!(leaf.line, 0);
        assert!(result.call_edges.is_empty());
    }

    #[test]
    fn test_no_files_is_fatal() {
        let dir = tempdir().unwrap();
        write(dir.path(), "README.md", "# nothing to see\n");
        write(dir.path(), "main_test.go", "package main\n");

        let err = analyze(SupportedLanguage::Go, &AnalysisRequest::new(dir.path())).unwrap_err();
        assert!(matches!(err, CtreeError::NoSourceFiles { .. }));
    }

    #[test]
    fn test_depth_cutoff_through_pipeline() {
        let dir = tempdir().unwrap();
        write(
            dir.path(),
            "main.go",
            r#"package main

func main() { b() }
func b() { c() }
func c() { d() }
func d() {}
"#,
        );

        let mut request = AnalysisRequest::new(dir.path());
        request.discovery.max_depth = 2;
        let result = analyze(SupportedLanguage::Go, &request).unwrap();

        let c = &result.call_tree[0].children[0].children[0];
        assert_eq!(c.name, "c");
        assert!(c.children.is_empty());
        assert!(!c.is_recursive);
        assert_eq!(result.stats.max_depth, 2);
        assert_eq!(result.call_edges.len(), 3);
    }

    #[test]
    fn test_parse_errors_are_skipped() {
        let dir = tempdir().unwrap();
        write(dir.path(), "a_main.go", "package main\n\nfunc main() {\n    run()\n}\n");
        write(dir.path(), "b_broken.go", "package main\n\nfunc broken( {\n");
        write(dir.path(), "c_run.go", "package main\n\nfunc run() {}\n");

        let result = run(dir.path());
        assert_eq!(result.stats.total_files, 3);
        assert_eq!(result.stats.parsed_files, 2);
        assert_eq!(result.stats.skipped_files, 1);
        assert_eq!(result.declarations.len(), 2);
        assert!(result.stats.warnings.iter().any(|w| w.contains("b_broken.go")));
        assert_eq!(result.call_tree[0].children[0].name, "run");
    }

    #[test]
    fn test_cross_package_resolution() {
        let dir = tempdir().unwrap();
        write(
            dir.path(),
            "cmd/app/main.go",
            r#"package main

import (
    "fmt"
    "example.com/app/util"
)

func init() {
    util.Setup()
}

func main() {
    s := util.NewServer()
    s.Start(":8080")
    fmt.Println("started")
}
"#,
        );
        write(
            dir.path(),
            "util/util.go",
            r#"package util

type Server struct{}

func Setup() {}

func NewServer() *Server { return &Server{} }

func (s *Server) Start(addr string) error {
    return s.listen(addr)
}

func (s *Server) listen(addr string) error { return nil }
"#,
        );

        let result = run(dir.path());
        let roots: Vec<&str> = result.call_tree.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(roots, vec!["init", "main"]);
        assert_eq!(result.call_tree[0].kind, NodeKind::Initializer);

        let main = &result.call_tree[1];
        let children: Vec<(&str, NodeKind)> = main
            .children
            .iter()
            .map(|c| (c.title.as_str(), c.kind))
            .collect();
        assert_eq!(
            children,
            vec![
                ("func NewServer() *Server", NodeKind::Function),
                ("s.Start()", NodeKind::External),
                ("fmt.Println()", NodeKind::External),
            ]
        );
        assert_eq!(main.children[2].namespace_path.as_deref(), Some("fmt"));

        let start = result
            .declarations
            .iter()
            .find(|d| d.name == "Start")
            .unwrap();
        assert_eq!(start.key(), "util.Server.Start");
        assert_eq!(start.callee_names, vec!["s.listen"]);

        assert_eq!(
            result.import_map.get("util").map(String::as_str),
            Some("example.com/app/util")
        );
    }

    #[test]
    fn test_same_file_initializers_expand_separately() {
        let dir = tempdir().unwrap();
        write(
            dir.path(),
            "main.go",
            "package main\n\nfunc init() { a() }\n\nfunc init() { b() }\n\nfunc main() {}\n",
        );

        let result = run(dir.path());
        let entries: Vec<(&str, Vec<String>)> = result
            .entry_points
            .iter()
            .map(|d| (d.name.as_str(), d.callee_names.clone()))
            .collect();
        assert_eq!(
            entries,
            vec![
                ("init", vec!["a".to_string()]),
                ("init", vec!["b".to_string()]),
                ("main", Vec::new()),
            ]
        );

        let children: Vec<Vec<&str>> = result
            .call_tree
            .iter()
            .map(|root| root.children.iter().map(|c| c.name.as_str()).collect())
            .collect();
        assert_eq!(children, vec![vec!["a"], vec!["b"], vec![]]);
    }

    #[test]
    fn test_unsupported_variant_touches_nothing() {
        let mut request = AnalysisRequest::new("/definitely/not/here");
        request.variant = Variant::from_name("echo");
        let err = analyze(SupportedLanguage::Go, &request).unwrap_err();
        assert!(matches!(err, CtreeError::UnsupportedVariant { .. }));
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let err = analyze(
            SupportedLanguage::Go,
            &AnalysisRequest::new("/definitely/not/here"),
        )
        .unwrap_err();
        assert!(matches!(err, CtreeError::PathAccess { .. }));
    }

    #[test]
    fn test_record_round_trip_and_saved_tree() {
        let dir = tempdir().unwrap();
        write(
            dir.path(),
            "main.go",
            r#"package main

import "os"

func main() {
    code := run(os.Args[1:])
    os.Exit(code)
}

func run(args []string) int { return len(args) }
"#,
        );
        let result = run(dir.path());

        for format in [OutputFormat::Yaml, OutputFormat::Json] {
            let record = render::to_structured(&result, format).unwrap();
            let parsed = render::from_structured(&record, format).unwrap();
            assert_eq!(parsed, result);
        }

        let saved = dir.path().join("ctree.yaml");
        fs::write(
            &saved,
            render::to_structured(&result, OutputFormat::Yaml).unwrap(),
        )
        .unwrap();
        let text = extract_call_tree(&saved, OutputFormat::Text, TextRenderer::plain()).unwrap();
        assert_eq!(text, result.text_visualization);
    }

    #[test]
    fn test_library_without_entry_points() {
        let dir = tempdir().unwrap();
        write(
            dir.path(),
            "lib.go",
            "package lib\n\nfunc A() { B() }\n\nfunc B() {}\n",
        );

        let result = run(dir.path());
        assert!(result.call_tree.is_empty());
        assert!(result.entry_points.is_empty());
        assert_eq!(result.call_edges.len(), 1);
        assert_eq!(result.stats.warnings.len(), 1);
        assert_eq!(result.text_visualization, "No call tree available\n");

        let yaml = render::to_structured(&result, OutputFormat::Yaml).unwrap();
        assert!(yaml.contains("call_tree: []"));
    }
}
