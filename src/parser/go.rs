//! Go analyzer built on tree-sitter-go.
//!
//! Extracts function and method declarations with their rendered
//! parameter/return types, the file's import bindings, and the callee
//! names referenced inside each body. Resolution is purely name-based.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tree_sitter::Node;

use super::{parse_source_file, LanguageAnalyzer, ParsedFile, SupportedLanguage};
use crate::error::Result;
use crate::graph::locator::{find_source_files, DiscoveryOptions, SourceFilter};
use crate::graph::types::{Declaration, FileAnalysis, ImportMap, NodeKind, Parameter};

const GO_FILTER: SourceFilter = SourceFilter {
    extensions: &["go"],
    excluded_suffixes: &["_test.go"],
    noise_dirs: &["vendor", "testdata"],
};

const MAIN_PACKAGE: &str = "main";
const MAIN_FUNCTION: &str = "main";
const INIT_FUNCTION: &str = "init";

#[derive(Debug, Default, Clone, Copy)]
pub struct GoAnalyzer;

impl GoAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl LanguageAnalyzer for GoAnalyzer {
    fn language(&self) -> SupportedLanguage {
        SupportedLanguage::Go
    }

    fn discover(&self, root: &Path, options: &DiscoveryOptions) -> Result<Vec<PathBuf>> {
        find_source_files(root, options, GO_FILTER)
    }

    fn parse(&self, path: &Path, display_path: &str) -> Result<ParsedFile> {
        parse_source_file(SupportedLanguage::Go, path, display_path)
    }

    fn analyze(&self, file: &ParsedFile) -> FileAnalysis {
        let root = file.root();
        let package = package_name(file, root);

        let mut declarations = Vec::new();
        let mut imports = ImportMap::new();

        for child in root.named_children(&mut root.walk()) {
            match child.kind() {
                "function_declaration" | "method_declaration" => {
                    if let Some(decl) = extract_declaration(file, child, &package) {
                        declarations.push(decl);
                    }
                }
                "import_declaration" => extract_imports(file, child, &mut imports),
                _ => {}
            }
        }

        FileAnalysis {
            file_path: file.path.clone(),
            declarations,
            imports,
        }
    }

    fn extract_calls(&self, file: &ParsedFile, decl: &Declaration) -> Vec<String> {
        let root = file.root();
        let mut calls = Vec::new();
        let mut seen = HashSet::new();

        for child in root.named_children(&mut root.walk()) {
            if !matches!(child.kind(), "function_declaration" | "method_declaration") {
                continue;
            }
            // Go allows several `init` in one file; the line pins the declaration.
            let name = child.child_by_field_name("name").map(|n| file.text(n));
            if child.start_position().row + 1 != decl.line
                || name != Some(decl.name.as_str())
                || receiver_type(file, child) != decl.receiver
            {
                continue;
            }
            if let Some(body) = child.child_by_field_name("body") {
                collect_calls(file, body, &mut seen, &mut calls);
            }
            break;
        }

        calls
    }
}

fn package_name(file: &ParsedFile, root: Node<'_>) -> String {
    for child in root.named_children(&mut root.walk()) {
        if child.kind() == "package_clause" {
            if let Some(ident) = child.named_child(0) {
                return file.text(ident).to_string();
            }
        }
    }
    String::new()
}

// ── Declarations ──

fn extract_declaration(file: &ParsedFile, node: Node<'_>, package: &str) -> Option<Declaration> {
    let name = file.text(node.child_by_field_name("name")?).to_string();
    let receiver = receiver_type(file, node);

    let parameters = node
        .child_by_field_name("parameters")
        .map(|params| extract_parameters(file, params))
        .unwrap_or_default();
    let return_types = node
        .child_by_field_name("result")
        .map(|result| extract_results(file, result))
        .unwrap_or_default();

    let kind = classify(&name, package, receiver.as_deref());
    let mut decl = Declaration {
        name,
        file: file.display_path.clone(),
        line: node.start_position().row + 1,
        kind,
        signature: String::new(),
        namespace: package.to_string(),
        receiver,
        parameters,
        return_types,
        callee_names: Vec::new(),
    };
    decl.signature = decl.render_signature();
    Some(decl)
}

fn classify(name: &str, package: &str, receiver: Option<&str>) -> NodeKind {
    match receiver {
        Some(_) => NodeKind::Method,
        None if name == MAIN_FUNCTION && package == MAIN_PACKAGE => NodeKind::Entrypoint,
        None if name == INIT_FUNCTION => NodeKind::Initializer,
        None => NodeKind::Function,
    }
}

/// Base type name of a method receiver: `func (s *Store[T]) Get()` → `Store`.
fn receiver_type(file: &ParsedFile, node: Node<'_>) -> Option<String> {
    let receiver = node.child_by_field_name("receiver")?;
    let param = receiver
        .named_children(&mut receiver.walk())
        .find(|c| c.kind() == "parameter_declaration")?;
    let ty = param.child_by_field_name("type")?;
    base_type_name(file, ty)
}

fn base_type_name(file: &ParsedFile, node: Node<'_>) -> Option<String> {
    match node.kind() {
        "type_identifier" | "identifier" => Some(file.text(node).to_string()),
        "pointer_type" | "parenthesized_type" => base_type_name(file, node.named_child(0)?),
        "generic_type" => base_type_name(file, node.child_by_field_name("type")?),
        _ => None,
    }
}

fn extract_parameters(file: &ParsedFile, list: Node<'_>) -> Vec<Parameter> {
    let mut params = Vec::new();
    for child in list.named_children(&mut list.walk()) {
        match child.kind() {
            "parameter_declaration" => {
                let ty = child
                    .child_by_field_name("type")
                    .map(|t| format_type(file, t))
                    .unwrap_or_else(|| "unknown".to_string());
                let names: Vec<String> = child
                    .children_by_field_name("name", &mut child.walk())
                    .map(|n| file.text(n).to_string())
                    .collect();
                if names.is_empty() {
                    params.push(Parameter::unnamed(ty));
                } else {
                    params.extend(names.into_iter().map(|n| Parameter::named(n, ty.clone())));
                }
            }
            "variadic_parameter_declaration" => {
                let ty = child
                    .child_by_field_name("type")
                    .map(|t| format!("...{}", format_type(file, t)))
                    .unwrap_or_else(|| "...unknown".to_string());
                match child.child_by_field_name("name") {
                    Some(name) => params.push(Parameter::named(file.text(name), ty)),
                    None => params.push(Parameter::unnamed(ty)),
                }
            }
            _ => {}
        }
    }
    params
}

fn extract_results(file: &ParsedFile, result: Node<'_>) -> Vec<String> {
    if result.kind() == "parameter_list" {
        extract_parameters(file, result)
            .into_iter()
            .map(|p| p.ty)
            .collect()
    } else {
        vec![format_type(file, result)]
    }
}

/// Canonical textual notation of a type expression.
pub(crate) fn format_type(file: &ParsedFile, node: Node<'_>) -> String {
    let child = |field: &str| {
        node.child_by_field_name(field)
            .map(|n| format_type(file, n))
            .unwrap_or_else(|| "unknown".to_string())
    };
    let first_named = || {
        node.named_child(0)
            .map(|n| format_type(file, n))
            .unwrap_or_else(|| "unknown".to_string())
    };

    match node.kind() {
        "type_identifier" | "identifier" | "package_identifier" => file.text(node).to_string(),
        "qualified_type" => format!("{}.{}", child("package"), child("name")),
        "pointer_type" => format!("*{}", first_named()),
        "slice_type" | "array_type" | "implicit_length_array_type" => {
            format!("[]{}", child("element"))
        }
        "map_type" => format!("map[{}]{}", child("key"), child("value")),
        "channel_type" => format!("chan {}", child("value")),
        "interface_type" => "interface{}".to_string(),
        "struct_type" => "struct{}".to_string(),
        "function_type" => "func".to_string(),
        "parenthesized_type" => first_named(),
        "generic_type" => {
            let args = node
                .child_by_field_name("type_arguments")
                .map(|a| file.text(a).to_string())
                .unwrap_or_default();
            format!("{}{}", child("type"), args)
        }
        _ => "unknown".to_string(),
    }
}

// ── Imports ──

fn extract_imports(file: &ParsedFile, node: Node<'_>, imports: &mut ImportMap) {
    // import_declaration → import_spec | import_spec_list → import_spec*
    let mut specs = Vec::new();
    collect_import_specs(node, &mut specs);

    for spec in specs {
        let Some(path_node) = spec.child_by_field_name("path") else {
            continue;
        };
        let path = file.text(path_node).trim_matches('"').trim_matches('`');
        if path.is_empty() {
            continue;
        }
        let binding = match spec.child_by_field_name("name") {
            Some(alias) if alias.kind() == "package_identifier" => file.text(alias).to_string(),
            Some(_) => continue,
            None => path.rsplit('/').next().unwrap_or(path).to_string(),
        };
        imports.insert(binding, path.to_string());
    }
}

fn collect_import_specs<'a>(node: Node<'a>, specs: &mut Vec<Node<'a>>) {
    for child in node.named_children(&mut node.walk()) {
        match child.kind() {
            "import_spec" => specs.push(child),
            "import_spec_list" => collect_import_specs(child, specs),
            _ => {}
        }
    }
}

// ── Calls ──

/// Pre-order walk recording each call before the calls nested in it.
fn collect_calls(
    file: &ParsedFile,
    node: Node<'_>,
    seen: &mut HashSet<String>,
    calls: &mut Vec<String>,
) {
    if node.kind() == "call_expression" {
        if let Some(name) = node
            .child_by_field_name("function")
            .and_then(|f| call_name(file, f))
        {
            if seen.insert(name.clone()) {
                calls.push(name);
            }
        }
    }

    for child in node.named_children(&mut node.walk()) {
        collect_calls(file, child, seen, calls);
    }
}

/// `f(...)` → `f`, `pkg.F(...)` → `pkg.F`, `a.b.F(...)` → `F`.
fn call_name(file: &ParsedFile, func: Node<'_>) -> Option<String> {
    match func.kind() {
        "identifier" => Some(file.text(func).to_string()),
        "selector_expression" => {
            let field = file.text(func.child_by_field_name("field")?);
            match func.child_by_field_name("operand") {
                Some(operand) if operand.kind() == "identifier" => {
                    Some(format!("{}.{}", file.text(operand), field))
                }
                _ => Some(field.to_string()),
            }
        }
        _ => None,
    }
}
