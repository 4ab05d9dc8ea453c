//! Source discovery: walks a root path and returns the eligible files.
//!
//! Hidden entries and noise directories are pruned, depth is measured
//! from the root directory (root = 0) and entries are visited in file
//! name order so the result is stable across runs.

use ignore::overrides::{Override, OverrideBuilder};
use ignore::WalkBuilder;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{CtreeError, Result};

/// Walk settings shared by every language.
#[derive(Debug, Clone)]
pub struct DiscoveryOptions {
    pub recursive: bool,
    pub max_depth: usize,
    /// Globs a file must match (when non-empty).
    pub include: Vec<String>,
    /// Globs that drop a file or directory.
    pub exclude: Vec<String>,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            recursive: true,
            max_depth: 10,
            include: Vec::new(),
            exclude: Vec::new(),
        }
    }
}

/// Language-specific eligibility rules.
#[derive(Debug, Clone, Copy)]
pub struct SourceFilter {
    pub extensions: &'static [&'static str],
    /// File name suffixes that disqualify an otherwise eligible file.
    pub excluded_suffixes: &'static [&'static str],
    /// Directory names that are never entered.
    pub noise_dirs: &'static [&'static str],
}

impl SourceFilter {
    pub fn accepts(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        let ext_ok = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.contains(&ext));
        ext_ok && !self.excluded_suffixes.iter().any(|s| name.ends_with(s))
    }
}

/// Find all eligible source files under `root`.
///
/// A root that is itself a file yields a single-element list (or nothing
/// when the file is not eligible). Unreadable directories abort the walk.
pub fn find_source_files(
    root: &Path,
    options: &DiscoveryOptions,
    filter: SourceFilter,
) -> Result<Vec<PathBuf>> {
    let metadata = fs::metadata(root).map_err(|e| CtreeError::path_access(root, e))?;
    let root = fs::canonicalize(root).map_err(|e| CtreeError::path_access(root, e))?;

    if !metadata.is_dir() {
        return Ok(if filter.accepts(&root) {
            vec![root]
        } else {
            Vec::new()
        });
    }

    // Entry depth 1 is the root's own listing, so directory depth d maps to d + 1.
    let walk_depth = if options.recursive {
        options.max_depth.saturating_add(1)
    } else {
        1
    };

    let noise_dirs = filter.noise_dirs;
    let mut builder = WalkBuilder::new(&root);
    builder
        .standard_filters(false)
        .hidden(true)
        .max_depth(Some(walk_depth))
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(move |entry| {
            let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
            !(is_dir
                && entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| noise_dirs.contains(&name)))
        });

    if let Some(overrides) = build_overrides(&root, options)? {
        builder.overrides(overrides);
    }

    let mut files = Vec::new();
    for entry in builder.build() {
        let entry = entry.map_err(|e| CtreeError::DirectoryRead {
            path: error_path(&e).unwrap_or(&root).to_path_buf(),
            message: e.to_string(),
        })?;
        if entry.depth() == 0 {
            continue;
        }
        if entry.file_type().is_some_and(|ft| ft.is_file()) && filter.accepts(entry.path()) {
            files.push(entry.into_path());
        }
    }

    debug!(root = %root.display(), count = files.len(), "discovered source files");
    Ok(files)
}

/// The directory a walk error refers to, when the error carries one.
fn error_path(err: &ignore::Error) -> Option<&Path> {
    match err {
        ignore::Error::WithPath { path, .. } => Some(path),
        ignore::Error::Loop { child, .. } => Some(child),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            error_path(err)
        }
        ignore::Error::Partial(errs) => errs.iter().find_map(error_path),
        _ => None,
    }
}

fn build_overrides(root: &Path, options: &DiscoveryOptions) -> Result<Option<Override>> {
    if options.include.is_empty() && options.exclude.is_empty() {
        return Ok(None);
    }

    let invalid = |pattern: &str, err: ignore::Error| CtreeError::InvalidPattern {
        pattern: pattern.to_string(),
        message: err.to_string(),
    };

    let mut builder = OverrideBuilder::new(root);
    for pattern in &options.include {
        builder.add(pattern).map_err(|e| invalid(pattern, e))?;
    }
    for pattern in &options.exclude {
        builder
            .add(&format!("!{}", pattern))
            .map_err(|e| invalid(pattern, e))?;
    }
    let overrides = builder
        .build()
        .map_err(|e| invalid(&options.exclude.join(","), e))?;
    Ok(Some(overrides))
}

/// Render a path relative to the working directory when it lies beneath it.
pub fn display_path(path: &Path) -> String {
    let cwd = std::env::current_dir().and_then(fs::canonicalize);
    if let Ok(cwd) = cwd {
        if let Ok(rel) = path.strip_prefix(&cwd) {
            if rel.as_os_str().is_empty() {
                return ".".to_string();
            }
            return rel.to_string_lossy().to_string();
        }
    }
    path.to_string_lossy().to_string()
}
