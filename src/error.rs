//! Typed errors for ctree.
//!
//! Fatal conditions (unreadable roots, unsupported variants) abort the
//! invocation; parse failures are recoverable and only drop the offending
//! file from the analysis.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for ctree operations.
#[derive(Error, Debug)]
pub enum CtreeError {
    /// The analysis root is missing or cannot be stat'd.
    #[error("failed to access path {path}: {source}")]
    PathAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A directory could not be listed while walking the source tree.
    #[error("failed to read directory {path}: {message}")]
    DirectoryRead { path: PathBuf, message: String },

    /// A source file could not be parsed.
    #[error("failed to parse {path}: {message}")]
    Parse {
        path: PathBuf,
        message: String,
        /// Line number (1-indexed) if available
        line: Option<usize>,
        /// Column number (1-indexed) if available
        column: Option<usize>,
    },

    /// Discovery finished without finding a single eligible file.
    #[error("no {language} files found in {path}")]
    NoSourceFiles { language: String, path: PathBuf },

    /// The requested framework variant has no implementation.
    #[error("{variant} framework support not implemented yet")]
    UnsupportedVariant { variant: String },

    /// No analyzer exists for the requested language.
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// Unknown output/rendering format.
    #[error("unsupported format: {format} (supported: {supported})")]
    UnsupportedFormat { format: String, supported: String },

    /// An include/exclude glob could not be compiled.
    #[error("invalid file pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// I/O error when reading a record or writing output.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Structured (de)serialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Configuration file errors.
    #[error("config error at {path}: {message}")]
    Config { path: PathBuf, message: String },
}

impl CtreeError {
    /// Create a path access error.
    pub fn path_access(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::PathAccess {
            path: path.into(),
            source: err,
        }
    }

    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source: err,
        }
    }

    /// Create a parse error without location.
    pub fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
            line: None,
            column: None,
        }
    }

    /// Create a parse error with line/column info.
    pub fn parse_at(
        path: impl Into<PathBuf>,
        message: impl Into<String>,
        line: usize,
        column: usize,
    ) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
            line: Some(line),
            column: Some(column),
        }
    }

    pub fn unsupported_format(format: impl Into<String>, supported: &str) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
            supported: supported.to_string(),
        }
    }

    /// Check if this is a recoverable error (the run can continue without the file).
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }

    /// Get the path associated with this error, if any.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::PathAccess { path, .. } => Some(path),
            Self::DirectoryRead { path, .. } => Some(path),
            Self::Parse { path, .. } => Some(path),
            Self::NoSourceFiles { path, .. } => Some(path),
            Self::Io { path, .. } => Some(path),
            Self::Config { path, .. } => Some(path),
            _ => None,
        }
    }
}

impl From<serde_yaml::Error> for CtreeError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for CtreeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Convenience type alias for ctree results.
pub type Result<T> = std::result::Result<T, CtreeError>;
