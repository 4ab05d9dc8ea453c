//! Language detection and tree-sitter grammar loading.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tree_sitter::Language;

use crate::error::CtreeError;

/// Languages with a working analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportedLanguage {
    Go,
}

impl SupportedLanguage {
    /// Detect language from file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        match ext {
            "go" => Some(SupportedLanguage::Go),
            _ => None,
        }
    }

    /// Get the tree-sitter Language for this language.
    pub fn tree_sitter_language(&self) -> Language {
        match self {
            SupportedLanguage::Go => tree_sitter_go::LANGUAGE.into(),
        }
    }

    /// Get the display name.
    pub fn name(&self) -> &'static str {
        match self {
            SupportedLanguage::Go => "Go",
        }
    }

    /// Identifier written to the `language` field of the analysis record.
    pub fn id(&self) -> &'static str {
        match self {
            SupportedLanguage::Go => "go",
        }
    }
}

impl fmt::Display for SupportedLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SupportedLanguage {
    type Err = CtreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "go" | "golang" => Ok(SupportedLanguage::Go),
            _ => Err(CtreeError::UnsupportedLanguage(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(
            SupportedLanguage::from_path(Path::new("cmd/main.go")),
            Some(SupportedLanguage::Go)
        );
        assert_eq!(SupportedLanguage::from_path(Path::new("main.py")), None);
        assert_eq!(SupportedLanguage::from_path(Path::new("Makefile")), None);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("golang".parse::<SupportedLanguage>().unwrap(), SupportedLanguage::Go);
        assert_eq!("Go".parse::<SupportedLanguage>().unwrap(), SupportedLanguage::Go);
        assert!(matches!(
            "python".parse::<SupportedLanguage>(),
            Err(CtreeError::UnsupportedLanguage(_))
        ));
    }
}
