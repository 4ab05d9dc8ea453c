//! Configuration loading from `etc/app.toml` or `~/.ctree/config.toml`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{CtreeError, Result};
use crate::graph::locator::DiscoveryOptions;

/// Project-local config file, relative to the working directory.
pub const LOCAL_CONFIG: &str = "etc/app.toml";

/// Per-user config file, relative to the home directory.
pub const USER_CONFIG: &str = ".ctree/config.toml";

/// Settings read from a config file. Command-line flags take precedence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CtreeConfig {
    /// Default analysis root.
    pub source_path: Option<PathBuf>,
    /// Default output file (stdout when unset).
    pub output_path: Option<PathBuf>,
    pub recursive: bool,
    pub max_depth: usize,
    /// Globs of files or directories to leave out.
    pub exclude_files: Vec<String>,
    /// Globs restricting analysis to matching files.
    pub include_files: Vec<String>,
    /// Default output format: yaml, json or text.
    pub format: Option<String>,
    /// Colour text output on terminals.
    pub color: bool,
}

impl Default for CtreeConfig {
    fn default() -> Self {
        Self {
            source_path: None,
            output_path: None,
            recursive: true,
            max_depth: 10,
            exclude_files: Vec::new(),
            include_files: Vec::new(),
            format: None,
            color: true,
        }
    }
}

impl CtreeConfig {
    /// Parse a config file. Read and syntax failures are `Config` errors.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| CtreeError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| CtreeError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load configuration.
    ///
    /// An explicit path must load. Otherwise the first existing default
    /// location is used, and a broken file there only produces a warning.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            debug!(path = %path.display(), "loading config");
            return Self::from_file(path);
        }

        let home = dirs::home_dir();
        match find_config(Path::new("."), home.as_deref()) {
            Some(path) => match Self::from_file(&path) {
                Ok(config) => {
                    debug!(path = %path.display(), "loaded config");
                    Ok(config)
                }
                Err(e) => {
                    warn!("{}; using defaults", e);
                    Ok(Self::default())
                }
            },
            None => Ok(Self::default()),
        }
    }

    /// Walk options derived from this config.
    pub fn discovery_options(&self) -> DiscoveryOptions {
        DiscoveryOptions {
            recursive: self.recursive,
            max_depth: self.max_depth,
            include: self.include_files.clone(),
            exclude: self.exclude_files.clone(),
        }
    }
}

/// First existing config file: `<base>/etc/app.toml`, then `<home>/.ctree/config.toml`.
pub fn find_config(base: &Path, home: Option<&Path>) -> Option<PathBuf> {
    let local = base.join(LOCAL_CONFIG);
    if local.is_file() {
        return Some(local);
    }
    home.map(|h| h.join(USER_CONFIG)).filter(|p| p.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = CtreeConfig::default();
        assert!(config.recursive);
        assert_eq!(config.max_depth, 10);
        assert!(config.color);
        assert!(config.source_path.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app.toml");
        fs::write(
            &path,
            r#"
source_path = "./cmd"
max_depth = 4
exclude_files = ["gen/", "*_mock.go"]
"#,
        )
        .unwrap();

        let config = CtreeConfig::from_file(&path).unwrap();
        assert_eq!(config.source_path, Some(PathBuf::from("./cmd")));
        assert_eq!(config.max_depth, 4);
        assert!(config.recursive);

        let options = config.discovery_options();
        assert_eq!(options.max_depth, 4);
        assert_eq!(options.exclude, vec!["gen/", "*_mock.go"]);
        assert!(options.include.is_empty());
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app.toml");
        fs::write(&path, "max_depth = \"deep\"").unwrap();

        let err = CtreeConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, CtreeError::Config { .. }));
        assert!(CtreeConfig::load(Some(&path)).is_err());
        assert!(CtreeConfig::load(Some(&dir.path().join("missing.toml"))).is_err());
    }

    #[test]
    fn test_find_config_prefers_local() {
        let base = tempdir().unwrap();
        let home = tempdir().unwrap();
        assert!(find_config(base.path(), Some(home.path())).is_none());

        let user = home.path().join(USER_CONFIG);
        fs::create_dir_all(user.parent().unwrap()).unwrap();
        fs::write(&user, "").unwrap();
        assert_eq!(find_config(base.path(), Some(home.path())), Some(user));

        let local = base.path().join(LOCAL_CONFIG);
        fs::create_dir_all(local.parent().unwrap()).unwrap();
        fs::write(&local, "").unwrap();
        assert_eq!(find_config(base.path(), Some(home.path())), Some(local));
        assert_eq!(find_config(base.path(), None), Some(base.path().join(LOCAL_CONFIG)));
    }
}
