//! Configuration for a pipeline instance.
//!
//! Everything the runner needs to locate and version its artifacts is
//! explicit here; nothing is derived from global state.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for one pipeline instance.
///
/// The `(name, version)` pair scopes every artifact this pipeline writes:
/// bumping `version` invalidates all prior artifacts without deleting them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Pipeline name, used as the artifact filename prefix
    pub name: String,

    /// Folder for artifact files (created if missing)
    pub storage_dir: PathBuf,

    /// Artifact version (default: 1)
    #[serde(default = "default_version")]
    pub version: u32,
}

fn default_version() -> u32 {
    1
}

impl PipelineConfig {
    /// Create a configuration with the default version.
    pub fn new(name: impl Into<String>, storage_dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            storage_dir: storage_dir.into(),
            version: default_version(),
        }
    }

    /// Set the artifact version.
    pub fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_owned(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_owned(),
            source: e,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Duplicate step id {step_id} ('{name}' collides with '{other}')")]
    DuplicateStepId {
        step_id: u32,
        name: String,
        other: String,
    },

    #[error("Storage path exists but is not a directory: {0}")]
    StorageNotDirectory(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_toml_with_default_version() {
        let config: PipelineConfig = toml::from_str(
            r#"
            name = "demo"
            storage_dir = ".artifacts"
            "#,
        )
        .unwrap();

        assert_eq!(config.name, "demo");
        assert_eq!(config.storage_dir, PathBuf::from(".artifacts"));
        assert_eq!(config.version, 1);
    }

    #[test]
    fn test_from_toml_with_explicit_version() {
        let config: PipelineConfig = toml::from_str(
            r#"
            name = "demo"
            storage_dir = ".artifacts"
            version = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.version, 3);
    }

    #[test]
    fn test_from_file_missing() {
        let err = PipelineConfig::from_file(std::path::Path::new("does-not-exist.toml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::FileRead { .. }));
    }
}
