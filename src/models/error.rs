//! Error types for stepwise.
//!
//! Taxonomy:
//! - Configuration: invalid pipeline or storage setup (caller mistake)
//! - Io: the artifact folder or an artifact file cannot be touched
//! - Serialization: an output cannot be encoded, or an artifact cannot be
//!   decoded (includes truncated files left by an interrupted write)
//! - Handler: a step handler itself failed; wraps the underlying cause

use std::path::PathBuf;
use thiserror::Error;

/// Boxed error type accepted from step handlers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for stepwise.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(#[from] super::ConfigError),

    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {context}: {path}")]
    Serialization {
        context: String,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Step #{step_id} ({name}) failed")]
    Handler {
        step_id: u32,
        name: String,
        #[source]
        source: BoxError,
    },
}

impl PipelineError {
    /// Create an IO error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a serialization error pointing at the artifact involved.
    pub fn serialization(
        context: impl Into<String>,
        path: impl Into<PathBuf>,
        source: serde_json::Error,
    ) -> Self {
        Self::Serialization {
            context: context.into(),
            path: path.into(),
            source,
        }
    }

    /// Wrap a failure raised by a step handler.
    pub fn handler(step_id: u32, name: impl Into<String>, source: BoxError) -> Self {
        Self::Handler {
            step_id,
            name: name.into(),
            source,
        }
    }
}

/// Result type alias for stepwise.
pub type Result<T> = std::result::Result<T, PipelineError>;
