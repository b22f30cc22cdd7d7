//! Shared models: configuration and error types.

mod config;
mod error;

pub use config::{ConfigError, PipelineConfig};
pub use error::{BoxError, PipelineError, Result};
