//! The progress logger collaborator.
//!
//! The pipeline only needs `info(message)`; it is injected at construction
//! rather than pulled from a global singleton, so callers can substitute
//! their own sink (or silence progress entirely) without touching process
//! state.

use tracing::info;

/// Capability the pipeline uses for progress reporting.
///
/// Messages are human-oriented and never machine-parsed: they identify the
/// step and whether it was loaded from an artifact or executed.
pub trait ProgressLogger: Send + Sync {
    fn info(&self, message: &str);
}

/// Default logger: forwards to `tracing::info!`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl ProgressLogger for TracingLogger {
    fn info(&self, message: &str) {
        info!("{message}");
    }
}

/// Logger that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLogger;

impl ProgressLogger for NoopLogger {
    fn info(&self, _message: &str) {}
}
