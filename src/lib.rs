//! stepwise - Resumable step-based pipeline runner with durable artifacts.
//!
//! ## Architecture
//!
//! - **Artifact Codec**: encodes one step output to a byte stream and back,
//!   written in bounded-size chunks so no single write exceeds a storage
//!   backend's limit
//! - **Step Pipeline**: an ordered list of `(id, name, handler)` steps; each
//!   output is persisted immediately after its step completes, so a failed
//!   run restarts from any later step without recomputing earlier ones
//!
//! ## Resume semantics
//!
//! `run(start_from)` trusts artifacts only for steps below `start_from`:
//! steps at or above it always recompute and overwrite, so stale artifacts
//! from a previous partial run are never silently reused. A missing
//! artifact below `start_from` recomputes; an unreadable one aborts.
//!
//! Execution is single-threaded and strictly sequential. Concurrent runs
//! against the same `(name, version)` and storage folder are not supported.

pub mod codec;
pub mod logging;
pub mod models;
pub mod pipeline;

// Re-exports for convenience
pub use codec::{ArtifactCodec, ARTIFACT_EXTENSION, DEFAULT_CHUNK_SIZE};
pub use logging::{LogScope, NoopLogger, ProgressLogger, TracingLogger};
pub use models::{BoxError, ConfigError, PipelineConfig, PipelineError, Result};
pub use pipeline::{Outputs, Pipeline, Step, StepDef, StepId};
