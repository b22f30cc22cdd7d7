//! Progress logging: the injected logger collaborator and timed scopes.

mod progress;
mod scope;

pub use progress::{NoopLogger, ProgressLogger, TracingLogger};
pub use scope::LogScope;
