//! Artifact codec: durable byte encoding for step outputs.

mod artifact;

pub use artifact::{ArtifactCodec, ARTIFACT_EXTENSION, DEFAULT_CHUNK_SIZE};
