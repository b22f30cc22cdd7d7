//! Chunked serialization of step outputs to artifact files.
//!
//! The codec encodes one output value into a single in-memory buffer, then
//! writes it in bounded-size chunks so no single write exceeds a storage
//! backend's maximum write size. Reads concatenate transparently: the chunk
//! size never appears in the on-disk format.

use crate::models::{PipelineError, Result};
use serde_json::Value;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::num::NonZeroUsize;
use std::path::Path;
use tracing::debug;

/// File extension for artifact files.
pub const ARTIFACT_EXTENSION: &str = "json";

/// Default maximum bytes per write. Large enough that chunking is a no-op
/// for ordinary outputs.
pub const DEFAULT_CHUNK_SIZE: usize = 1 << 30;

/// Encodes step outputs to artifact files and back.
#[derive(Debug, Clone)]
pub struct ArtifactCodec {
    chunk_size: NonZeroUsize,
}

impl Default for ArtifactCodec {
    fn default() -> Self {
        Self {
            chunk_size: NonZeroUsize::new(DEFAULT_CHUNK_SIZE).unwrap(),
        }
    }
}

impl ArtifactCodec {
    /// Create a codec with an explicit maximum write size.
    pub fn with_chunk_size(chunk_size: NonZeroUsize) -> Self {
        Self { chunk_size }
    }

    /// Serialize `value` and write it to `path`, overwriting any existing
    /// file. The encoded buffer is written in chunks of at most the
    /// configured size.
    pub fn store(&self, value: &Value, path: &Path) -> Result<()> {
        let encoded = serde_json::to_vec(value)
            .map_err(|e| PipelineError::serialization("encoding artifact", path, e))?;

        let file = File::create(path)
            .map_err(|e| PipelineError::io(format!("creating artifact {}", path.display()), e))?;
        let mut writer = BufWriter::new(file);

        for chunk in encoded.chunks(self.chunk_size.get()) {
            writer
                .write_all(chunk)
                .map_err(|e| PipelineError::io(format!("writing artifact {}", path.display()), e))?;
        }

        writer
            .flush()
            .map_err(|e| PipelineError::io(format!("flushing artifact {}", path.display()), e))?;

        debug!(path = %path.display(), bytes = encoded.len(), "Artifact stored");
        Ok(())
    }

    /// Read the full byte stream at `path` and decode it.
    ///
    /// A file that exists but does not decode is corruption, not a cache
    /// miss; it surfaces as a serialization error.
    pub fn load(&self, path: &Path) -> Result<Value> {
        let bytes = std::fs::read(path)
            .map_err(|e| PipelineError::io(format!("reading artifact {}", path.display()), e))?;

        let value = serde_json::from_slice(&bytes)
            .map_err(|e| PipelineError::serialization("decoding artifact", path, e))?;

        debug!(path = %path.display(), bytes = bytes.len(), "Artifact loaded");
        Ok(value)
    }
}
