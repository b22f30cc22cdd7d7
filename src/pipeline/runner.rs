//! The pipeline runner: enumerate steps, resume, execute, persist.
//!
//! Resume protocol:
//! - `run(start_from)` trusts artifacts only for steps below `start_from`;
//!   a step at or above `start_from` always recomputes and overwrites.
//! - A missing artifact below `start_from` falls through to execution; an
//!   unreadable one is corruption and aborts the run.
//! - Artifacts are never deleted here; invalidation is done by bumping the
//!   version, which changes every artifact path.
//!
//! Callers must not run two overlapping `run`/`load_outputs` calls against
//! the same `(name, version)` and storage folder: overlapping runs can race
//! on an artifact path. Single-writer usage is an obligation of the caller,
//! not enforced internally.

use crate::codec::{ArtifactCodec, ARTIFACT_EXTENSION};
use crate::logging::{ProgressLogger, TracingLogger};
use crate::models::{ConfigError, PipelineConfig, PipelineError, Result};
use crate::pipeline::step::{Outputs, Step, StepDef, StepId};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// A resumable, step-based pipeline.
///
/// Steps execute strictly sequentially in ascending id order, each output
/// persisted to the storage folder immediately after the step completes.
pub struct Pipeline {
    name: String,
    storage_dir: PathBuf,
    version: u32,
    steps: Vec<StepDef>,
    codec: ArtifactCodec,
    logger: Arc<dyn ProgressLogger>,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("name", &self.name)
            .field("storage_dir", &self.storage_dir)
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

impl Pipeline {
    /// Create a pipeline from its configuration and step declarations.
    ///
    /// Creates the storage folder if missing. Fails with a configuration
    /// error if the storage path exists but is not a directory, or if two
    /// steps share an id.
    pub fn new(config: PipelineConfig, mut steps: Vec<StepDef>) -> Result<Self> {
        if config.storage_dir.exists() && !config.storage_dir.is_dir() {
            return Err(ConfigError::StorageNotDirectory(config.storage_dir).into());
        }
        fs::create_dir_all(&config.storage_dir)
            .map_err(|e| PipelineError::io("creating storage folder", e))?;

        // Declaration order is irrelevant; ids define the total order.
        steps.sort_by_key(StepDef::id);
        for pair in steps.windows(2) {
            if pair[0].id() == pair[1].id() {
                return Err(ConfigError::DuplicateStepId {
                    step_id: pair[0].id(),
                    name: pair[0].name().to_string(),
                    other: pair[1].name().to_string(),
                }
                .into());
            }
        }

        debug!(
            name = %config.name,
            version = config.version,
            steps = steps.len(),
            "Pipeline created"
        );

        Ok(Self {
            name: config.name,
            storage_dir: config.storage_dir,
            version: config.version,
            steps,
            codec: ArtifactCodec::default(),
            logger: Arc::new(TracingLogger),
        })
    }

    /// Replace the default tracing logger.
    pub fn with_logger(mut self, logger: Arc<dyn ProgressLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Replace the default artifact codec.
    pub fn with_codec(mut self, codec: ArtifactCodec) -> Self {
        self.codec = codec;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn storage_dir(&self) -> &std::path::Path {
        &self.storage_dir
    }

    /// Enumerate step descriptors in ascending id order.
    ///
    /// Recomputed on every call from the declarations and the current
    /// `(name, version)` pair.
    pub fn steps(&self) -> Vec<Step> {
        self.steps.iter().map(|def| self.descriptor(def)).collect()
    }

    fn descriptor(&self, def: &StepDef) -> Step {
        let filename = format!(
            "{name}-v{version}-step{step_id}.{ext}",
            name = self.name,
            version = self.version,
            step_id = def.id(),
            ext = ARTIFACT_EXTENSION,
        );
        let artifact_path = self.storage_dir.join(&filename);

        Step {
            step_id: def.id(),
            name: def.name().to_string(),
            filename,
            artifact_path,
        }
    }

    /// Run the pipeline, trusting artifacts for steps below `start_from`.
    ///
    /// A step below `start_from` whose artifact exists is loaded instead of
    /// executed; everything else executes and overwrites its artifact. The
    /// first error aborts the run, leaving earlier artifacts intact.
    pub fn run(&self, start_from: StepId) -> Result<()> {
        let mut outputs = Outputs::new();

        for def in &self.steps {
            let step = self.descriptor(def);
            self.logger.info(&format!("Step #{}", step.step_id));

            if step.step_id < start_from && step.artifact_path.exists() {
                self.logger
                    .info(&format!("Loading artifact from file: {}", step.filename));
                let value = self.codec.load(&step.artifact_path)?;
                outputs.insert(step.name, value);
            } else {
                let output = def
                    .invoke(&outputs)
                    .map_err(|e| PipelineError::handler(step.step_id, &step.name, e))?;

                self.logger
                    .info(&format!("Saving artifact into file: {}", step.filename));
                self.codec.store(&output, &step.artifact_path)?;
                outputs.insert(step.name, output);
            }
        }

        Ok(())
    }

    /// Load whatever has been persisted so far, without executing anything.
    ///
    /// Steps with no artifact are simply absent from the result. Never
    /// creates or modifies any file.
    pub fn load_outputs(&self) -> Result<Outputs> {
        let mut outputs = Outputs::new();

        for def in &self.steps {
            let step = self.descriptor(def);
            if step.artifact_path.exists() {
                outputs.insert(step.name, self.codec.load(&step.artifact_path)?);
            }
        }

        Ok(outputs)
    }
}
