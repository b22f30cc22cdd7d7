//! Step declarations and derived step descriptors.

use crate::models::BoxError;
use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;

/// Identifier of a step within a pipeline. Determines execution and resume
/// order; unique within one pipeline.
pub type StepId = u32;

/// Per-run collection of step outputs, keyed by step name in insertion
/// order. Later steps may read any earlier step's output from it.
pub type Outputs = IndexMap<String, Value>;

/// A step's computation: receives the outputs accumulated so far in the
/// current run and produces this step's output value.
pub type StepHandler = Box<dyn Fn(&Outputs) -> Result<Value, BoxError> + Send + Sync>;

/// Declaration of one pipeline step: an id, a stable name and a handler.
///
/// The name is used both as the artifact filename component and as the key
/// under which the step's output appears in [`Outputs`].
pub struct StepDef {
    id: StepId,
    name: String,
    handler: StepHandler,
}

impl StepDef {
    /// Declare a step.
    pub fn new(
        id: StepId,
        name: impl Into<String>,
        handler: impl Fn(&Outputs) -> Result<Value, BoxError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            handler: Box::new(handler),
        }
    }

    pub fn id(&self) -> StepId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke the handler with the outputs produced or loaded so far.
    pub fn invoke(&self, outputs: &Outputs) -> Result<Value, BoxError> {
        (self.handler)(outputs)
    }
}

impl fmt::Debug for StepDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepDef")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// A resolved step descriptor: where this step's artifact lives.
///
/// Recomputed on every enumeration and never cached; it is a descriptor,
/// not a stored resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Step id, ascending execution order
    pub step_id: StepId,
    /// Stable step name, the output mapping key
    pub name: String,
    /// Artifact filename: `{pipeline}-v{version}-step{id}.json`
    pub filename: String,
    /// Full path of the artifact inside the storage folder
    pub artifact_path: PathBuf,
}
