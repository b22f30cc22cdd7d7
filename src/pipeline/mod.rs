//! Step pipeline: declarations, descriptors and the runner.

mod runner;
mod step;

pub use runner::Pipeline;
pub use step::{Outputs, Step, StepDef, StepHandler, StepId};
