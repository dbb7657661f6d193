//! Training infrastructure: the learner seam, step callbacks (periodic
//! checkpoints, episode metrics, stop requests), metric sinks and the
//! resume-or-fresh run controller.

pub mod callback;
pub mod controller;
pub mod learner;
pub mod metrics;
pub mod ppo;
pub mod sink;
pub mod stop;
#[cfg(test)]
pub(crate) mod test_support;

pub use controller::{
    segment_length, RunController, RunMode, RunState, RunSummary, SegmentReport, TrainingConfig,
};
pub use learner::{
    Learner, LearnerError, LearnerFactory, RuntimeOverrides, StepCallback, StepControl, StepInfo,
};
pub use ppo::{Activation, PolicyConfig, PpoConfig};
pub use stop::StopSignal;
