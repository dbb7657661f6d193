use std::error::Error;
use std::path::Path;

use crate::checkpoint::{CheckpointData, PpoHyperparameters};
use crate::env::EnvSpec;
use crate::training::ppo::PolicyConfig;

/// Error type returned across the learner seam.
pub type LearnerError = Box<dyn Error + Send + Sync>;

/// Per-step statistics the learner reports to callbacks, one entry per env.
#[derive(Debug, Clone, Copy)]
pub struct StepInfo<'a> {
    pub rewards: &'a [f32],
    pub dones: &'a [bool],
}

/// Whether the learner should keep going after a callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepControl {
    Continue,
    Stop,
}

/// Hook invoked by the learner once per vectorized environment step.
pub trait StepCallback {
    fn on_step(&mut self, learner: &dyn Learner, info: &StepInfo<'_>) -> StepControl;

    /// Called by the run controller once `learn` has returned.
    fn on_training_end(&mut self, _learner: &dyn Learner) {}
}

/// The policy optimizer. Implemented outside this crate (PPO over the
/// instance pool); the run controller only sequences calls into it.
pub trait Learner {
    /// Algorithm name recorded in checkpoints ("PPO").
    fn algorithm_name(&self) -> &str;

    /// Cumulative environment steps taken.
    fn num_timesteps(&self) -> u64;

    fn hyperparameters(&self) -> PpoHyperparameters;

    fn env_spec(&self) -> EnvSpec;

    /// Train for `total_timesteps` more steps. With `reset_num_timesteps`
    /// the step counter restarts at zero first. Must call
    /// `callback.on_step` after every vectorized step and return early when
    /// it answers [`StepControl::Stop`].
    fn learn(
        &mut self,
        total_timesteps: u64,
        reset_num_timesteps: bool,
        callback: &mut dyn StepCallback,
    ) -> Result<(), LearnerError>;

    /// Write network weights and optimizer state into `dir`.
    fn save_weights_to_dir(&self, dir: &Path) -> Result<(), LearnerError>;
}

/// Run-time parameters that follow the current deployment rather than the
/// values stored in a checkpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeOverrides {
    pub learning_rate: f64,
    pub env: EnvSpec,
}

/// Builds learners, either from scratch or from a saved checkpoint.
pub trait LearnerFactory {
    type Learner: Learner;

    fn create(
        &self,
        hyperparameters: &PpoHyperparameters,
        policy: &PolicyConfig,
        env: &EnvSpec,
    ) -> Result<Self::Learner, LearnerError>;

    /// Restore weights from `checkpoint.path`. The step counter must resume
    /// at `checkpoint.metadata.num_timesteps`.
    fn restore(
        &self,
        checkpoint: &CheckpointData,
        overrides: &RuntimeOverrides,
    ) -> Result<Self::Learner, LearnerError>;
}
