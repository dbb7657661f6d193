use serde::{Deserialize, Serialize};

use crate::env::EnvSpec;

/// PPO hyperparameters recorded in checkpoint metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PpoHyperparameters {
    pub learning_rate: f64,
    pub gamma: f64,
    pub n_steps: usize,
    pub batch_size: usize,
    pub n_epochs: usize,
    pub ent_coef: f64,
    pub vf_coef: f64,
}

/// Top-level checkpoint metadata written to metadata.json.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckpointMetadata {
    /// Cumulative environment steps at save time.
    pub num_timesteps: u64,
    pub timestamp: u64,
    pub algorithm: String,
    pub hyperparameters: PpoHyperparameters,
    /// Environment the weights were trained against.
    pub env: EnvSpec,
}
