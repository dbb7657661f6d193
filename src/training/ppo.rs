use serde::{Deserialize, Serialize};

use crate::checkpoint::PpoHyperparameters;
use crate::env::EnvConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    Tanh,
    Relu,
}

/// Network layout: shared trunk, then separate policy and value heads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    pub shared_layers: Vec<usize>,
    pub policy_layers: Vec<usize>,
    pub value_layers: Vec<usize>,
    pub activation: Activation,
    pub device: String,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        PolicyConfig {
            shared_layers: vec![512, 512],
            policy_layers: vec![256, 256, 256],
            value_layers: vec![256, 256, 256],
            activation: Activation::Tanh,
            device: "cpu".to_string(),
        }
    }
}

/// PPO hyperparameters for a fresh model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PpoConfig {
    /// Environment steps gathered per rollout, across all envs.
    pub target_steps: usize,
    pub learning_rate: f64,
    pub n_epochs: usize,
    pub ent_coef: f64,
    pub vf_coef: f64,
    pub policy: PolicyConfig,
}

impl Default for PpoConfig {
    fn default() -> Self {
        PpoConfig {
            target_steps: 100_000,
            learning_rate: 5e-5,
            n_epochs: 1,
            ent_coef: 0.01,
            vf_coef: 1.0,
            policy: PolicyConfig::default(),
        }
    }
}

impl PpoConfig {
    /// Per-env rollout length, so one rollout is about `target_steps`.
    pub fn n_steps(&self, env: &EnvConfig) -> usize {
        (self.target_steps / env.num_envs().max(1)).max(1)
    }

    /// Hyperparameters resolved against the environment: gamma from the
    /// reward half-life, one minibatch per rollout.
    pub fn hyperparameters(&self, env: &EnvConfig) -> PpoHyperparameters {
        let n_steps = self.n_steps(env);
        PpoHyperparameters {
            learning_rate: self.learning_rate,
            gamma: env.gamma(),
            n_steps,
            batch_size: n_steps,
            n_epochs: self.n_epochs,
            ent_coef: self.ent_coef,
            vf_coef: self.vf_coef,
        }
    }
}
