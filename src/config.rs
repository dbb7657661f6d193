use std::path::Path;

use crate::checkpoint::CheckpointConfig;
use crate::env::EnvConfig;
use crate::error::ConfigError;
use crate::reward::{RewardConfig, SUB_REWARD_NAMES};
use crate::training::{PpoConfig, TrainingConfig};

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub env: EnvConfig,
    pub ppo: PpoConfig,
    pub reward: RewardConfig,
    pub checkpoint: CheckpointConfig,
    pub training: TrainingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Env
        if self.env.tick_skip == 0 {
            return Err(ConfigError::Validation("env.tick_skip must be > 0".into()));
        }
        if self.env.team_size == 0 {
            return Err(ConfigError::Validation("env.team_size must be > 0".into()));
        }
        if self.env.num_instances == 0 {
            return Err(ConfigError::Validation(
                "env.num_instances must be >= 1".into(),
            ));
        }
        if !self.env.timeout_seconds.is_finite() || self.env.timeout_seconds <= 0.0 {
            return Err(ConfigError::Validation(
                "env.timeout_seconds must be finite and > 0".into(),
            ));
        }
        if !self.env.half_life_seconds.is_finite() || self.env.half_life_seconds <= 0.0 {
            return Err(ConfigError::Validation(
                "env.half_life_seconds must be finite and > 0".into(),
            ));
        }

        // PPO
        if self.ppo.learning_rate.is_nan() || self.ppo.learning_rate <= 0.0 {
            return Err(ConfigError::Validation(
                "ppo.learning_rate must be > 0".into(),
            ));
        }
        if self.ppo.target_steps == 0 {
            return Err(ConfigError::Validation(
                "ppo.target_steps must be > 0".into(),
            ));
        }
        if self.ppo.n_epochs == 0 {
            return Err(ConfigError::Validation("ppo.n_epochs must be > 0".into()));
        }
        if self.ppo.ent_coef < 0.0 {
            return Err(ConfigError::Validation(
                "ppo.ent_coef must be >= 0".into(),
            ));
        }
        if self.ppo.vf_coef < 0.0 {
            return Err(ConfigError::Validation("ppo.vf_coef must be >= 0".into()));
        }
        if self.ppo.policy.shared_layers.contains(&0)
            || self.ppo.policy.policy_layers.contains(&0)
            || self.ppo.policy.value_layers.contains(&0)
        {
            return Err(ConfigError::Validation(
                "ppo.policy layer sizes must be > 0".into(),
            ));
        }

        // Reward
        if self.reward.weights.len() != SUB_REWARD_NAMES.len() {
            return Err(ConfigError::Validation(format!(
                "reward.weights must have {} entries ({}), got {}",
                SUB_REWARD_NAMES.len(),
                SUB_REWARD_NAMES.join(", "),
                self.reward.weights.len()
            )));
        }

        // Checkpoint
        if self.checkpoint.latest_name.is_empty() {
            return Err(ConfigError::Validation(
                "checkpoint.latest_name must not be empty".into(),
            ));
        }
        if self.checkpoint.periodic_interval_steps == 0 {
            return Err(ConfigError::Validation(
                "checkpoint.periodic_interval_steps must be > 0".into(),
            ));
        }

        // Training
        if self.training.segment_steps == 0 {
            return Err(ConfigError::Validation(
                "training.segment_steps must be > 0".into(),
            ));
        }
        if self.training.metrics_window == 0 {
            return Err(ConfigError::Validation(
                "training.metrics_window must be >= 1".into(),
            ));
        }
        if self.training.log_interval_episodes == 0 {
            return Err(ConfigError::Validation(
                "training.log_interval_episodes must be >= 1".into(),
            ));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(&AppConfig::default())?)
    }
}
