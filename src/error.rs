use std::path::PathBuf;

/// Errors that can occur during checkpoint operations.
#[derive(Debug, thiserror::Error)]
pub enum CheckpointError {
    #[error("failed to read metadata from {path}: {source}")]
    MetadataRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse metadata from {path}: {source}")]
    MetadataParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("checkpoint {path} was saved for action space {saved:?}, current is {current:?}")]
    IncompatibleEnv {
        path: PathBuf,
        saved: Vec<usize>,
        current: Vec<usize>,
    },

    #[error("history snapshot already exists: {0}")]
    HistoryExists(PathBuf),

    #[error("failed to save model: {0}")]
    ModelSave(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while assembling the reward signal.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RewardConfigError {
    #[error("reward weight count mismatch: {rewards} sub-rewards but {weights} weights")]
    WeightCountMismatch { rewards: usize, weights: usize },

    #[error("reward weight {index} is not finite ({value})")]
    NonFiniteWeight { index: usize, value: f32 },
}

/// Errors raised while building or driving match instances.
#[derive(Debug, thiserror::Error)]
pub enum EnvError {
    #[error("at least one match instance is required")]
    NoInstances,

    #[error("failed to build match instance {index}: {reason}")]
    Factory { index: usize, reason: String },

    #[error("action has {got} components, expected {expected}")]
    ActionArity { expected: usize, got: usize },

    #[error("action component {index} = {value} is outside 0..{bins}")]
    ActionOutOfRange {
        index: usize,
        value: usize,
        bins: usize,
    },
}

/// Errors that can occur during training.
#[derive(Debug, thiserror::Error)]
pub enum TrainingError {
    #[error("learner failed: {0}")]
    Learner(String),

    #[error("checkpoint error: {0}")]
    Checkpoint(#[from] CheckpointError),

    #[error("environment error: {0}")]
    Env(#[from] EnvError),

    #[error("reward configuration error: {0}")]
    Reward(#[from] RewardConfigError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkpoint_error_display() {
        let err = CheckpointError::HistoryExists(PathBuf::from("mmr_models/snapshot_5000000"));
        assert_eq!(
            err.to_string(),
            "history snapshot already exists: mmr_models/snapshot_5000000"
        );
    }

    #[test]
    fn test_reward_error_display() {
        let err = RewardConfigError::WeightCountMismatch {
            rewards: 6,
            weights: 5,
        };
        assert_eq!(
            err.to_string(),
            "reward weight count mismatch: 6 sub-rewards but 5 weights"
        );
    }

    #[test]
    fn test_env_error_display() {
        let err = EnvError::ActionOutOfRange {
            index: 5,
            value: 2,
            bins: 2,
        };
        assert_eq!(err.to_string(), "action component 5 = 2 is outside 0..2");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("ppo.learning_rate must be > 0".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: ppo.learning_rate must be > 0"
        );
    }
}
