//! In-memory learner, factory and sink for exercising the run controller
//! without a simulator.

use std::cell::RefCell;
use std::fs;
use std::path::Path;

use crate::checkpoint::{CheckpointData, PpoHyperparameters};
use crate::env::EnvSpec;
use crate::training::ppo::PolicyConfig;
use crate::training::sink::MetricsSink;
use crate::training::stop::StopSignal;
use crate::training::{
    Learner, LearnerError, LearnerFactory, RuntimeOverrides, StepCallback, StepControl, StepInfo,
};

pub fn test_env_spec() -> EnvSpec {
    EnvSpec {
        num_instances: 15,
        num_envs: 30,
        action_space: vec![3, 3, 3, 3, 3, 2, 2, 2],
    }
}

pub fn test_hyperparameters() -> PpoHyperparameters {
    PpoHyperparameters {
        learning_rate: 5e-5,
        gamma: 0.99,
        n_steps: 3333,
        batch_size: 3333,
        n_epochs: 1,
        ent_coef: 0.01,
        vf_coef: 1.0,
    }
}

/// Advances `step_size` timesteps per vectorized step and ends an episode
/// in every env every `episode_len` steps.
pub struct FakeLearner {
    pub timesteps: u64,
    pub step_size: u64,
    pub episode_len: u64,
    pub hyperparameters: PpoHyperparameters,
    pub env: EnvSpec,
    pub fail_saves: bool,
    /// `(total_timesteps, reset_num_timesteps)` for every `learn` call.
    pub learn_calls: Vec<(u64, bool)>,
    /// Raise the signal once the step count reaches the threshold.
    pub stop_after: Option<(u64, StopSignal)>,
    calls: u64,
}

impl FakeLearner {
    pub fn at(timesteps: u64) -> Self {
        FakeLearner {
            timesteps,
            step_size: 10_000,
            episode_len: 5,
            hyperparameters: test_hyperparameters(),
            env: test_env_spec(),
            fail_saves: false,
            learn_calls: Vec::new(),
            stop_after: None,
            calls: 0,
        }
    }
}

impl Learner for FakeLearner {
    fn algorithm_name(&self) -> &str {
        "PPO"
    }

    fn num_timesteps(&self) -> u64 {
        self.timesteps
    }

    fn hyperparameters(&self) -> PpoHyperparameters {
        self.hyperparameters.clone()
    }

    fn env_spec(&self) -> EnvSpec {
        self.env.clone()
    }

    fn learn(
        &mut self,
        total_timesteps: u64,
        reset_num_timesteps: bool,
        callback: &mut dyn StepCallback,
    ) -> Result<(), LearnerError> {
        self.learn_calls.push((total_timesteps, reset_num_timesteps));
        if reset_num_timesteps {
            self.timesteps = 0;
        }
        let target = self.timesteps + total_timesteps;
        let rewards = vec![0.5; self.env.num_envs];
        while self.timesteps < target {
            self.timesteps += self.step_size.min(target - self.timesteps);
            self.calls += 1;
            if let Some((threshold, stop)) = &self.stop_after {
                if self.timesteps >= *threshold {
                    stop.raise();
                }
            }
            let done = self.calls % self.episode_len == 0;
            let dones = vec![done; self.env.num_envs];
            let info = StepInfo {
                rewards: &rewards,
                dones: &dones,
            };
            if callback.on_step(&*self, &info) == StepControl::Stop {
                break;
            }
        }
        Ok(())
    }

    fn save_weights_to_dir(&self, dir: &Path) -> Result<(), LearnerError> {
        if self.fail_saves {
            return Err("disk full".into());
        }
        fs::write(dir.join("weights.bin"), self.timesteps.to_le_bytes())?;
        Ok(())
    }
}

/// Records how learners were obtained.
#[derive(Default)]
pub struct FakeFactory {
    pub fail_restore: bool,
    pub stop_after: Option<(u64, StopSignal)>,
    pub created: RefCell<Vec<(PpoHyperparameters, EnvSpec)>>,
    pub restored: RefCell<Vec<(u64, RuntimeOverrides)>>,
}

impl LearnerFactory for FakeFactory {
    type Learner = FakeLearner;

    fn create(
        &self,
        hyperparameters: &PpoHyperparameters,
        _policy: &PolicyConfig,
        env: &EnvSpec,
    ) -> Result<FakeLearner, LearnerError> {
        self.created
            .borrow_mut()
            .push((hyperparameters.clone(), env.clone()));
        let mut learner = FakeLearner::at(0);
        learner.hyperparameters = hyperparameters.clone();
        learner.env = env.clone();
        learner.stop_after = self.stop_after.clone();
        Ok(learner)
    }

    fn restore(
        &self,
        checkpoint: &CheckpointData,
        overrides: &RuntimeOverrides,
    ) -> Result<FakeLearner, LearnerError> {
        if self.fail_restore {
            return Err("tensor shape mismatch".into());
        }
        let stored = fs::read(checkpoint.path.join("weights.bin"))?;
        if stored.len() != 8 {
            return Err("truncated weights".into());
        }
        self.restored
            .borrow_mut()
            .push((checkpoint.metadata.num_timesteps, overrides.clone()));
        let mut learner = FakeLearner::at(checkpoint.metadata.num_timesteps);
        learner.hyperparameters = checkpoint.metadata.hyperparameters.clone();
        learner.hyperparameters.learning_rate = overrides.learning_rate;
        learner.env = overrides.env.clone();
        learner.stop_after = self.stop_after.clone();
        Ok(learner)
    }
}

/// Keeps every scalar in memory.
#[derive(Default)]
pub struct RecordingSink {
    pub scalars: Vec<(String, u64, f64)>,
    pub flushes: usize,
}

impl RecordingSink {
    pub fn series(&self, tag: &str) -> Vec<(u64, f64)> {
        self.scalars
            .iter()
            .filter(|(t, _, _)| t == tag)
            .map(|(_, step, value)| (*step, *value))
            .collect()
    }
}

impl MetricsSink for RecordingSink {
    fn record_scalar(&mut self, tag: &str, step: u64, value: f64) {
        self.scalars.push((tag.to_string(), step, value));
    }

    fn flush(&mut self) {
        self.flushes += 1;
    }
}
