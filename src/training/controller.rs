//! Resume-or-fresh run controller.
//!
//! Picks the learner once at startup (restored from the "latest" snapshot
//! when one is usable, otherwise built fresh), then trains in fixed-size
//! segments aligned to multiples of `segment_steps`, saving the latest and
//! a history snapshot after each one until the stop signal is raised.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::checkpoint::CheckpointStore;
use crate::config::AppConfig;
use crate::env::{EnvSpec, InstancePool, Match};
use crate::error::{EnvError, TrainingError};
use crate::reward::CombinedReward;
use crate::training::callback::{
    checkpoint_cadence, CallbackList, CheckpointCallback, MonitorCallback, StopCallback,
};
use crate::training::metrics::EpisodeMonitor;
use crate::training::sink::{JsonlSink, MetricsSink, NoopSink};
use crate::training::stop::StopSignal;
use crate::training::{Learner, LearnerFactory, RuntimeOverrides, StepCallback};

/// Segmenting and metrics settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Environment steps per training segment.
    pub segment_steps: u64,
    pub metrics_dir: PathBuf,
    /// Finished episodes averaged into the rollout metrics.
    pub metrics_window: usize,
    /// Finished episodes between metric records.
    pub log_interval_episodes: usize,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        TrainingConfig {
            segment_steps: 5_000_000,
            metrics_dir: PathBuf::from("logs"),
            metrics_window: 100,
            log_interval_episodes: 100,
        }
    }
}

/// Steps needed to reach the next multiple of `segment` strictly above
/// `elapsed`.
pub fn segment_length(elapsed: u64, segment: u64) -> u64 {
    segment - elapsed % segment
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Resuming,
    Fresh,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunState {
    pub mode: RunMode,
    pub elapsed_timesteps: u64,
    /// Only true before the first segment of a fresh run.
    pub reset_num_timesteps: bool,
    /// Segments that reached their boundary in this process.
    pub segments_completed: u64,
    /// Learner steps counted toward the next periodic snapshot. Carried
    /// across segments so the cadence does not restart at each boundary.
    pub periodic_calls: u64,
}

/// Outcome of one `learn` call.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentReport {
    pub requested_timesteps: u64,
    /// Cumulative step count when the segment ended.
    pub num_timesteps: u64,
    /// False when the stop signal cut the segment short.
    pub completed: bool,
    pub latest: PathBuf,
    pub history: Option<PathBuf>,
    pub periodic: Vec<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub mode: RunMode,
    pub num_timesteps: u64,
    pub segments: Vec<SegmentReport>,
}

pub struct RunController<F: LearnerFactory> {
    config: AppConfig,
    factory: F,
    store: CheckpointStore,
    monitor: EpisodeMonitor,
    sink: Box<dyn MetricsSink>,
}

impl<F: LearnerFactory> RunController<F> {
    /// Validate the configuration and open the JSONL metrics sink under
    /// `training.metrics_dir`. If the sink cannot be opened metrics are
    /// discarded.
    pub fn new(config: AppConfig, factory: F) -> Result<Self, TrainingError> {
        let sink: Box<dyn MetricsSink> = match JsonlSink::create(&config.training.metrics_dir) {
            Ok(sink) => Box::new(sink),
            Err(e) => {
                tracing::warn!(
                    dir = %config.training.metrics_dir.display(),
                    error = %e,
                    "cannot open metrics sink, metrics will be discarded"
                );
                Box::new(NoopSink)
            }
        };
        Self::with_sink(config, factory, sink)
    }

    pub fn with_sink(
        config: AppConfig,
        factory: F,
        sink: Box<dyn MetricsSink>,
    ) -> Result<Self, TrainingError> {
        config.validate()?;
        // A reward that cannot be built would fail every instance.
        config.reward.build()?;
        let store = CheckpointStore::new(config.checkpoint.clone());
        let monitor = EpisodeMonitor::with_capacity(config.training.metrics_window);
        Ok(RunController {
            config,
            factory,
            store,
            monitor,
            sink,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn store(&self) -> &CheckpointStore {
        &self.store
    }

    pub fn monitor(&self) -> &EpisodeMonitor {
        &self.monitor
    }

    /// Launch `env.num_instances` matches, handing each its own combined
    /// reward.
    pub fn launch_instances<B>(&self, build_match: B) -> Result<InstancePool, TrainingError>
    where
        B: Fn(usize, CombinedReward) -> Result<Match, EnvError>,
    {
        let reward = &self.config.reward;
        let pool = InstancePool::launch(self.config.env.num_instances, |index| {
            let combined = reward.build().map_err(|e| EnvError::Factory {
                index,
                reason: e.to_string(),
            })?;
            build_match(index, combined)
        })?;
        tracing::info!(
            instances = pool.num_instances(),
            envs = pool.num_envs(),
            "match instances launched"
        );
        Ok(pool)
    }

    /// Restore from the latest snapshot or build a fresh learner.
    pub fn start(&self, env: &EnvSpec) -> Result<(F::Learner, RunState), TrainingError> {
        let overrides = RuntimeOverrides {
            learning_rate: self.config.ppo.learning_rate,
            env: env.clone(),
        };

        match self.store.load_latest(&env.action_space) {
            Ok(Some(data)) => match self.factory.restore(&data, &overrides) {
                Ok(learner) => {
                    tracing::info!(
                        path = %data.path.display(),
                        num_timesteps = data.metadata.num_timesteps,
                        "resuming from checkpoint"
                    );
                    let state = RunState {
                        mode: RunMode::Resuming,
                        elapsed_timesteps: data.metadata.num_timesteps,
                        reset_num_timesteps: false,
                        segments_completed: 0,
                        periodic_calls: 0,
                    };
                    return Ok((learner, state));
                }
                Err(e) => tracing::warn!(
                    path = %data.path.display(),
                    error = %e,
                    "failed to restore checkpoint, starting fresh"
                ),
            },
            Ok(None) => tracing::info!(
                path = %self.store.latest_path().display(),
                "no checkpoint found, starting fresh"
            ),
            Err(e) => tracing::warn!(error = %e, "checkpoint unusable, starting fresh"),
        }

        let hyperparameters = self.config.ppo.hyperparameters(&self.config.env);
        let learner = self
            .factory
            .create(&hyperparameters, &self.config.ppo.policy, env)
            .map_err(|e| TrainingError::Learner(e.to_string()))?;
        let state = RunState {
            mode: RunMode::Fresh,
            elapsed_timesteps: 0,
            reset_num_timesteps: true,
            segments_completed: 0,
            periodic_calls: 0,
        };
        Ok((learner, state))
    }

    /// Train up to the next segment boundary, then save the latest
    /// snapshot, plus a history snapshot if the boundary was reached.
    pub fn run_segment(
        &mut self,
        learner: &mut F::Learner,
        state: &mut RunState,
        stop: &StopSignal,
    ) -> Result<SegmentReport, TrainingError> {
        let requested = segment_length(state.elapsed_timesteps, self.config.training.segment_steps);
        let target = state.elapsed_timesteps + requested;
        tracing::info!(segment_end = target, "training for {requested} timesteps");

        let save_freq = checkpoint_cadence(
            self.store.config().periodic_interval_steps,
            self.config.env.num_instances,
        );
        let periodic = {
            let mut checkpoint_cb =
                CheckpointCallback::resume(&self.store, save_freq, state.periodic_calls);
            let mut monitor_cb = MonitorCallback::new(
                &mut self.monitor,
                &mut *self.sink,
                self.config.training.log_interval_episodes,
            );
            let mut stop_cb = StopCallback::new(stop.clone());
            let mut callbacks = CallbackList::new(vec![
                &mut checkpoint_cb as &mut dyn StepCallback,
                &mut monitor_cb,
                &mut stop_cb,
            ]);
            learner
                .learn(requested, state.reset_num_timesteps, &mut callbacks)
                .map_err(|e| TrainingError::Learner(e.to_string()))?;
            callbacks.on_training_end(&*learner);
            drop(callbacks);
            state.periodic_calls = checkpoint_cb.n_calls();
            checkpoint_cb.saved().to_vec()
        };

        state.elapsed_timesteps = learner.num_timesteps();
        state.reset_num_timesteps = false;
        let completed = state.elapsed_timesteps >= target;

        let latest = self.store.save_latest(&*learner)?;
        let history = if completed {
            state.segments_completed += 1;
            Some(self.store.save_history(&*learner)?)
        } else {
            tracing::info!(
                num_timesteps = state.elapsed_timesteps,
                segment_end = target,
                "segment interrupted, skipping history snapshot"
            );
            None
        };

        Ok(SegmentReport {
            requested_timesteps: requested,
            num_timesteps: state.elapsed_timesteps,
            completed,
            latest,
            history,
            periodic,
        })
    }

    /// Run segments until `stop` is raised.
    pub fn run(&mut self, env: &EnvSpec, stop: &StopSignal) -> Result<RunSummary, TrainingError> {
        let hyperparameters = self.config.ppo.hyperparameters(&self.config.env);
        tracing::info!(
            fps = self.config.env.fps(),
            gamma = hyperparameters.gamma,
            n_steps = hyperparameters.n_steps,
            num_envs = env.num_envs,
            "training parameters"
        );

        let (mut learner, mut state) = self.start(env)?;
        let mut segments = Vec::new();
        while !stop.is_raised() {
            segments.push(self.run_segment(&mut learner, &mut state, stop)?);
        }

        tracing::info!(
            num_timesteps = state.elapsed_timesteps,
            segments = segments.len(),
            "training stopped"
        );
        Ok(RunSummary {
            mode: state.mode,
            num_timesteps: state.elapsed_timesteps,
            segments,
        })
    }
}
