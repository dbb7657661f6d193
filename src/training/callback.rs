use std::path::PathBuf;

use crate::checkpoint::CheckpointStore;
use crate::training::metrics::EpisodeMonitor;
use crate::training::sink::MetricsSink;
use crate::training::stop::StopSignal;
use crate::training::{Learner, StepCallback, StepControl, StepInfo};

/// Per-instance step count between periodic snapshots, chosen so the
/// absolute interval stays roughly constant whatever the parallelism.
pub fn checkpoint_cadence(interval_steps: u64, num_instances: usize) -> u64 {
    let per_instance = interval_steps as f64 / num_instances.max(1) as f64;
    (per_instance.round() as u64).max(1)
}

/// Writes a periodic snapshot every `save_freq` callback invocations.
/// A failed save is logged and training continues.
pub struct CheckpointCallback<'a> {
    store: &'a CheckpointStore,
    save_freq: u64,
    n_calls: u64,
    saved: Vec<PathBuf>,
}

impl<'a> CheckpointCallback<'a> {
    pub fn new(store: &'a CheckpointStore, save_freq: u64) -> Self {
        CheckpointCallback {
            store,
            save_freq: save_freq.max(1),
            n_calls: 0,
            saved: Vec::new(),
        }
    }

    /// Continue a cadence that already counted `n_calls` steps.
    pub fn resume(store: &'a CheckpointStore, save_freq: u64, n_calls: u64) -> Self {
        CheckpointCallback {
            n_calls,
            ..Self::new(store, save_freq)
        }
    }

    pub fn n_calls(&self) -> u64 {
        self.n_calls
    }

    /// Snapshots written so far, oldest first.
    pub fn saved(&self) -> &[PathBuf] {
        &self.saved
    }
}

impl StepCallback for CheckpointCallback<'_> {
    fn on_step(&mut self, learner: &dyn Learner, _info: &StepInfo<'_>) -> StepControl {
        self.n_calls += 1;
        if self.n_calls % self.save_freq == 0 {
            match self.store.save_periodic(learner) {
                Ok(path) => {
                    tracing::info!(path = %path.display(), "periodic checkpoint saved");
                    self.saved.push(path);
                }
                Err(e) => tracing::error!(error = %e, "periodic checkpoint failed"),
            }
        }
        StepControl::Continue
    }
}

/// Feeds step rewards into the episode monitor and forwards rolling
/// episode statistics to the metrics sink.
pub struct MonitorCallback<'a> {
    monitor: &'a mut EpisodeMonitor,
    sink: &'a mut dyn MetricsSink,
    log_interval: usize,
    episodes_at_last_log: usize,
}

impl<'a> MonitorCallback<'a> {
    pub fn new(
        monitor: &'a mut EpisodeMonitor,
        sink: &'a mut dyn MetricsSink,
        log_interval: usize,
    ) -> Self {
        let episodes_at_last_log = monitor.total_episodes();
        MonitorCallback {
            monitor,
            sink,
            log_interval: log_interval.max(1),
            episodes_at_last_log,
        }
    }

    fn emit(&mut self, step: u64) {
        let window = self.monitor.capacity();
        self.sink
            .record_scalar("rollout/ep_rew_mean", step, self.monitor.mean_reward(window) as f64);
        self.sink
            .record_scalar("rollout/ep_len_mean", step, self.monitor.mean_length(window) as f64);
        self.episodes_at_last_log = self.monitor.total_episodes();
    }
}

impl StepCallback for MonitorCallback<'_> {
    fn on_step(&mut self, learner: &dyn Learner, info: &StepInfo<'_>) -> StepControl {
        self.monitor.record_step(info.rewards, info.dones);
        if self.monitor.total_episodes() - self.episodes_at_last_log >= self.log_interval {
            self.emit(learner.num_timesteps());
        }
        StepControl::Continue
    }

    fn on_training_end(&mut self, learner: &dyn Learner) {
        if self.monitor.total_episodes() > self.episodes_at_last_log {
            self.emit(learner.num_timesteps());
        }
        self.sink.flush();
    }
}

/// Asks the learner to stop once the stop signal is raised.
pub struct StopCallback {
    stop: StopSignal,
}

impl StopCallback {
    pub fn new(stop: StopSignal) -> Self {
        StopCallback { stop }
    }
}

impl StepCallback for StopCallback {
    fn on_step(&mut self, _learner: &dyn Learner, _info: &StepInfo<'_>) -> StepControl {
        if self.stop.is_raised() {
            StepControl::Stop
        } else {
            StepControl::Continue
        }
    }
}

/// Runs several callbacks in order. Every callback sees every step; the
/// list stops if any member asks to.
pub struct CallbackList<'a> {
    callbacks: Vec<&'a mut dyn StepCallback>,
}

impl<'a> CallbackList<'a> {
    pub fn new(callbacks: Vec<&'a mut dyn StepCallback>) -> Self {
        CallbackList { callbacks }
    }
}

impl StepCallback for CallbackList<'_> {
    fn on_step(&mut self, learner: &dyn Learner, info: &StepInfo<'_>) -> StepControl {
        let mut control = StepControl::Continue;
        for callback in &mut self.callbacks {
            if callback.on_step(learner, info) == StepControl::Stop {
                control = StepControl::Stop;
            }
        }
        control
    }

    fn on_training_end(&mut self, learner: &dyn Learner) {
        for callback in &mut self.callbacks {
            callback.on_training_end(learner);
        }
    }
}
