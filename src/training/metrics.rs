use std::collections::VecDeque;

/// Result of a single finished episode in one env slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpisodeResult {
    /// Undiscounted sum of rewards.
    pub reward: f32,
    pub length: u64,
}

/// Accumulates per-env rewards and lengths across vectorized steps and
/// keeps a rolling window of finished episodes.
pub struct EpisodeMonitor {
    running_rewards: Vec<f32>,
    running_lengths: Vec<u64>,
    episode_results: VecDeque<EpisodeResult>,
    capacity: usize,
    total_episodes: usize, // lifetime count, never capped
}

impl EpisodeMonitor {
    pub fn with_capacity(capacity: usize) -> Self {
        EpisodeMonitor {
            running_rewards: Vec::new(),
            running_lengths: Vec::new(),
            episode_results: VecDeque::with_capacity(capacity),
            capacity,
            total_episodes: 0,
        }
    }

    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Record one vectorized step. Returns how many episodes ended on it.
    pub fn record_step(&mut self, rewards: &[f32], dones: &[bool]) -> usize {
        if self.running_rewards.len() != rewards.len() {
            self.running_rewards = vec![0.0; rewards.len()];
            self.running_lengths = vec![0; rewards.len()];
        }

        let mut finished = 0;
        for (i, &reward) in rewards.iter().enumerate() {
            self.running_rewards[i] += reward;
            self.running_lengths[i] += 1;
            if dones.get(i).copied().unwrap_or(false) {
                self.record_episode(EpisodeResult {
                    reward: self.running_rewards[i],
                    length: self.running_lengths[i],
                });
                self.running_rewards[i] = 0.0;
                self.running_lengths[i] = 0;
                finished += 1;
            }
        }
        finished
    }

    pub fn record_episode(&mut self, result: EpisodeResult) {
        self.total_episodes += 1;
        self.episode_results.push_back(result);
        if self.episode_results.len() > self.capacity {
            self.episode_results.pop_front();
        }
    }

    /// Mean episode reward over the last N episodes.
    pub fn mean_reward(&self, last_n: usize) -> f32 {
        let n = self.episode_results.len().min(last_n);
        if n == 0 {
            return 0.0;
        }
        let sum: f32 = self.episode_results.iter().rev().take(n).map(|r| r.reward).sum();
        sum / n as f32
    }

    /// Mean episode length over the last N episodes.
    pub fn mean_length(&self, last_n: usize) -> f32 {
        let n = self.episode_results.len().min(last_n);
        if n == 0 {
            return 0.0;
        }
        let total: u64 = self.episode_results.iter().rev().take(n).map(|r| r.length).sum();
        total as f32 / n as f32
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn total_episodes(&self) -> usize {
        self.total_episodes
    }
}

impl Default for EpisodeMonitor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_accumulates_per_env() {
        let mut m = EpisodeMonitor::new();
        assert_eq!(m.record_step(&[1.0, 2.0], &[false, false]), 0);
        assert_eq!(m.record_step(&[1.0, 2.0], &[true, false]), 1);
        assert_eq!(m.total_episodes(), 1);
        assert!((m.mean_reward(100) - 2.0).abs() < 1e-6);
        assert!((m.mean_length(100) - 2.0).abs() < 1e-6);

        assert_eq!(m.record_step(&[0.5, 2.0], &[true, true]), 2);
        // Episodes: (2.0, 2), (0.5, 1), (6.0, 3)
        assert!((m.mean_reward(100) - 8.5 / 3.0).abs() < 1e-5);
        assert!((m.mean_length(100) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_window_is_capped() {
        let mut m = EpisodeMonitor::with_capacity(2);
        for r in [10.0, 1.0, 3.0] {
            m.record_episode(EpisodeResult { reward: r, length: 1 });
        }
        assert_eq!(m.total_episodes(), 3);
        assert!((m.mean_reward(100) - 2.0).abs() < 1e-6);
        assert!((m.mean_reward(1) - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_empty_means_are_zero() {
        let m = EpisodeMonitor::new();
        assert_eq!(m.mean_reward(100), 0.0);
        assert_eq!(m.mean_length(100), 0.0);
    }
}
