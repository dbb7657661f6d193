use serde::{Deserialize, Serialize};

use crate::game::field::TICKS_PER_SECOND;

/// Match and instance settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvConfig {
    /// Physics ticks each action is repeated for.
    pub tick_skip: u32,
    pub team_size: usize,
    /// Both teams are controlled by the learning policy.
    pub self_play: bool,
    /// Parallel match instances.
    pub num_instances: usize,
    /// Episode timeout in simulated seconds.
    pub timeout_seconds: f64,
    /// Seconds after which a reward's discounted weight halves.
    pub half_life_seconds: f64,
}

impl Default for EnvConfig {
    fn default() -> Self {
        EnvConfig {
            tick_skip: 8,
            team_size: 1,
            self_play: true,
            num_instances: 15,
            timeout_seconds: 30.0,
            half_life_seconds: 5.0,
        }
    }
}

impl EnvConfig {
    /// Agent steps per simulated second.
    pub fn fps(&self) -> f64 {
        TICKS_PER_SECOND as f64 / self.tick_skip as f64
    }

    /// Discount factor such that a reward `half_life_seconds` away counts half.
    pub fn gamma(&self) -> f64 {
        (0.5f64.ln() / (self.fps() * self.half_life_seconds)).exp()
    }

    /// Policy-controlled agents in one match.
    pub fn agents_per_match(&self) -> usize {
        if self.self_play {
            self.team_size * 2
        } else {
            self.team_size
        }
    }

    /// Agent slots across all instances.
    pub fn num_envs(&self) -> usize {
        self.num_instances * self.agents_per_match()
    }

    /// Episode timeout in agent steps.
    pub fn timeout_steps(&self) -> u64 {
        (self.fps() * self.timeout_seconds).round() as u64
    }
}
