use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::game::{GameState, PlayerData};
use crate::reward::RewardFunction;

const EVENT_COUNT: usize = 8;

/// Weights for match events, each paid once per occurrence.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EventWeights {
    pub goal: f32,
    pub team_goal: f32,
    pub concede: f32,
    pub touch: f32,
    pub shot: f32,
    pub save: f32,
    pub demo: f32,
    pub boost_pickup: f32,
}

impl EventWeights {
    fn as_array(&self) -> [f32; EVENT_COUNT] {
        [
            self.goal,
            self.team_goal,
            self.concede,
            self.touch,
            self.shot,
            self.save,
            self.demo,
            self.boost_pickup,
        ]
    }
}

/// Rewards discrete match events by diffing per-player counters between
/// steps. Counter decreases (e.g. spending boost) are ignored.
#[derive(Debug, Clone)]
pub struct EventReward {
    weights: [f32; EVENT_COUNT],
    last_values: HashMap<u32, [f32; EVENT_COUNT]>,
}

impl EventReward {
    pub fn new(weights: &EventWeights) -> Self {
        EventReward {
            weights: weights.as_array(),
            last_values: HashMap::new(),
        }
    }

    fn extract_values(player: &PlayerData, state: &GameState) -> [f32; EVENT_COUNT] {
        let team = state.score(player.team);
        let opponent = state.score(player.team.opponent());
        [
            player.match_goals as f32,
            team as f32,
            opponent as f32,
            if player.ball_touched { 1.0 } else { 0.0 },
            player.match_shots as f32,
            player.match_saves as f32,
            player.match_demolishes as f32,
            player.boost_amount,
        ]
    }
}

impl RewardFunction for EventReward {
    fn name(&self) -> &str {
        "event"
    }

    fn reset(&mut self, initial_state: &GameState) {
        self.last_values = initial_state
            .players
            .iter()
            .map(|p| (p.car_id, Self::extract_values(p, initial_state)))
            .collect();
    }

    fn get_reward(&mut self, player: &PlayerData, state: &GameState, _previous_action: &[f32]) -> f32 {
        let new_values = Self::extract_values(player, state);
        let old_values = self
            .last_values
            .insert(player.car_id, new_values)
            .unwrap_or(new_values);

        new_values
            .iter()
            .zip(&old_values)
            .zip(&self.weights)
            .map(|((new, old), w)| (new - old).max(0.0) * w)
            .sum()
    }
}
