use serde::{Deserialize, Serialize};

use crate::error::RewardConfigError;
use crate::reward::{
    CombinedReward, EventReward, EventWeights, GoalVelocityReward, JumpTouchReward, KickoffReward,
    RewardFunction, VelocityBallToGoalReward, VelocityPlayerToBallReward,
};

/// Sub-rewards in the order `RewardConfig::weights` is matched against.
pub const SUB_REWARD_NAMES: [&str; 6] = [
    "velocity_player_to_ball",
    "kickoff",
    "velocity_ball_to_goal",
    "jump_touch",
    "goal_velocity",
    "event",
];

/// Weights for the standard self-play reward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardConfig {
    /// One weight per entry of [`SUB_REWARD_NAMES`], positionally.
    pub weights: Vec<f32>,
    pub events: EventWeights,
}

impl Default for RewardConfig {
    fn default() -> Self {
        RewardConfig {
            weights: vec![0.1, 1.0, 1.0, 1.0, 100.0, 1.0],
            events: EventWeights {
                team_goal: 100.0,
                concede: -150.0,
                shot: 10.0,
                save: 75.0,
                demo: 25.0,
                ..Default::default()
            },
        }
    }
}

impl RewardConfig {
    /// Build a fresh combined reward. Each match instance needs its own,
    /// since several sub-rewards carry episode state.
    pub fn build(&self) -> Result<CombinedReward, RewardConfigError> {
        let rewards: Vec<Box<dyn RewardFunction>> = vec![
            Box::new(VelocityPlayerToBallReward::new()),
            Box::new(KickoffReward::new()),
            Box::new(VelocityBallToGoalReward::new()),
            Box::new(JumpTouchReward::new()),
            Box::new(GoalVelocityReward::new()),
            Box::new(EventReward::new(&self.events)),
        ];
        CombinedReward::new(rewards, self.weights.clone())
    }
}
