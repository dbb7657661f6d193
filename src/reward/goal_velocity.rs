use crate::game::field::BALL_MAX_SPEED;
use crate::game::{GameState, PlayerData, Team};
use crate::reward::RewardFunction;

/// Pays the scoring team the ball's speed on the step before the goal,
/// normalized by max ball speed. Harder shots are worth more.
#[derive(Debug, Clone, Default)]
pub struct GoalVelocityReward {
    prev_blue_score: u32,
    prev_orange_score: u32,
    prev_ball_speed: f32,
    blue_scored: bool,
    orange_scored: bool,
    goal_speed: f32,
}

impl GoalVelocityReward {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RewardFunction for GoalVelocityReward {
    fn name(&self) -> &str {
        "goal_velocity"
    }

    fn reset(&mut self, initial_state: &GameState) {
        *self = GoalVelocityReward {
            prev_blue_score: initial_state.blue_score,
            prev_orange_score: initial_state.orange_score,
            prev_ball_speed: initial_state.ball.linear_velocity.norm(),
            ..Default::default()
        };
    }

    fn pre_step(&mut self, state: &GameState) {
        self.blue_scored = state.blue_score > self.prev_blue_score;
        self.orange_scored = state.orange_score > self.prev_orange_score;
        self.goal_speed = self.prev_ball_speed;

        self.prev_blue_score = state.blue_score;
        self.prev_orange_score = state.orange_score;
        self.prev_ball_speed = state.ball.linear_velocity.norm();
    }

    fn get_reward(&mut self, player: &PlayerData, _state: &GameState, _previous_action: &[f32]) -> f32 {
        let scored = match player.team {
            Team::Blue => self.blue_scored,
            Team::Orange => self.orange_scored,
        };
        if scored {
            self.goal_speed / BALL_MAX_SPEED
        } else {
            0.0
        }
    }
}
