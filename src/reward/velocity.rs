use crate::game::field::{BALL_MAX_SPEED, CAR_MAX_SPEED};
use crate::game::{GameState, PlayerData, Vec3};
use crate::reward::RewardFunction;

/// Length of `v` along `onto`, or 0 when `onto` has no length.
fn scalar_projection(v: Vec3, onto: Vec3) -> f32 {
    let n = onto.norm();
    if n == 0.0 {
        0.0
    } else {
        v.dot(onto) / n
    }
}

/// Rewards the car for moving toward the ball.
///
/// By default the car velocity is normalized by its max speed, giving a
/// value in [-1, 1]. With scalar projection the raw speed toward the ball is
/// returned instead.
#[derive(Debug, Clone, Default)]
pub struct VelocityPlayerToBallReward {
    pub use_scalar_projection: bool,
}

impl VelocityPlayerToBallReward {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn compute(&self, player: &PlayerData, state: &GameState) -> f32 {
        let vel = player.car_data.linear_velocity;
        let pos_diff = state.ball.position - player.car_data.position;
        if self.use_scalar_projection {
            scalar_projection(vel, pos_diff)
        } else {
            pos_diff.normalized().dot(vel / CAR_MAX_SPEED)
        }
    }
}

impl RewardFunction for VelocityPlayerToBallReward {
    fn name(&self) -> &str {
        "velocity_player_to_ball"
    }

    fn get_reward(&mut self, player: &PlayerData, state: &GameState, _previous_action: &[f32]) -> f32 {
        self.compute(player, state)
    }
}

/// Rewards ball velocity toward the opponent's goal (or the player's own
/// goal when `own_goal` is set).
#[derive(Debug, Clone, Default)]
pub struct VelocityBallToGoalReward {
    pub own_goal: bool,
    pub use_scalar_projection: bool,
}

impl VelocityBallToGoalReward {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RewardFunction for VelocityBallToGoalReward {
    fn name(&self) -> &str {
        "velocity_ball_to_goal"
    }

    fn get_reward(&mut self, player: &PlayerData, state: &GameState, _previous_action: &[f32]) -> f32 {
        let objective = if self.own_goal {
            player.team.own_goal_back()
        } else {
            player.team.opponent_goal_back()
        };
        let vel = state.ball.linear_velocity;
        let pos_diff = objective - state.ball.position;
        if self.use_scalar_projection {
            scalar_projection(vel, pos_diff)
        } else {
            pos_diff.normalized().dot(vel / BALL_MAX_SPEED)
        }
    }
}

/// Player-to-ball velocity, paid only while the ball sits on the kickoff
/// spot.
#[derive(Debug, Clone, Default)]
pub struct KickoffReward {
    approach: VelocityPlayerToBallReward,
}

impl KickoffReward {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RewardFunction for KickoffReward {
    fn name(&self) -> &str {
        "kickoff"
    }

    fn get_reward(&mut self, player: &PlayerData, state: &GameState, _previous_action: &[f32]) -> f32 {
        if state.is_kickoff() {
            self.approach.compute(player, state)
        } else {
            0.0
        }
    }
}
