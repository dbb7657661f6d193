use crate::game::field::BALL_RADIUS;
use crate::game::{GameState, PlayerData};
use crate::reward::RewardFunction;

/// Rewards aerial touches, growing slowly with ball height.
#[derive(Debug, Clone)]
pub struct JumpTouchReward {
    pub min_height: f32,
    pub exponent: f32,
}

impl Default for JumpTouchReward {
    fn default() -> Self {
        JumpTouchReward {
            min_height: BALL_RADIUS,
            exponent: 0.2,
        }
    }
}

impl JumpTouchReward {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RewardFunction for JumpTouchReward {
    fn name(&self) -> &str {
        "jump_touch"
    }

    fn get_reward(&mut self, player: &PlayerData, state: &GameState, _previous_action: &[f32]) -> f32 {
        let height = state.ball.position.z;
        if player.ball_touched && !player.on_ground && height >= self.min_height {
            (height - 92.0).max(0.0).powf(self.exponent) - 1.0
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Team, Vec3};
    use crate::reward::test_fixtures::{player_at, state_with};

    fn airborne_toucher() -> PlayerData {
        let mut p = player_at(1, Team::Blue, Vec3::new(0.0, 0.0, 500.0), Vec3::ZERO);
        p.on_ground = false;
        p.ball_touched = true;
        p
    }

    #[test]
    fn test_aerial_touch_scales_with_height() {
        let player = airborne_toucher();
        let mut reward = JumpTouchReward::new();

        let low = state_with(Vec3::new(0.0, 0.0, 124.0), Vec3::ZERO, vec![player.clone()]);
        let high = state_with(Vec3::new(0.0, 0.0, 1116.0), Vec3::ZERO, vec![player.clone()]);
        let r_low = reward.get_reward(&player, &low, &[]);
        let r_high = reward.get_reward(&player, &high, &[]);

        // 32^0.2 = 2, 1024^0.2 = 4
        assert!((r_low - 1.0).abs() < 1e-4);
        assert!((r_high - 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_grounded_touch_pays_nothing() {
        let mut player = airborne_toucher();
        player.on_ground = true;
        let state = state_with(Vec3::new(0.0, 0.0, 400.0), Vec3::ZERO, vec![player.clone()]);
        assert_eq!(JumpTouchReward::new().get_reward(&player, &state, &[]), 0.0);
    }

    #[test]
    fn test_ball_below_min_height_pays_nothing() {
        let player = airborne_toucher();
        let state = state_with(Vec3::new(0.0, 0.0, 90.0), Vec3::ZERO, vec![player.clone()]);
        assert_eq!(JumpTouchReward::new().get_reward(&player, &state, &[]), 0.0);
    }

    #[test]
    fn test_low_min_height_stays_finite() {
        let player = airborne_toucher();
        let mut reward = JumpTouchReward {
            min_height: 0.0,
            ..JumpTouchReward::default()
        };
        let state = state_with(Vec3::new(0.0, 0.0, 50.0), Vec3::ZERO, vec![player.clone()]);
        let r = reward.get_reward(&player, &state, &[]);
        assert!(r.is_finite());
        assert!((r + 1.0).abs() < 1e-6);
    }
}
