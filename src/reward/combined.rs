use crate::error::RewardConfigError;
use crate::game::{GameState, PlayerData};
use crate::reward::RewardFunction;

/// Weighted result of one combined evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct RewardBreakdown {
    pub total: f32,
    /// `weight_i * reward_i`, in sub-reward order.
    pub components: Vec<f32>,
}

/// Dot product of an ordered list of sub-rewards with a parallel list of
/// weights. Weight `i` applies to sub-reward `i`; there is no name binding.
pub struct CombinedReward {
    rewards: Vec<Box<dyn RewardFunction>>,
    weights: Vec<f32>,
}

impl CombinedReward {
    /// Fails when the lists differ in length or a weight is not finite.
    pub fn new(
        rewards: Vec<Box<dyn RewardFunction>>,
        weights: Vec<f32>,
    ) -> Result<Self, RewardConfigError> {
        if rewards.len() != weights.len() {
            return Err(RewardConfigError::WeightCountMismatch {
                rewards: rewards.len(),
                weights: weights.len(),
            });
        }
        if let Some((index, &value)) = weights.iter().enumerate().find(|(_, w)| !w.is_finite()) {
            return Err(RewardConfigError::NonFiniteWeight { index, value });
        }
        Ok(CombinedReward { rewards, weights })
    }

    /// Build from (reward, weight) pairs.
    pub fn from_weighted(
        pairs: Vec<(Box<dyn RewardFunction>, f32)>,
    ) -> Result<Self, RewardConfigError> {
        let (rewards, weights) = pairs.into_iter().unzip();
        Self::new(rewards, weights)
    }

    pub fn len(&self) -> usize {
        self.rewards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rewards.is_empty()
    }

    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    pub fn names(&self) -> Vec<&str> {
        self.rewards.iter().map(|r| r.name()).collect()
    }

    /// Evaluate every sub-reward once and return the weighted breakdown.
    pub fn evaluate(
        &mut self,
        player: &PlayerData,
        state: &GameState,
        previous_action: &[f32],
        is_final: bool,
    ) -> RewardBreakdown {
        let components: Vec<f32> = self
            .rewards
            .iter_mut()
            .zip(&self.weights)
            .map(|(reward, &weight)| {
                let value = if is_final {
                    reward.get_final_reward(player, state, previous_action)
                } else {
                    reward.get_reward(player, state, previous_action)
                };
                weight * value
            })
            .collect();
        RewardBreakdown {
            total: components.iter().sum(),
            components,
        }
    }
}

impl RewardFunction for CombinedReward {
    fn name(&self) -> &str {
        "combined"
    }

    fn reset(&mut self, initial_state: &GameState) {
        for reward in &mut self.rewards {
            reward.reset(initial_state);
        }
    }

    fn pre_step(&mut self, state: &GameState) {
        for reward in &mut self.rewards {
            reward.pre_step(state);
        }
    }

    fn get_reward(&mut self, player: &PlayerData, state: &GameState, previous_action: &[f32]) -> f32 {
        self.evaluate(player, state, previous_action, false).total
    }

    fn get_final_reward(
        &mut self,
        player: &PlayerData,
        state: &GameState,
        previous_action: &[f32],
    ) -> f32 {
        self.evaluate(player, state, previous_action, true).total
    }
}
