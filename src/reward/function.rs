use crate::game::{GameState, PlayerData};

/// A single scalar training signal evaluated per player per step.
///
/// Implementations may keep episode-scoped state (e.g. the previous score
/// to detect a goal transition); `reset` is called with the first state of
/// every episode and `pre_step` once per step before any player is scored.
pub trait RewardFunction: Send {
    /// Short name used in logs and reward breakdowns.
    fn name(&self) -> &str;

    /// Clear episode-scoped state.
    fn reset(&mut self, _initial_state: &GameState) {}

    /// Called once per step, before `get_reward` for each player.
    fn pre_step(&mut self, _state: &GameState) {}

    fn get_reward(&mut self, player: &PlayerData, state: &GameState, previous_action: &[f32])
        -> f32;

    /// Reward for the terminal step of an episode.
    fn get_final_reward(
        &mut self,
        player: &PlayerData,
        state: &GameState,
        previous_action: &[f32],
    ) -> f32 {
        self.get_reward(player, state, previous_action)
    }
}
