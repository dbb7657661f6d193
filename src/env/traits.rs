use crate::error::EnvError;
use crate::game::{GameState, PlayerData};

/// Car inputs for one step: throttle, steer, pitch, yaw, roll, jump,
/// boost, handbrake.
pub type CarControls = [f32; 8];

/// Decides when an episode ends.
pub trait TerminalCondition: Send {
    fn reset(&mut self, initial_state: &GameState);

    /// Called exactly once per step.
    fn is_terminal(&mut self, state: &GameState) -> bool;
}

/// Encodes a player's view of the match for the policy. Implemented by the
/// simulator bridge.
pub trait ObsBuilder: Send {
    fn reset(&mut self, initial_state: &GameState);

    fn pre_step(&mut self, _state: &GameState) {}

    fn build_obs(&mut self, player: &PlayerData, state: &GameState, previous_action: &[f32])
        -> Vec<f32>;
}

/// Places cars and ball at the start of an episode. Implemented by the
/// simulator bridge.
pub trait StateSetter: Send {
    fn reset(&mut self, state: &mut GameState);
}

/// Decodes policy outputs (one bin index per action dimension) into car
/// controls.
pub trait ActionParser: Send {
    /// Number of bins for each action dimension.
    fn action_space(&self) -> Vec<usize>;

    fn parse_actions(
        &self,
        actions: &[Vec<usize>],
        state: &GameState,
    ) -> Result<Vec<CarControls>, EnvError>;
}
