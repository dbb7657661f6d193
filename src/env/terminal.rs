use crate::env::TerminalCondition;
use crate::game::GameState;

/// Ends the episode after a fixed number of agent steps.
#[derive(Debug, Clone)]
pub struct TimeoutCondition {
    max_steps: u64,
    steps: u64,
}

impl TimeoutCondition {
    pub fn new(max_steps: u64) -> Self {
        TimeoutCondition {
            max_steps,
            steps: 0,
        }
    }

    pub fn max_steps(&self) -> u64 {
        self.max_steps
    }
}

impl TerminalCondition for TimeoutCondition {
    fn reset(&mut self, _initial_state: &GameState) {
        self.steps = 0;
    }

    fn is_terminal(&mut self, _state: &GameState) -> bool {
        self.steps += 1;
        self.steps >= self.max_steps
    }
}

/// Ends the episode as soon as either team scores.
#[derive(Debug, Clone, Default)]
pub struct GoalScoredCondition {
    blue_score: u32,
    orange_score: u32,
}

impl GoalScoredCondition {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TerminalCondition for GoalScoredCondition {
    fn reset(&mut self, initial_state: &GameState) {
        self.blue_score = initial_state.blue_score;
        self.orange_score = initial_state.orange_score;
    }

    fn is_terminal(&mut self, state: &GameState) -> bool {
        let scored = state.blue_score != self.blue_score || state.orange_score != self.orange_score;
        self.blue_score = state.blue_score;
        self.orange_score = state.orange_score;
        scored
    }
}
