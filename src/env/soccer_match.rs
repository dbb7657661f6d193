use crate::env::{
    ActionParser, CarControls, DiscreteAction, EnvConfig, GoalScoredCondition, ObsBuilder,
    StateSetter, TerminalCondition, TimeoutCondition,
};
use crate::error::EnvError;
use crate::game::GameState;
use crate::reward::RewardFunction;

/// One simulated match: everything an instance worker needs to turn raw
/// simulator states into observations, rewards and episode boundaries.
pub struct Match {
    team_size: usize,
    tick_skip: u32,
    self_play: bool,
    reward: Box<dyn RewardFunction>,
    terminal_conditions: Vec<Box<dyn TerminalCondition>>,
    obs_builder: Box<dyn ObsBuilder>,
    state_setter: Box<dyn StateSetter>,
    action_parser: Box<dyn ActionParser>,
}

impl Match {
    pub fn new(
        env: &EnvConfig,
        reward: Box<dyn RewardFunction>,
        terminal_conditions: Vec<Box<dyn TerminalCondition>>,
        obs_builder: Box<dyn ObsBuilder>,
        state_setter: Box<dyn StateSetter>,
        action_parser: Box<dyn ActionParser>,
    ) -> Self {
        Match {
            team_size: env.team_size,
            tick_skip: env.tick_skip,
            self_play: env.self_play,
            reward,
            terminal_conditions,
            obs_builder,
            state_setter,
            action_parser,
        }
    }

    /// The standard self-play match: timeout or goal ends the episode,
    /// discrete actions.
    pub fn standard(
        env: &EnvConfig,
        reward: Box<dyn RewardFunction>,
        obs_builder: Box<dyn ObsBuilder>,
        state_setter: Box<dyn StateSetter>,
    ) -> Self {
        Match::new(
            env,
            reward,
            vec![
                Box::new(TimeoutCondition::new(env.timeout_steps())),
                Box::new(GoalScoredCondition::new()),
            ],
            obs_builder,
            state_setter,
            Box::new(DiscreteAction::new()),
        )
    }

    pub fn team_size(&self) -> usize {
        self.team_size
    }

    pub fn tick_skip(&self) -> u32 {
        self.tick_skip
    }

    /// Policy-controlled agents in this match.
    pub fn agents(&self) -> usize {
        if self.self_play {
            self.team_size * 2
        } else {
            self.team_size
        }
    }

    pub fn action_space(&self) -> Vec<usize> {
        self.action_parser.action_space()
    }

    /// Start a new episode: place the objects, then reset every stateful
    /// part against the resulting state. Returns the first observations.
    pub fn episode_reset(&mut self, state: &mut GameState) -> Vec<Vec<f32>> {
        self.state_setter.reset(state);
        self.reward.reset(state);
        for condition in &mut self.terminal_conditions {
            condition.reset(state);
        }
        self.obs_builder.reset(state);

        let no_action = [0.0; 8];
        let previous: Vec<CarControls> = vec![no_action; state.players.len()];
        self.build_observations(state, &previous)
    }

    /// Every condition sees every step, so step counters stay in sync.
    pub fn is_done(&mut self, state: &GameState) -> bool {
        self.terminal_conditions
            .iter_mut()
            .fold(false, |done, condition| condition.is_terminal(state) | done)
    }

    /// One reward per player, in `state.players` order.
    pub fn get_rewards(
        &mut self,
        state: &GameState,
        previous_actions: &[CarControls],
        done: bool,
    ) -> Vec<f32> {
        self.reward.pre_step(state);
        state
            .players
            .iter()
            .enumerate()
            .map(|(i, player)| {
                let action = previous_actions.get(i).map_or(&[][..], |a| &a[..]);
                if done {
                    self.reward.get_final_reward(player, state, action)
                } else {
                    self.reward.get_reward(player, state, action)
                }
            })
            .collect()
    }

    pub fn build_observations(
        &mut self,
        state: &GameState,
        previous_actions: &[CarControls],
    ) -> Vec<Vec<f32>> {
        self.obs_builder.pre_step(state);
        state
            .players
            .iter()
            .enumerate()
            .map(|(i, player)| {
                let action = previous_actions.get(i).map_or(&[][..], |a| &a[..]);
                self.obs_builder.build_obs(player, state, action)
            })
            .collect()
    }

    pub fn parse_actions(
        &self,
        actions: &[Vec<usize>],
        state: &GameState,
    ) -> Result<Vec<CarControls>, EnvError> {
        self.action_parser.parse_actions(actions, state)
    }
}
