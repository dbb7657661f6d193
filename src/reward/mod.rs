//! Reward shaping: the sub-reward trait, the weighted combiner, the six
//! standard sub-rewards and the configured preset that composes them.

mod combined;
mod event;
mod function;
mod goal_velocity;
mod jump_touch;
mod preset;
#[cfg(test)]
mod test_fixtures;
mod velocity;

pub use combined::{CombinedReward, RewardBreakdown};
pub use event::{EventReward, EventWeights};
pub use function::RewardFunction;
pub use goal_velocity::GoalVelocityReward;
pub use jump_touch::JumpTouchReward;
pub use preset::{RewardConfig, SUB_REWARD_NAMES};
pub use velocity::{KickoffReward, VelocityBallToGoalReward, VelocityPlayerToBallReward};
