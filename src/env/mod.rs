//! Match definition consumed by the simulator bridge: terminal conditions,
//! action decoding, the per-instance match bundle and the instance pool.

mod action;
mod pool;
mod settings;
pub(crate) mod soccer_match;
mod terminal;
mod traits;

pub use action::DiscreteAction;
pub use pool::{EnvSpec, InstancePool};
pub use settings::EnvConfig;
pub use soccer_match::Match;
pub use terminal::{GoalScoredCondition, TimeoutCondition};
pub use traits::{ActionParser, CarControls, ObsBuilder, StateSetter, TerminalCondition};
