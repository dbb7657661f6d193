//! Match snapshot model shared by rewards, terminal conditions and the
//! simulator bridge: vectors, rigid bodies, players, teams and arena
//! constants.

pub mod field;
mod math;
mod state;
mod team;

pub use math::Vec3;
pub use state::{GameState, PhysicsObject, PlayerData};
pub use team::Team;
