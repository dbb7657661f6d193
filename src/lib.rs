//! # Soccar Trainer
//!
//! Reward composition and resumable run control for self-play PPO training
//! in a 3D vehicle-soccer simulator. The simulator bridge and the PPO
//! learner live outside this crate and plug in through traits.
//!
//! ## Modules
//!
//! - [`game`]: Field constants and the game-state snapshot rewards read
//! - [`reward`]: Sub-rewards and the weighted combiner
//! - [`env`]: Match definition: terminal conditions, actions, instance pool
//! - [`training`]: Learner seam, step callbacks, metrics, run controller
//! - [`checkpoint`]: Latest, history and periodic snapshots
//! - [`config`]: TOML configuration loading and validation
//! - [`logging`]: `tracing` subscriber setup
//! - [`error`]: Structured error types

pub mod checkpoint;
pub mod config;
pub mod env;
pub mod error;
pub mod game;
pub mod logging;
pub mod reward;
pub mod training;
