//! Snapshot persistence: the "latest" snapshot read at startup, immutable
//! per-segment history, and periodic mid-segment snapshots.

mod manager;
mod metadata;

pub use manager::{CheckpointConfig, CheckpointData, CheckpointStore};
pub use metadata::{CheckpointMetadata, PpoHyperparameters};
