//! Save/load of game snapshots
//!
//! Features:
//! - Flat JSON document per save (player, obstacles, spawn timer)
//! - One file per named slot under a save directory
//! - Write-to-temp then rename, so a crash never leaves a half-written save
//! - Parse failures surface as recoverable errors

pub mod snapshot;
pub mod store;

pub use snapshot::{ObstacleRecord, PlayerRecord, Snapshot};
pub use store::{SaveSlot, SaveStore};
