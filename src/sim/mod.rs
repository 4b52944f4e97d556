//! Simulation module
//!
//! All gameplay logic lives here and is free of rendering, audio and
//! platform concerns:
//! - Fixed timestep only (speeds are pixels per frame)
//! - Seeded RNG only
//! - Stable iteration order (spawn order)

pub mod collision;
pub mod rect;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{ObstacleOutcome, resolve_obstacles};
pub use rect::Rect;
pub use spawn::Spawner;
pub use state::{GameEvent, GamePhase, GameState, Obstacle, Player};
pub use tick::{TickInput, tick};
