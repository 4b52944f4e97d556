//! Space Dodge - dodge the falling asteroids
//!
//! Core modules:
//! - `sim`: Fixed-timestep simulation (entities, spawning, collisions)
//! - `app`: Screen state machine driving the game loop
//! - `persistence`: Named save slots for game snapshots
//! - `settings`: Volume preferences
//! - `platform`: Terminal frontend and frame pacing

pub mod app;
pub mod audio;
pub mod config;
pub mod easter_egg;
pub mod input;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod starfield;
pub mod ui;

pub use app::{App, Screen};
pub use config::GameConfig;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (logical pixels)
    pub const WIDTH: f32 = 1000.0;
    pub const HEIGHT: f32 = 800.0;

    /// Target frame rate. All speeds are pixels per frame.
    pub const FPS: u32 = 60;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 50.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_START_LIVES: u32 = 3;
    /// Lives granted by the easter egg
    pub const EASTER_EGG_LIVES: u32 = 99;
    /// Player spawns this far above the bottom edge (center)
    pub const PLAYER_START_OFFSET: f32 = 60.0;

    /// Obstacle defaults
    pub const OBSTACLE_SIZE: f32 = 50.0;
    pub const OBSTACLE_MIN_SPEED: u32 = 3;
    pub const OBSTACLE_MAX_SPEED: u32 = 7;
    /// Center y of a freshly spawned obstacle (above the visible area)
    pub const OBSTACLE_SPAWN_Y: f32 = -50.0;

    /// One obstacle per second of simulated time
    pub const SPAWN_INTERVAL_SECS: f32 = 1.0;

    /// Transient message duration
    pub const MESSAGE_SECS: f32 = 2.0;
    /// Countdown steps shown before a restored game resumes (1 second each)
    pub const COUNTDOWN_STEPS: u32 = 3;

    /// Title screen background
    pub const STAR_COUNT: usize = 100;
    pub const STAR_SPEED: f32 = 1.0;
}

/// Number of frames covering `secs` seconds at `fps` (never zero)
#[inline]
pub fn secs_to_ticks(secs: f32, fps: u32) -> u32 {
    ((secs * fps as f32).round() as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secs_to_ticks() {
        assert_eq!(secs_to_ticks(1.0, 60), 60);
        assert_eq!(secs_to_ticks(2.0, 60), 120);
        assert_eq!(secs_to_ticks(1.0, 30), 30);
        assert_eq!(secs_to_ticks(0.0, 60), 1);
    }
}
