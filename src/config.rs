//! Runtime configuration

use std::path::PathBuf;

use crate::consts::FPS;

/// Where things live and how fast the game runs
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Simulation/frame rate. Speeds are per frame, so this also sets game speed.
    pub fps: u32,
    /// Directory holding save slots
    pub saves_dir: PathBuf,
    /// Volume settings file
    pub settings_path: PathBuf,
    /// Fixed RNG seed (random per session when `None`)
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fps: FPS,
            saves_dir: PathBuf::from("saves"),
            settings_path: PathBuf::from("settings.json"),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Clamp nonsensical values
    pub fn validated(mut self) -> Self {
        if self.fps == 0 {
            log::warn!("fps must be positive, using {}", FPS);
            self.fps = FPS;
        }
        self
    }
}
