//! Game settings and preferences
//!
//! Persisted separately from save games as a small JSON document.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Default volume for both channels
pub const DEFAULT_VOLUME: f32 = 0.5;

/// Volume step used by keyboard adjustment
pub const VOLUME_STEP: f32 = 0.05;

fn default_volume() -> f32 {
    DEFAULT_VOLUME
}

/// Which volume a slider controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeChannel {
    Music,
    Sfx,
}

impl VolumeChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            VolumeChannel::Music => "Music Volume",
            VolumeChannel::Sfx => "SFX Volume",
        }
    }

    pub fn other(&self) -> Self {
        match self {
            VolumeChannel::Music => VolumeChannel::Sfx,
            VolumeChannel::Sfx => VolumeChannel::Music,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Music volume (0.0 - 1.0)
    #[serde(default = "default_volume")]
    pub music_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    #[serde(default = "default_volume")]
    pub sfx_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            music_volume: DEFAULT_VOLUME,
            sfx_volume: DEFAULT_VOLUME,
        }
    }
}

impl Settings {
    pub fn volume(&self, channel: VolumeChannel) -> f32 {
        match channel {
            VolumeChannel::Music => self.music_volume,
            VolumeChannel::Sfx => self.sfx_volume,
        }
    }

    /// Set a volume, clamped to 0.0 - 1.0
    pub fn set_volume(&mut self, channel: VolumeChannel, vol: f32) {
        let vol = if vol.is_nan() { 0.0 } else { vol.clamp(0.0, 1.0) };
        match channel {
            VolumeChannel::Music => self.music_volume = vol,
            VolumeChannel::Sfx => self.sfx_volume = vol,
        }
    }

    /// Nudge a volume by `delta`, clamped
    pub fn adjust_volume(&mut self, channel: VolumeChannel, delta: f32) {
        self.set_volume(channel, self.volume(channel) + delta);
    }

    /// Clamp values read from disk
    fn sanitized(mut self) -> Self {
        self.set_volume(VolumeChannel::Music, self.music_volume);
        self.set_volume(VolumeChannel::Sfx, self.sfx_volume);
        self
    }

    /// Load settings from `path`, falling back to defaults when the file is
    /// missing or unreadable
    pub fn load(path: &Path) -> Self {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::info!("Using default settings ({}: {})", path.display(), e);
                return Self::default();
            }
        };

        match serde_json::from_str::<Settings>(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings.sanitized()
            }
            Err(e) => {
                log::warn!("Ignoring malformed settings file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings to `path`
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
