//! Audio commands
//!
//! The game decides what to play and how loud; a backend does the actual
//! playback. Volumes come from `Settings` and are pushed in explicitly.

use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Asteroid hit the ship
    Crash,
    /// Secret code entered
    EasterEgg,
}

/// Looping music tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicTrack {
    /// Title screen
    Start,
    /// In-game
    Game,
}

/// Playback state of the music channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicState {
    Stopped,
    Playing(MusicTrack),
    Paused(MusicTrack),
}

/// Something that can make noise
pub trait AudioBackend {
    fn play_effect(&mut self, effect: SoundEffect, volume: f32);
    /// Start `track` from the beginning, looping
    fn play_music(&mut self, track: MusicTrack, volume: f32);
    fn pause_music(&mut self);
    fn resume_music(&mut self);
    fn stop_music(&mut self);
    fn set_music_volume(&mut self, volume: f32);
}

/// Backend that only logs; used when no audio device is wired up
#[derive(Debug, Default)]
pub struct LogBackend;

impl AudioBackend for LogBackend {
    fn play_effect(&mut self, effect: SoundEffect, volume: f32) {
        log::debug!("sfx {:?} @ {:.2}", effect, volume);
    }

    fn play_music(&mut self, track: MusicTrack, volume: f32) {
        log::debug!("music {:?} @ {:.2}", track, volume);
    }

    fn pause_music(&mut self) {
        log::debug!("music paused");
    }

    fn resume_music(&mut self) {
        log::debug!("music resumed");
    }

    fn stop_music(&mut self) {
        log::debug!("music stopped");
    }

    fn set_music_volume(&mut self, volume: f32) {
        log::debug!("music volume {:.2}", volume);
    }
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Box<dyn AudioBackend>,
    music_volume: f32,
    sfx_volume: f32,
    music: MusicState,
}

impl AudioManager {
    pub fn new(backend: Box<dyn AudioBackend>, settings: &Settings) -> Self {
        Self {
            backend,
            music_volume: settings.music_volume,
            sfx_volume: settings.sfx_volume,
            music: MusicState::Stopped,
        }
    }

    /// Pick up new volumes; music volume applies immediately
    pub fn apply_settings(&mut self, settings: &Settings) {
        if settings.music_volume != self.music_volume {
            self.music_volume = settings.music_volume;
            self.backend.set_music_volume(self.music_volume);
        }
        self.sfx_volume = settings.sfx_volume;
    }

    pub fn music(&self) -> MusicState {
        self.music
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        if self.sfx_volume <= 0.0 {
            return;
        }
        self.backend.play_effect(effect, self.sfx_volume);
    }

    /// Loop `track` unless it is already playing
    pub fn play_music(&mut self, track: MusicTrack) {
        if self.music == MusicState::Playing(track) {
            return;
        }
        self.backend.play_music(track, self.music_volume);
        self.music = MusicState::Playing(track);
    }

    pub fn pause_music(&mut self) {
        if let MusicState::Playing(track) = self.music {
            self.backend.pause_music();
            self.music = MusicState::Paused(track);
        }
    }

    pub fn resume_music(&mut self) {
        if let MusicState::Paused(track) = self.music {
            self.backend.resume_music();
            self.music = MusicState::Playing(track);
        }
    }

    pub fn stop_music(&mut self) {
        if self.music != MusicState::Stopped {
            self.backend.stop_music();
            self.music = MusicState::Stopped;
        }
    }
}

/// Backend that remembers every command, for tests
#[cfg(test)]
pub mod testing {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum AudioCommand {
        Effect(SoundEffect, f32),
        Music(MusicTrack, f32),
        Pause,
        Resume,
        Stop,
        MusicVolume(f32),
    }

    #[derive(Debug, Default, Clone)]
    pub struct RecordingBackend {
        pub log: Rc<RefCell<Vec<AudioCommand>>>,
    }

    impl RecordingBackend {
        pub fn commands(&self) -> Vec<AudioCommand> {
            self.log.borrow().clone()
        }

        pub fn effects(&self) -> Vec<SoundEffect> {
            self.log
                .borrow()
                .iter()
                .filter_map(|c| match c {
                    AudioCommand::Effect(e, _) => Some(*e),
                    _ => None,
                })
                .collect()
        }
    }

    impl AudioBackend for RecordingBackend {
        fn play_effect(&mut self, effect: SoundEffect, volume: f32) {
            self.log.borrow_mut().push(AudioCommand::Effect(effect, volume));
        }

        fn play_music(&mut self, track: MusicTrack, volume: f32) {
            self.log.borrow_mut().push(AudioCommand::Music(track, volume));
        }

        fn pause_music(&mut self) {
            self.log.borrow_mut().push(AudioCommand::Pause);
        }

        fn resume_music(&mut self) {
            self.log.borrow_mut().push(AudioCommand::Resume);
        }

        fn stop_music(&mut self) {
            self.log.borrow_mut().push(AudioCommand::Stop);
        }

        fn set_music_volume(&mut self, volume: f32) {
            self.log.borrow_mut().push(AudioCommand::MusicVolume(volume));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{AudioCommand, RecordingBackend};
    use super::*;

    fn manager(settings: &Settings) -> (AudioManager, RecordingBackend) {
        let backend = RecordingBackend::default();
        (AudioManager::new(Box::new(backend.clone()), settings), backend)
    }

    #[test]
    fn test_effect_uses_sfx_volume() {
        let settings = Settings {
            music_volume: 0.3,
            sfx_volume: 0.8,
        };
        let (mut audio, backend) = manager(&settings);
        audio.play(SoundEffect::Crash);
        assert_eq!(
            backend.commands(),
            vec![AudioCommand::Effect(SoundEffect::Crash, 0.8)]
        );
    }

    #[test]
    fn test_muted_effects_are_skipped() {
        let settings = Settings {
            music_volume: 0.3,
            sfx_volume: 0.0,
        };
        let (mut audio, backend) = manager(&settings);
        audio.play(SoundEffect::EasterEgg);
        assert!(backend.commands().is_empty());
    }

    #[test]
    fn test_music_state_transitions() {
        let (mut audio, backend) = manager(&Settings::default());
        audio.play_music(MusicTrack::Game);
        audio.play_music(MusicTrack::Game);
        audio.pause_music();
        audio.pause_music();
        assert_eq!(audio.music(), MusicState::Paused(MusicTrack::Game));
        audio.resume_music();
        audio.stop_music();
        audio.stop_music();
        assert_eq!(
            backend.commands(),
            vec![
                AudioCommand::Music(MusicTrack::Game, 0.5),
                AudioCommand::Pause,
                AudioCommand::Resume,
                AudioCommand::Stop,
            ]
        );
    }

    #[test]
    fn test_apply_settings_updates_music_volume() {
        let (mut audio, backend) = manager(&Settings::default());
        let mut settings = Settings::default();
        settings.music_volume = 0.9;
        settings.sfx_volume = 0.1;
        audio.apply_settings(&settings);
        audio.play(SoundEffect::Crash);
        assert_eq!(
            backend.commands(),
            vec![
                AudioCommand::MusicVolume(0.9),
                AudioCommand::Effect(SoundEffect::Crash, 0.1),
            ]
        );
    }
}
