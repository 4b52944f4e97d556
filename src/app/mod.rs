//! Game loop state machine
//!
//! `App` owns the session, settings, audio and save store. A driver loop
//! feeds it input events, calls `update` once per frame and renders from
//! its read-only accessors until `is_running` turns false.

mod menus;
pub mod screen;

pub use screen::Screen;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::audio::{AudioBackend, AudioManager, MusicState, MusicTrack, SoundEffect};
use crate::config::GameConfig;
use crate::consts::*;
use crate::easter_egg::SecretCode;
use crate::input::{HeldKeys, InputEvent, Key};
use crate::persistence::SaveStore;
use crate::secs_to_ticks;
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, tick};
use crate::starfield::Starfield;

pub struct App {
    config: GameConfig,
    settings: Settings,
    audio: AudioManager,
    store: SaveStore,
    screen: Screen,
    session: Option<GameState>,
    held: HeldKeys,
    secret: SecretCode,
    easter_egg_armed: bool,
    /// Keyboard highlight in button menus
    menu_focus: usize,
    /// Source of per-session seeds
    seeds: Pcg32,
    starfield: Starfield,
}

impl App {
    pub fn new(config: GameConfig, settings: Settings, backend: Box<dyn AudioBackend>) -> Self {
        let config = config.validated();
        let seed = config.seed.unwrap_or_else(rand::random);
        let mut audio = AudioManager::new(backend, &settings);
        audio.play_music(MusicTrack::Start);
        let mut seeds = Pcg32::seed_from_u64(seed);
        let starfield = Starfield::new(seeds.random());

        Self {
            store: SaveStore::new(config.saves_dir.clone()),
            config,
            settings,
            audio,
            screen: Screen::Start,
            session: None,
            held: HeldKeys::default(),
            secret: SecretCode::default(),
            easter_egg_armed: false,
            menu_focus: 0,
            seeds,
            starfield,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Current or most recent session
    pub fn session(&self) -> Option<&GameState> {
        self.session.as_ref()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn music(&self) -> MusicState {
        self.audio.music()
    }

    pub fn easter_egg_armed(&self) -> bool {
        self.easter_egg_armed
    }

    pub fn menu_focus(&self) -> usize {
        self.menu_focus
    }

    pub fn starfield(&self) -> &Starfield {
        &self.starfield
    }

    pub fn is_running(&self) -> bool {
        self.screen != Screen::Exit
    }

    /// Apply one input event to the active screen
    pub fn handle_event(&mut self, event: InputEvent) {
        if event == InputEvent::Quit {
            self.enter(Screen::Exit);
            return;
        }

        let event = match event {
            InputEvent::KeyRepeat(key) if self.accepts_repeat(key) => InputEvent::KeyDown(key),
            InputEvent::KeyRepeat(_) => return,
            other => other,
        };

        match event {
            InputEvent::KeyDown(key) => self.held.press(key),
            InputEvent::KeyUp(key) => self.held.release(key),
            _ => {}
        }

        let next = match self.screen {
            Screen::Start => self.on_start(event),
            Screen::LoadMenu { .. } => self.on_load_menu(event),
            Screen::Playing => self.on_playing(event),
            Screen::Paused => self.on_paused(event),
            Screen::Settings { .. } => self.on_settings(event),
            Screen::SaveName { .. } => self.on_save_name(event),
            Screen::ConfirmQuit => self.on_confirm_quit(event),
            Screen::GameOver => self.on_game_over(event),
            Screen::Message { .. } | Screen::Countdown { .. } | Screen::Exit => None,
        };

        if let Some(next) = next {
            self.enter(next);
        }
    }

    /// Held keys keep repeating; only movement, text entry and volume
    /// nudges act on the repeats.
    fn accepts_repeat(&self, key: Key) -> bool {
        match self.screen {
            Screen::Playing => key.is_movement(),
            Screen::SaveName { .. } => matches!(key, Key::Char(_) | Key::Backspace),
            Screen::Settings { .. } => matches!(key, Key::Left | Key::Right),
            _ => false,
        }
    }

    /// Advance one frame
    pub fn update(&mut self) {
        match &mut self.screen {
            Screen::Start => self.starfield.advance(),
            Screen::Playing => self.update_playing(),
            Screen::Message {
                ticks_left, next, ..
            } => {
                *ticks_left = ticks_left.saturating_sub(1);
                if *ticks_left == 0 {
                    let next = (**next).clone();
                    self.enter(next);
                }
            }
            Screen::Countdown {
                remaining,
                ticks_left,
            } => {
                *ticks_left = ticks_left.saturating_sub(1);
                if *ticks_left == 0 {
                    *remaining = remaining.saturating_sub(1);
                    if *remaining == 0 {
                        self.enter(Screen::Playing);
                    } else {
                        *ticks_left = secs_to_ticks(1.0, self.config.fps);
                    }
                }
            }
            _ => {}
        }
    }

    fn update_playing(&mut self) {
        let input = self.held.tick_input();
        let Some(state) = self.session.as_mut() else {
            log::warn!("Playing without a session, back to start");
            self.enter(Screen::Start);
            return;
        };

        tick(state, &input);
        let events = state.drain_events();
        let over = state.is_over();

        for event in events {
            if event == GameEvent::Crashed {
                self.audio.play(SoundEffect::Crash);
            }
        }

        if over {
            self.enter(Screen::GameOver);
        }
    }

    /// Switch screens, keeping the music in step
    fn enter(&mut self, next: Screen) {
        log::info!("Screen {} -> {}", self.screen.name(), next.name());

        match &next {
            Screen::Start => self.audio.play_music(MusicTrack::Start),
            Screen::LoadMenu { .. } => self.audio.stop_music(),
            Screen::Playing => {
                if self.audio.music() == MusicState::Paused(MusicTrack::Game) {
                    self.audio.resume_music();
                } else {
                    self.audio.play_music(MusicTrack::Game);
                }
            }
            Screen::Paused => self.audio.pause_music(),
            Screen::GameOver => {
                self.audio.stop_music();
                if let Some(state) = &self.session {
                    log::info!("Final score: {}", state.player.score);
                }
            }
            _ => {}
        }

        self.menu_focus = 0;
        self.screen = next;
    }

    /// Install a session; the caller decides when play starts
    fn begin_session(&mut self, state: GameState) {
        log::info!(
            "Session started: seed={} lives={} score={} obstacles={}",
            state.seed,
            state.player.lives,
            state.player.score,
            state.obstacles.len()
        );
        self.session = Some(state);
    }

    /// Fresh session with the given number of lives
    fn new_game(&mut self, lives: u32) -> Screen {
        let seed = self.next_seed();
        self.begin_session(GameState::new(seed, lives, self.config.fps));
        Screen::Playing
    }

    fn next_seed(&mut self) -> u64 {
        self.seeds.random()
    }

    fn message_ticks(&self) -> u32 {
        secs_to_ticks(MESSAGE_SECS, self.config.fps)
    }
}
