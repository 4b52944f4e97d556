//! Screens of the game

use crate::persistence::SaveSlot;
use crate::settings::VolumeChannel;

/// Which screen is active, plus any state local to it
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    /// Title screen with Start / Load / Quit
    Start,
    /// Pick a save slot
    LoadMenu { slots: Vec<SaveSlot>, selected: usize },
    /// Simulation running
    Playing,
    /// Overlay with Resume / Settings / Save Game / Quit
    Paused,
    /// Volume sliders
    Settings {
        selected: VolumeChannel,
        dragging: Option<VolumeChannel>,
    },
    /// Typing a name for a save
    SaveName { text: String },
    /// "Are you sure you want to quit?"
    ConfirmQuit,
    /// Transient text, then `next`
    Message {
        text: String,
        ticks_left: u32,
        next: Box<Screen>,
    },
    /// 3-2-1 before a restored game resumes
    Countdown { remaining: u32, ticks_left: u32 },
    /// Final score, restart or quit
    GameOver,
    /// Terminal state; the driver loop stops
    Exit,
}

impl Screen {
    pub fn message(text: impl Into<String>, ticks: u32, next: Screen) -> Self {
        Screen::Message {
            text: text.into(),
            ticks_left: ticks.max(1),
            next: Box::new(next),
        }
    }

    pub fn settings() -> Self {
        Screen::Settings {
            selected: VolumeChannel::Music,
            dragging: None,
        }
    }

    pub fn save_name() -> Self {
        Screen::SaveName {
            text: String::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Screen::Start => "Start",
            Screen::LoadMenu { .. } => "LoadMenu",
            Screen::Playing => "Playing",
            Screen::Paused => "Paused",
            Screen::Settings { .. } => "Settings",
            Screen::SaveName { .. } => "SaveName",
            Screen::ConfirmQuit => "ConfirmQuit",
            Screen::Message { .. } => "Message",
            Screen::Countdown { .. } => "Countdown",
            Screen::GameOver => "GameOver",
            Screen::Exit => "Exit",
        }
    }

    /// Screens drawn on top of a frozen game
    pub fn shows_game(&self) -> bool {
        matches!(
            self,
            Screen::Playing
                | Screen::Paused
                | Screen::Settings { .. }
                | Screen::SaveName { .. }
                | Screen::ConfirmQuit
                | Screen::GameOver
        )
    }
}
