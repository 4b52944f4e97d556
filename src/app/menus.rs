//! Per-screen input handling
//!
//! Each handler returns the next screen, or `None` to stay.

use crate::audio::{AudioManager, SoundEffect};
use crate::consts::*;
use crate::input::{InputEvent, Key};
use crate::persistence::{SaveSlot, SaveStore, Snapshot};
use crate::secs_to_ticks;
use crate::settings::{Settings, VOLUME_STEP, VolumeChannel};
use crate::ui::{self, Button, ButtonId};

use super::{App, Screen};

/// Longest accepted save name
pub const MAX_SAVE_NAME_LEN: usize = 40;

fn set_volume(settings: &mut Settings, audio: &mut AudioManager, channel: VolumeChannel, vol: f32) {
    settings.set_volume(channel, vol);
    audio.apply_settings(settings);
}

impl App {
    /// Up/Down move the highlight through a button menu, Enter picks it
    fn menu_key(&mut self, buttons: &[Button], key: Key) -> Option<ButtonId> {
        let count = buttons.len();
        match key {
            Key::Up => {
                self.menu_focus = (self.menu_focus + count - 1) % count;
                None
            }
            Key::Down => {
                self.menu_focus = (self.menu_focus + 1) % count;
                None
            }
            Key::Enter => buttons.get(self.menu_focus).map(|b| b.id),
            _ => None,
        }
    }

    pub(super) fn on_start(&mut self, event: InputEvent) -> Option<Screen> {
        let buttons = ui::start_buttons();
        let chosen = match event {
            InputEvent::KeyDown(key) => {
                if self.secret.push(key) {
                    log::info!("Easter egg activated");
                    self.easter_egg_armed = true;
                    self.audio.play(SoundEffect::EasterEgg);
                    return Some(Screen::message(
                        "Easter Egg Activated!",
                        self.message_ticks(),
                        Screen::Start,
                    ));
                }
                match key {
                    Key::Escape => Some(ButtonId::Quit),
                    k if k.is_letter('l') => Some(ButtonId::LoadGame),
                    k => self.menu_key(&buttons, k),
                }
            }
            InputEvent::MouseDown(p) => ui::hit(&buttons, p),
            _ => None,
        }?;

        match chosen {
            ButtonId::StartGame => {
                let lives = if self.easter_egg_armed {
                    EASTER_EGG_LIVES
                } else {
                    PLAYER_START_LIVES
                };
                self.easter_egg_armed = false;
                Some(self.new_game(lives))
            }
            ButtonId::LoadGame => Some(self.open_load_menu()),
            ButtonId::Quit => Some(Screen::Exit),
            _ => None,
        }
    }

    fn open_load_menu(&mut self) -> Screen {
        match self.store.list() {
            Ok(slots) if slots.is_empty() => {
                log::info!("No saved games in {}", self.store.dir().display());
                Screen::message("No saved games found.", self.message_ticks(), Screen::Start)
            }
            Ok(slots) => {
                log::debug!("{} saved games in {}", slots.len(), self.store.dir().display());
                Screen::LoadMenu { slots, selected: 0 }
            }
            Err(e) => {
                log::warn!("Listing saves failed: {e:#}");
                Screen::message(
                    format!("Could not read saves: {e}"),
                    self.message_ticks(),
                    Screen::Start,
                )
            }
        }
    }

    pub(super) fn on_load_menu(&mut self, event: InputEvent) -> Option<Screen> {
        let Screen::LoadMenu { slots, selected } = &mut self.screen else {
            return None;
        };
        let count = slots.len();
        if count == 0 {
            return Some(Screen::Start);
        }

        let slot = match event {
            InputEvent::KeyDown(Key::Up) => {
                *selected = (*selected + count - 1) % count;
                None
            }
            InputEvent::KeyDown(Key::Down) => {
                *selected = (*selected + 1) % count;
                None
            }
            InputEvent::KeyDown(Key::Enter) => slots.get(*selected).cloned(),
            InputEvent::KeyDown(Key::Escape) => return Some(Screen::Start),
            InputEvent::MouseDown(p) => ui::load_row_at(count, p).and_then(|i| slots.get(i).cloned()),
            _ => None,
        }?;

        Some(self.load_slot(&slot))
    }

    fn load_slot(&mut self, slot: &SaveSlot) -> Screen {
        match self.store.load(slot) {
            Ok(snapshot) => {
                let seed = self.next_seed();
                self.begin_session(snapshot.restore(seed, self.config.fps));
                let countdown = Screen::Countdown {
                    remaining: COUNTDOWN_STEPS,
                    ticks_left: secs_to_ticks(1.0, self.config.fps),
                };
                Screen::message("Resuming saved game...", self.message_ticks(), countdown)
            }
            Err(e) => {
                log::warn!("Load failed: {e:#}");
                Screen::message(
                    format!("Load failed: {e}"),
                    self.message_ticks(),
                    Screen::Start,
                )
            }
        }
    }

    pub(super) fn on_playing(&mut self, event: InputEvent) -> Option<Screen> {
        match event {
            InputEvent::KeyDown(Key::Escape) => Some(Screen::Paused),
            _ => None,
        }
    }

    pub(super) fn on_paused(&mut self, event: InputEvent) -> Option<Screen> {
        let buttons = ui::pause_buttons();
        let chosen = match event {
            InputEvent::KeyDown(Key::Escape) => Some(ButtonId::Resume),
            InputEvent::KeyDown(key) => self.menu_key(&buttons, key),
            InputEvent::MouseDown(p) => ui::hit(&buttons, p),
            _ => None,
        }?;

        match chosen {
            ButtonId::Resume => Some(Screen::Playing),
            ButtonId::Settings => Some(Screen::settings()),
            ButtonId::SaveGame => Some(Screen::save_name()),
            ButtonId::Quit => Some(Screen::ConfirmQuit),
            _ => None,
        }
    }

    pub(super) fn on_settings(&mut self, event: InputEvent) -> Option<Screen> {
        let Screen::Settings { selected, dragging } = &mut self.screen else {
            return None;
        };

        match event {
            InputEvent::MouseDown(p) => {
                if ui::hit(&ui::settings_buttons(), p) == Some(ButtonId::Back) {
                    return Some(self.leave_settings());
                }
                if let Some(channel) = ui::slider_at(p) {
                    *selected = channel;
                    *dragging = Some(channel);
                    let vol = ui::slider_value_at(channel, p.x);
                    set_volume(&mut self.settings, &mut self.audio, channel, vol);
                }
                None
            }
            InputEvent::MouseMove(p) => {
                if let Some(channel) = *dragging {
                    let vol = ui::slider_value_at(channel, p.x);
                    set_volume(&mut self.settings, &mut self.audio, channel, vol);
                }
                None
            }
            InputEvent::MouseUp(_) => {
                *dragging = None;
                None
            }
            InputEvent::KeyDown(Key::Up | Key::Down) => {
                *selected = selected.other();
                None
            }
            InputEvent::KeyDown(key @ (Key::Left | Key::Right)) => {
                let delta = if key == Key::Left { -VOLUME_STEP } else { VOLUME_STEP };
                self.settings.adjust_volume(*selected, delta);
                self.audio.apply_settings(&self.settings);
                None
            }
            InputEvent::KeyDown(Key::Escape | Key::Enter) => Some(self.leave_settings()),
            _ => None,
        }
    }

    /// Persist volumes and go back to the pause overlay
    fn leave_settings(&mut self) -> Screen {
        if let Err(e) = self.settings.save(&self.config.settings_path) {
            log::warn!("Could not save settings: {e:#}");
        }
        Screen::Paused
    }

    pub(super) fn on_save_name(&mut self, event: InputEvent) -> Option<Screen> {
        let Screen::SaveName { text } = &mut self.screen else {
            return None;
        };

        match event {
            InputEvent::KeyDown(Key::Enter) => {
                let name = std::mem::take(text);
                Some(self.save_game(&name))
            }
            InputEvent::KeyDown(Key::Escape) => Some(Screen::Paused),
            InputEvent::KeyDown(Key::Backspace) => {
                text.pop();
                None
            }
            InputEvent::KeyDown(Key::Char(c)) => {
                if !c.is_control() && text.chars().count() < MAX_SAVE_NAME_LEN {
                    text.push(c);
                }
                None
            }
            // Clicking away cancels
            InputEvent::MouseDown(p) if !ui::text_box(text).contains_point(p) => {
                Some(Screen::Paused)
            }
            _ => None,
        }
    }

    fn save_game(&mut self, name: &str) -> Screen {
        if SaveStore::file_name_for(name).is_none() {
            log::debug!("Save cancelled: empty name");
            return Screen::Paused;
        }
        let Some(state) = &self.session else {
            return Screen::Paused;
        };

        let snapshot = Snapshot::capture(state);
        let text = match self.store.save(name, &snapshot) {
            Ok(_) => format!("Game saved as '{}'", name.trim()),
            Err(e) => {
                log::warn!("Save failed: {e:#}");
                format!("Save failed: {e}")
            }
        };
        Screen::message(text, self.message_ticks(), Screen::Paused)
    }

    pub(super) fn on_confirm_quit(&mut self, event: InputEvent) -> Option<Screen> {
        let chosen = match event {
            InputEvent::KeyDown(Key::Escape) => Some(ButtonId::No),
            InputEvent::KeyDown(k) if k.is_letter('n') => Some(ButtonId::No),
            InputEvent::KeyDown(k) if k.is_letter('y') => Some(ButtonId::Yes),
            InputEvent::MouseDown(p) => ui::hit(&ui::confirm_buttons(), p),
            _ => None,
        }?;

        match chosen {
            ButtonId::Yes => Some(Screen::Exit),
            _ => Some(Screen::Paused),
        }
    }

    pub(super) fn on_game_over(&mut self, event: InputEvent) -> Option<Screen> {
        match event {
            InputEvent::KeyDown(k) if k.is_letter('r') => Some(self.new_game(PLAYER_START_LIVES)),
            InputEvent::KeyDown(k) if k.is_letter('q') => Some(Screen::Exit),
            _ => None,
        }
    }
}
