//! crossterm events to `InputEvent`
//!
//! Terminals that support the kitty keyboard protocol report key releases.
//! Elsewhere a key counts as held until it has not repeated for a short
//! while, and the release is synthesized.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::input::{InputEvent, Key};
use crate::secs_to_ticks;

use super::viewport::Viewport;

/// Hold time assumed after a press when releases are not reported.
/// Long enough to bridge the terminal's initial key-repeat delay.
pub const SYNTHETIC_HOLD_SECS: f32 = 0.55;

#[derive(Debug)]
pub struct EventTranslator {
    viewport: Viewport,
    /// Terminal reports key release events
    reports_release: bool,
    hold_ticks: u32,
    /// Keys waiting for a synthesized release, with frames left
    pending: Vec<(Key, u32)>,
}

impl EventTranslator {
    pub fn new(viewport: Viewport, reports_release: bool, fps: u32) -> Self {
        Self {
            viewport,
            reports_release,
            hold_ticks: secs_to_ticks(SYNTHETIC_HOLD_SECS, fps),
            pending: Vec::new(),
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Translate one terminal event, appending to `out`
    pub fn translate(&mut self, event: Event, out: &mut Vec<InputEvent>) {
        match event {
            Event::Key(key) => self.on_key(key, out),
            Event::Mouse(mouse) => self.on_mouse(mouse, out),
            Event::Resize(cols, rows) => {
                log::debug!("Terminal resized to {}x{}", cols, rows);
                self.viewport = Viewport::new(cols, rows);
            }
            _ => {}
        }
    }

    /// Once per frame; emits synthesized releases that came due
    pub fn tick(&mut self, out: &mut Vec<InputEvent>) {
        for (key, ticks) in &mut self.pending {
            *ticks = ticks.saturating_sub(1);
            if *ticks == 0 {
                out.push(InputEvent::KeyUp(*key));
            }
        }
        self.pending.retain(|(_, ticks)| *ticks > 0);
    }

    fn on_key(&mut self, event: KeyEvent, out: &mut Vec<InputEvent>) {
        if event.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(event.code, KeyCode::Char('c' | 'C'))
        {
            out.push(InputEvent::Quit);
            return;
        }

        let Some(key) = map_key(event.code) else {
            return;
        };

        match event.kind {
            KeyEventKind::Press => out.push(InputEvent::KeyDown(key)),
            KeyEventKind::Repeat => out.push(InputEvent::KeyRepeat(key)),
            KeyEventKind::Release => {
                out.push(InputEvent::KeyUp(key));
                return;
            }
        }
        if !self.reports_release {
            self.hold(key);
        }
    }

    /// Restart the synthetic hold for `key`
    fn hold(&mut self, key: Key) {
        match self.pending.iter_mut().find(|(k, _)| *k == key) {
            Some((_, ticks)) => *ticks = self.hold_ticks,
            None => self.pending.push((key, self.hold_ticks)),
        }
    }

    fn on_mouse(&mut self, event: MouseEvent, out: &mut Vec<InputEvent>) {
        let p = self.viewport.to_playfield(event.column, event.row);
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => out.push(InputEvent::MouseDown(p)),
            MouseEventKind::Up(MouseButton::Left) => out.push(InputEvent::MouseUp(p)),
            MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
                out.push(InputEvent::MouseMove(p))
            }
            _ => {}
        }
    }
}

fn map_key(code: KeyCode) -> Option<Key> {
    Some(match code {
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Escape,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Char(c) => Key::Char(c),
        _ => return None,
    })
}
