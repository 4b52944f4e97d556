//! Platform-neutral input events

use glam::Vec2;

use crate::sim::TickInput;

/// Keys the game cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Escape,
    Backspace,
    /// Printable character (case preserved)
    Char(char),
}

impl Key {
    /// Movement direction for arrow keys and WASD
    fn direction(&self) -> Option<Direction> {
        match self {
            Key::Up => Some(Direction::Up),
            Key::Down => Some(Direction::Down),
            Key::Left => Some(Direction::Left),
            Key::Right => Some(Direction::Right),
            Key::Char(c) => match c.to_ascii_lowercase() {
                'w' => Some(Direction::Up),
                's' => Some(Direction::Down),
                'a' => Some(Direction::Left),
                'd' => Some(Direction::Right),
                _ => None,
            },
            _ => None,
        }
    }

    /// Arrow keys and WASD
    pub fn is_movement(&self) -> bool {
        self.direction().is_some()
    }

    /// Case-insensitive letter match
    pub fn is_letter(&self, letter: char) -> bool {
        matches!(self, Key::Char(c) if c.eq_ignore_ascii_case(&letter))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// One input event, already translated from the platform
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Window closed / interrupt
    Quit,
    KeyDown(Key),
    /// Auto-repeat of a key that is already down
    KeyRepeat(Key),
    KeyUp(Key),
    /// Pointer pressed at a playfield position
    MouseDown(Vec2),
    MouseUp(Vec2),
    MouseMove(Vec2),
}

/// Tracks which movement keys are held. Arrow and WASD keys for the same
/// direction count separately, so releasing one keeps the other held.
#[derive(Debug, Clone, Default)]
pub struct HeldKeys {
    held: Vec<Key>,
}

impl HeldKeys {
    pub fn press(&mut self, key: Key) {
        let key = normalize(key);
        if key.direction().is_some() && !self.held.contains(&key) {
            self.held.push(key);
        }
    }

    pub fn release(&mut self, key: Key) {
        let key = normalize(key);
        self.held.retain(|k| *k != key);
    }

    /// Current movement state
    pub fn tick_input(&self) -> TickInput {
        let mut input = TickInput::default();
        for dir in self.held.iter().filter_map(Key::direction) {
            match dir {
                Direction::Up => input.up = true,
                Direction::Down => input.down = true,
                Direction::Left => input.left = true,
                Direction::Right => input.right = true,
            }
        }
        input
    }
}

fn normalize(key: Key) -> Key {
    match key {
        Key::Char(c) => Key::Char(c.to_ascii_lowercase()),
        k => k,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrows_and_wasd() {
        let mut held = HeldKeys::default();
        held.press(Key::Left);
        held.press(Key::Char('W'));
        let input = held.tick_input();
        assert!(input.left && input.up);
        assert!(!input.right && !input.down);
    }

    #[test]
    fn test_release_one_of_two_keys_for_same_direction() {
        let mut held = HeldKeys::default();
        held.press(Key::Right);
        held.press(Key::Char('d'));
        held.release(Key::Right);
        assert!(held.tick_input().right);
        held.release(Key::Char('D'));
        assert!(!held.tick_input().right);
    }

    #[test]
    fn test_non_movement_keys_ignored() {
        let mut held = HeldKeys::default();
        held.press(Key::Char('x'));
        held.press(Key::Enter);
        assert_eq!(held.tick_input(), TickInput::default());
    }

    #[test]
    fn test_is_movement() {
        assert!(Key::Up.is_movement());
        assert!(Key::Char('S').is_movement());
        assert!(!Key::Escape.is_movement());
        assert!(!Key::Char('b').is_movement());
    }

    #[test]
    fn test_is_letter() {
        assert!(Key::Char('R').is_letter('r'));
        assert!(Key::Char('q').is_letter('Q'));
        assert!(!Key::Enter.is_letter('r'));
    }
}
