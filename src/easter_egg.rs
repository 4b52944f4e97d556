//! Secret code on the title screen
//!
//! Up, Up, Down, Down, Left, Right, Left, Right, B, A. Progress is a strict
//! prefix match: any wrong key throws away everything entered so far.

use crate::input::Key;

/// The 10-key sequence
pub const SECRET_CODE: [Key; 10] = [
    Key::Up,
    Key::Up,
    Key::Down,
    Key::Down,
    Key::Left,
    Key::Right,
    Key::Left,
    Key::Right,
    Key::Char('b'),
    Key::Char('a'),
];

#[derive(Debug, Clone, Default)]
pub struct SecretCode {
    progress: usize,
}

impl SecretCode {
    /// Number of keys matched so far
    pub fn progress(&self) -> usize {
        self.progress
    }

    /// Feed one key press. Returns true when the full code was just entered.
    pub fn push(&mut self, key: Key) -> bool {
        let key = match key {
            Key::Char(c) => Key::Char(c.to_ascii_lowercase()),
            k => k,
        };

        if SECRET_CODE[self.progress] != key {
            self.progress = 0;
            return false;
        }

        self.progress += 1;
        if self.progress == SECRET_CODE.len() {
            self.progress = 0;
            return true;
        }
        false
    }
}
