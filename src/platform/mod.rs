//! Terminal platform layer
//!
//! Handles the native terminal side of the game:
//! - Frame pacing (`clock`)
//! - Playfield <-> character cell mapping (`viewport`)
//! - crossterm events to `InputEvent` (`input`)
//! - Drawing the app and owning the terminal (`terminal`)

pub mod clock;
pub mod input;
pub mod terminal;
pub mod viewport;

pub use clock::FrameClock;
pub use input::EventTranslator;
pub use terminal::{BellBackend, Canvas, TerminalGuard};
pub use viewport::Viewport;
