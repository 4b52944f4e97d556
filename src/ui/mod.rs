//! Menu layout and hit-testing
//!
//! All positions are in playfield pixels. The state machine uses these for
//! pointer input and the renderer uses the same rectangles to draw.

use glam::Vec2;

use crate::consts::{HEIGHT, WIDTH};
use crate::settings::VolumeChannel;
use crate::sim::Rect;

pub const BUTTON_WIDTH: f32 = 200.0;
pub const BUTTON_HEIGHT: f32 = 50.0;
pub const SLIDER_WIDTH: f32 = 300.0;
pub const SLIDER_HEIGHT: f32 = 20.0;
pub const DIALOG_BUTTON_WIDTH: f32 = 150.0;
pub const TEXT_BOX_MIN_WIDTH: f32 = 300.0;
pub const TEXT_BOX_HEIGHT: f32 = 50.0;
/// Approximate glyph advance used to grow the text box
pub const GLYPH_WIDTH: f32 = 18.0;
pub const LOAD_ROW_SPACING: f32 = 50.0;

/// Clickable things across all screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonId {
    StartGame,
    LoadGame,
    Quit,
    Resume,
    Settings,
    SaveGame,
    Back,
    Yes,
    No,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Button {
    pub id: ButtonId,
    pub label: &'static str,
    pub rect: Rect,
}

fn centered_button(id: ButtonId, label: &'static str, y_offset: f32) -> Button {
    Button {
        id,
        label,
        rect: Rect::from_top_left(
            WIDTH / 2.0 - BUTTON_WIDTH / 2.0,
            HEIGHT / 2.0 + y_offset,
            BUTTON_WIDTH,
            BUTTON_HEIGHT,
        ),
    }
}

/// Title screen buttons
pub fn start_buttons() -> [Button; 3] {
    [
        centered_button(ButtonId::StartGame, "Start Game", -100.0),
        centered_button(ButtonId::LoadGame, "Load Game", -30.0),
        centered_button(ButtonId::Quit, "Quit", 40.0),
    ]
}

/// Pause overlay buttons
pub fn pause_buttons() -> [Button; 4] {
    [
        centered_button(ButtonId::Resume, "Resume", -120.0),
        centered_button(ButtonId::Settings, "Settings", -50.0),
        centered_button(ButtonId::SaveGame, "Save Game", 20.0),
        centered_button(ButtonId::Quit, "Quit", 90.0),
    ]
}

/// Settings screen back button
pub fn settings_buttons() -> [Button; 1] {
    [centered_button(ButtonId::Back, "Back", 150.0)]
}

/// Quit confirmation buttons
pub fn confirm_buttons() -> [Button; 2] {
    let y = HEIGHT / 2.0 + 50.0;
    [
        Button {
            id: ButtonId::Yes,
            label: "Yes",
            rect: Rect::from_top_left(
                WIDTH / 2.0 - DIALOG_BUTTON_WIDTH - 10.0,
                y,
                DIALOG_BUTTON_WIDTH,
                BUTTON_HEIGHT,
            ),
        },
        Button {
            id: ButtonId::No,
            label: "No",
            rect: Rect::from_top_left(WIDTH / 2.0 + 10.0, y, DIALOG_BUTTON_WIDTH, BUTTON_HEIGHT),
        },
    ]
}

/// First button under the pointer
pub fn hit(buttons: &[Button], p: Vec2) -> Option<ButtonId> {
    buttons
        .iter()
        .find(|b| b.rect.contains_point(p))
        .map(|b| b.id)
}

/// Volume slider track
pub fn slider_rect(channel: VolumeChannel) -> Rect {
    let y = match channel {
        VolumeChannel::Music => HEIGHT / 2.0 - 100.0,
        VolumeChannel::Sfx => HEIGHT / 2.0,
    };
    Rect::from_top_left(WIDTH / 2.0 - SLIDER_WIDTH / 2.0, y, SLIDER_WIDTH, SLIDER_HEIGHT)
}

/// Slider under the pointer
pub fn slider_at(p: Vec2) -> Option<VolumeChannel> {
    [VolumeChannel::Music, VolumeChannel::Sfx]
        .into_iter()
        .find(|c| slider_rect(*c).contains_point(p))
}

/// Volume for a pointer x position on a slider (clamped to 0.0 - 1.0)
pub fn slider_value_at(channel: VolumeChannel, x: f32) -> f32 {
    let rect = slider_rect(channel);
    ((x - rect.left()) / SLIDER_WIDTH).clamp(0.0, 1.0)
}

/// Handle position for a volume
pub fn slider_handle(channel: VolumeChannel, volume: f32) -> Vec2 {
    let rect = slider_rect(channel);
    Vec2::new(rect.left() + volume * SLIDER_WIDTH, rect.center.y)
}

/// Save-name input box; grows with the text
pub fn text_box(text: &str) -> Rect {
    let width = TEXT_BOX_MIN_WIDTH.max(text.chars().count() as f32 * GLYPH_WIDTH + 10.0);
    Rect::from_top_left(
        WIDTH / 2.0 - TEXT_BOX_MIN_WIDTH / 2.0,
        HEIGHT / 2.0,
        width,
        TEXT_BOX_HEIGHT,
    )
}

/// Vertical center of a row in the load menu
pub fn load_row_y(index: usize) -> f32 {
    HEIGHT / 2.0 - 100.0 + index as f32 * LOAD_ROW_SPACING
}

/// Clickable area of a row in the load menu
pub fn load_row_rect(index: usize) -> Rect {
    Rect::new(
        Vec2::new(WIDTH / 2.0, load_row_y(index)),
        Vec2::new(BUTTON_WIDTH, BUTTON_HEIGHT),
    )
}

/// Row under the pointer, if any
pub fn load_row_at(count: usize, p: Vec2) -> Option<usize> {
    (0..count).find(|i| load_row_rect(*i).contains_point(p))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_buttons_hit() {
        let buttons = start_buttons();
        assert_eq!(hit(&buttons, Vec2::new(500.0, 325.0)), Some(ButtonId::StartGame));
        assert_eq!(hit(&buttons, Vec2::new(450.0, 390.0)), Some(ButtonId::LoadGame));
        assert_eq!(hit(&buttons, Vec2::new(599.0, 460.0)), Some(ButtonId::Quit));
        assert_eq!(hit(&buttons, Vec2::new(500.0, 360.0)), None);
        assert_eq!(hit(&buttons, Vec2::new(100.0, 325.0)), None);
    }

    #[test]
    fn test_pause_buttons_do_not_overlap() {
        let buttons = pause_buttons();
        for (i, a) in buttons.iter().enumerate() {
            for b in &buttons[i + 1..] {
                assert!(!a.rect.intersects(&b.rect));
            }
        }
    }

    #[test]
    fn test_confirm_buttons() {
        let buttons = confirm_buttons();
        assert_eq!(hit(&buttons, Vec2::new(420.0, 470.0)), Some(ButtonId::Yes));
        assert_eq!(hit(&buttons, Vec2::new(580.0, 470.0)), Some(ButtonId::No));
        assert_eq!(hit(&buttons, Vec2::new(500.0, 470.0)), None);
    }

    #[test]
    fn test_slider_value() {
        assert_eq!(slider_value_at(VolumeChannel::Music, 350.0), 0.0);
        assert_eq!(slider_value_at(VolumeChannel::Music, 500.0), 0.5);
        assert_eq!(slider_value_at(VolumeChannel::Sfx, 650.0), 1.0);
        assert_eq!(slider_value_at(VolumeChannel::Sfx, 2000.0), 1.0);
        assert_eq!(slider_value_at(VolumeChannel::Sfx, -5.0), 0.0);
    }

    #[test]
    fn test_slider_at() {
        assert_eq!(slider_at(Vec2::new(500.0, 310.0)), Some(VolumeChannel::Music));
        assert_eq!(slider_at(Vec2::new(500.0, 410.0)), Some(VolumeChannel::Sfx));
        assert_eq!(slider_at(Vec2::new(500.0, 360.0)), None);
    }

    #[test]
    fn test_text_box_grows() {
        assert_eq!(text_box("abc").size.x, TEXT_BOX_MIN_WIDTH);
        let long = "x".repeat(30);
        assert!(text_box(&long).size.x > TEXT_BOX_MIN_WIDTH);
        assert_eq!(text_box(&long).left(), text_box("").left());
    }

    #[test]
    fn test_load_rows() {
        assert_eq!(load_row_at(3, Vec2::new(500.0, 300.0)), Some(0));
        assert_eq!(load_row_at(3, Vec2::new(500.0, 400.0)), Some(2));
        assert_eq!(load_row_at(2, Vec2::new(500.0, 400.0)), None);
        assert_eq!(load_row_at(3, Vec2::new(100.0, 300.0)), None);
    }
}
