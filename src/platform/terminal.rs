//! Terminal frontend
//!
//! Each frame the whole app view is drawn into a `Canvas` of character cells
//! and written out row by row. `TerminalGuard` puts the terminal into raw
//! mode on the alternate screen and restores it when dropped.

use std::io::{self, Stdout, Write, stdout};

use anyhow::Context;
use crossterm::{
    cursor,
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute, queue,
    style::{self, Color},
    terminal,
};
use glam::Vec2;

use crate::app::{App, Screen};
use crate::audio::{AudioBackend, LogBackend, MusicTrack, SoundEffect};
use crate::consts::{HEIGHT, WIDTH};
use crate::persistence::SaveSlot;
use crate::settings::{Settings, VolumeChannel};
use crate::sim::{GameState, Rect};
use crate::starfield::Starfield;
use crate::ui::{self, Button};

use super::viewport::Viewport;

const BACKGROUND: Color = Color::Black;
const TEXT: Color = Color::White;
const HIGHLIGHT: Color = Color::Yellow;
const DIMMED: Color = Color::DarkGrey;
const PLAYER: Color = Color::Cyan;
const OBSTACLE: Color = Color::DarkYellow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Cell {
    const BLANK: Cell = Cell {
        ch: ' ',
        fg: TEXT,
        bg: BACKGROUND,
    };
}

/// Character grid covering the playfield
#[derive(Debug, Clone)]
pub struct Canvas {
    viewport: Viewport,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            cells: vec![Cell::BLANK; viewport.cols as usize * viewport.rows as usize],
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Match a new terminal size (contents are cleared)
    pub fn resize(&mut self, viewport: Viewport) {
        if viewport != self.viewport {
            *self = Self::new(viewport);
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    pub fn get(&self, col: u16, row: u16) -> Option<Cell> {
        self.index(col, row).map(|i| self.cells[i])
    }

    fn index(&self, col: u16, row: u16) -> Option<usize> {
        (col < self.viewport.cols && row < self.viewport.rows)
            .then(|| row as usize * self.viewport.cols as usize + col as usize)
    }

    fn set(&mut self, col: u16, row: u16, cell: Cell) {
        if let Some(i) = self.index(col, row) {
            self.cells[i] = cell;
        }
    }

    /// Fill the cells covered by a playfield rectangle
    pub fn fill(&mut self, rect: &Rect, ch: char, fg: Color, bg: Color) {
        let Some(span) = self.viewport.span(rect) else {
            return;
        };
        for row in span.row0..span.row1 {
            for col in span.col0..span.col1 {
                self.set(col, row, Cell { ch, fg, bg });
            }
        }
    }

    /// Write text starting at a cell, clipped at the right edge.
    /// The background of the cells underneath is kept.
    pub fn text(&mut self, col: u16, row: u16, text: &str, fg: Color) {
        for (i, ch) in text.chars().enumerate() {
            let col = col as usize + i;
            if col >= self.viewport.cols as usize {
                break;
            }
            let col = col as u16;
            if let Some(under) = self.get(col, row) {
                self.set(col, row, Cell { ch, fg, bg: under.bg });
            }
        }
    }

    /// Write text centered on a playfield point
    pub fn text_at(&mut self, p: Vec2, text: &str, fg: Color) {
        let (col, row) = self.viewport.cell_at(p);
        let half = (text.chars().count() / 2) as u16;
        self.text(col.saturating_sub(half), row, text, fg);
    }

    /// Write text centered horizontally at a playfield height
    pub fn text_centered(&mut self, y: f32, text: &str, fg: Color) {
        self.text_at(Vec2::new(WIDTH / 2.0, y), text, fg);
    }

    /// Grey out everything drawn so far, for overlays
    pub fn dim(&mut self) {
        for cell in &mut self.cells {
            cell.fg = DIMMED;
        }
    }

    /// Characters of one row
    pub fn row_text(&self, row: u16) -> String {
        (0..self.viewport.cols)
            .filter_map(|col| self.get(col, row))
            .map(|c| c.ch)
            .collect()
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        (0..self.viewport.rows).any(|row| self.row_text(row).contains(needle))
    }

    /// Write the grid out, changing colors only where they differ
    pub fn flush(&self, out: &mut impl Write) -> io::Result<()> {
        let mut current: Option<(Color, Color)> = None;
        for row in 0..self.viewport.rows {
            queue!(out, cursor::MoveTo(0, row))?;
            for col in 0..self.viewport.cols {
                let Some(cell) = self.get(col, row) else {
                    continue;
                };
                if current != Some((cell.fg, cell.bg)) {
                    queue!(
                        out,
                        style::SetForegroundColor(cell.fg),
                        style::SetBackgroundColor(cell.bg)
                    )?;
                    current = Some((cell.fg, cell.bg));
                }
                queue!(out, style::Print(cell.ch))?;
            }
        }
        queue!(out, style::ResetColor)?;
        out.flush()
    }
}

/// Draw the whole app view
pub fn draw(canvas: &mut Canvas, app: &App) {
    canvas.clear();
    let screen = app.screen();

    if game_backdrop(screen) {
        if let Some(state) = app.session() {
            draw_game(canvas, state);
        }
    }

    match screen {
        Screen::Start => {
            draw_stars(canvas, app.starfield());
            canvas.text_centered(HEIGHT / 3.0 - 100.0, "Space Dodge", HIGHLIGHT);
            draw_buttons(canvas, &ui::start_buttons(), Some(app.menu_focus()));
            canvas.text_centered(HEIGHT - 30.0, "Arrows/WASD move, Esc pauses", DIMMED);
        }
        Screen::LoadMenu { slots, selected } => draw_load_menu(canvas, slots, *selected),
        Screen::Playing | Screen::Exit => {}
        Screen::Paused => {
            canvas.dim();
            canvas.text_centered(HEIGHT / 2.0 - 200.0, "Game Paused", HIGHLIGHT);
            draw_buttons(canvas, &ui::pause_buttons(), Some(app.menu_focus()));
        }
        Screen::Settings { selected, .. } => {
            canvas.dim();
            draw_settings(canvas, app.settings(), *selected);
        }
        Screen::SaveName { text } => {
            canvas.dim();
            draw_save_name(canvas, text);
        }
        Screen::ConfirmQuit => {
            canvas.dim();
            canvas.text_centered(HEIGHT / 2.0 - 50.0, "Are you sure you want to quit?", TEXT);
            draw_buttons(canvas, &ui::confirm_buttons(), None);
            canvas.text_centered(HEIGHT / 2.0 + 150.0, "Y / N", DIMMED);
        }
        Screen::Message { text, .. } => {
            canvas.dim();
            canvas.text_centered(HEIGHT / 2.0, text, TEXT);
        }
        Screen::Countdown { remaining, .. } => {
            canvas.dim();
            canvas.text_centered(HEIGHT / 2.0, &remaining.to_string(), HIGHLIGHT);
        }
        Screen::GameOver => {
            canvas.dim();
            let score = app.session().map_or(0, |s| s.player.score);
            canvas.text_centered(HEIGHT / 2.0 - 50.0, "Game Over", HIGHLIGHT);
            canvas.text_centered(HEIGHT / 2.0 + 20.0, &format!("Score: {score}"), TEXT);
            canvas.text_centered(
                HEIGHT / 2.0 + 60.0,
                "Press 'R' to restart or 'Q' to quit",
                TEXT,
            );
        }
    }
}

/// Screens that show the (frozen or running) game underneath
fn game_backdrop(screen: &Screen) -> bool {
    match screen {
        Screen::Message { next, .. } => game_backdrop(next),
        Screen::Countdown { .. } => true,
        other => other.shows_game(),
    }
}

fn draw_game(canvas: &mut Canvas, state: &GameState) {
    for obstacle in &state.obstacles {
        canvas.fill(&obstacle.rect, '█', OBSTACLE, BACKGROUND);
    }
    canvas.fill(&state.player.rect, '█', PLAYER, BACKGROUND);

    canvas.text_at(
        Vec2::new(80.0, 30.0),
        &format!("Score: {}", state.player.score),
        TEXT,
    );
    canvas.text_at(
        Vec2::new(WIDTH - 80.0, 30.0),
        &format!("Lives: {}", state.player.lives),
        TEXT,
    );
}

fn draw_stars(canvas: &mut Canvas, starfield: &Starfield) {
    for star in starfield.stars() {
        let (col, row) = canvas.viewport().cell_at(*star);
        canvas.text(col, row, "·", TEXT);
    }
}

fn draw_buttons(canvas: &mut Canvas, buttons: &[Button], focus: Option<usize>) {
    for (i, button) in buttons.iter().enumerate() {
        let bg = if focus == Some(i) { HIGHLIGHT } else { TEXT };
        canvas.fill(&button.rect, ' ', Color::Black, bg);
        canvas.text_at(button.rect.center, button.label, Color::Black);
    }
}

fn draw_load_menu(canvas: &mut Canvas, slots: &[SaveSlot], selected: usize) {
    canvas.text_centered(HEIGHT / 2.0 - 200.0, "Load Game", HIGHLIGHT);
    for (i, slot) in slots.iter().enumerate() {
        let color = if i == selected { HIGHLIGHT } else { TEXT };
        canvas.text_centered(ui::load_row_y(i), &slot.name, color);
    }
    canvas.text_centered(HEIGHT - 30.0, "Enter loads, Esc goes back", DIMMED);
}

fn draw_settings(canvas: &mut Canvas, settings: &Settings, selected: VolumeChannel) {
    canvas.text_centered(HEIGHT / 2.0 - 200.0, "Settings", HIGHLIGHT);

    for channel in [VolumeChannel::Music, VolumeChannel::Sfx] {
        let track = ui::slider_rect(channel);
        let volume = settings.volume(channel);
        let color = if channel == selected { HIGHLIGHT } else { TEXT };

        canvas.text_centered(track.top() - 30.0, channel.as_str(), color);
        canvas.fill(&track, '─', TEXT, BACKGROUND);
        canvas.text_at(ui::slider_handle(channel, volume), "●", HIGHLIGHT);
        canvas.text_at(
            Vec2::new(track.right() + 60.0, track.center.y),
            &format!("{:.0}%", volume * 100.0),
            color,
        );
    }

    draw_buttons(canvas, &ui::settings_buttons(), None);
}

fn draw_save_name(canvas: &mut Canvas, text: &str) {
    canvas.text_centered(HEIGHT / 2.0 - 50.0, "Enter save name:", TEXT);

    let input = ui::text_box(text);
    canvas.fill(&input, ' ', TEXT, Color::DarkBlue);
    let (col, row) = canvas.viewport().cell_at(Vec2::new(input.left() + 5.0, input.center.y));
    canvas.text(col, row, &format!("{text}_"), TEXT);
}

/// Puts the terminal in game mode; restores it on drop
pub struct TerminalGuard {
    out: Stdout,
    keyboard_enhanced: bool,
}

impl TerminalGuard {
    pub fn enter() -> anyhow::Result<Self> {
        terminal::enable_raw_mode().context("enabling raw mode")?;
        let mut guard = Self {
            out: stdout(),
            keyboard_enhanced: false,
        };

        execute!(
            guard.out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap,
            EnableMouseCapture,
        )
        .context("preparing terminal")?;

        if matches!(terminal::supports_keyboard_enhancement(), Ok(true)) {
            execute!(
                guard.out,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )
            .context("enabling key release events")?;
            guard.keyboard_enhanced = true;
        }
        log::info!(
            "Terminal ready (key release events: {})",
            guard.keyboard_enhanced
        );

        Ok(guard)
    }

    /// Whether the terminal reports key releases
    pub fn reports_release(&self) -> bool {
        self.keyboard_enhanced
    }

    pub fn viewport(&self) -> anyhow::Result<Viewport> {
        let (cols, rows) = terminal::size().context("reading terminal size")?;
        Ok(Viewport::new(cols, rows))
    }

    pub fn present(&mut self, canvas: &Canvas) -> anyhow::Result<()> {
        canvas.flush(&mut self.out).context("writing frame")
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.keyboard_enhanced {
            let _ = execute!(self.out, PopKeyboardEnhancementFlags);
        }
        let restored = execute!(
            self.out,
            DisableMouseCapture,
            terminal::EnableLineWrap,
            cursor::Show,
            terminal::LeaveAlternateScreen,
        )
        .and_then(|_| terminal::disable_raw_mode());
        if let Err(e) = restored {
            log::error!("Failed to restore terminal: {e}");
        }
    }
}

/// Rings the terminal bell for sound effects; music is only logged
#[derive(Debug, Default)]
pub struct BellBackend {
    music: LogBackend,
}

impl AudioBackend for BellBackend {
    fn play_effect(&mut self, effect: SoundEffect, volume: f32) {
        log::debug!("bell for {:?} @ {:.2}", effect, volume);
        let mut out = stdout();
        if let Err(e) = out.write_all(b"\x07").and_then(|_| out.flush()) {
            log::warn!("Bell failed: {e}");
        }
    }

    fn play_music(&mut self, track: MusicTrack, volume: f32) {
        self.music.play_music(track, volume);
    }

    fn pause_music(&mut self) {
        self.music.pause_music();
    }

    fn resume_music(&mut self) {
        self.music.resume_music();
    }

    fn stop_music(&mut self) {
        self.music.stop_music();
    }

    fn set_music_volume(&mut self, volume: f32) {
        self.music.set_music_volume(volume);
    }
}
