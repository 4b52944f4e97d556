//! Space Dodge entry point
//!
//! Parses the command line, sets up the terminal and runs the fixed-rate
//! game loop until the player quits.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use crossterm::event;

use space_dodge::audio::{AudioBackend, LogBackend};
use space_dodge::consts::FPS;
use space_dodge::platform::{
    BellBackend, Canvas, EventTranslator, FrameClock, TerminalGuard, terminal,
};
use space_dodge::{App, GameConfig, Settings};

#[derive(Parser, Debug)]
#[command(author, version, about = "Dodge the falling asteroids", long_about = None)]
struct Cli {
    /// Frames per second; speeds are per frame, so this is also game speed
    #[arg(long, default_value_t = FPS)]
    fps: u32,
    /// Directory holding save slots
    #[arg(long, default_value = "saves")]
    saves_dir: PathBuf,
    /// Volume settings file
    #[arg(long = "settings", default_value = "settings.json")]
    settings_path: PathBuf,
    /// Fixed RNG seed for reproducible games
    #[arg(long)]
    seed: Option<u64>,
    /// Do not ring the terminal bell for sound effects
    #[arg(long)]
    no_bell: bool,
}

impl From<&Cli> for GameConfig {
    fn from(cli: &Cli) -> Self {
        GameConfig {
            fps: cli.fps,
            saves_dir: cli.saves_dir.clone(),
            settings_path: cli.settings_path.clone(),
            seed: cli.seed,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = GameConfig::from(&cli).validated();
    log::info!("Space Dodge starting: {:?}", config);

    let settings = Settings::load(&config.settings_path);
    let backend: Box<dyn AudioBackend> = if cli.no_bell {
        Box::new(LogBackend)
    } else {
        Box::new(BellBackend::default())
    };

    let mut term = TerminalGuard::enter()?;
    let mut app = App::new(config, settings, backend);
    run(&mut app, &mut term)?;

    log::info!("Space Dodge exiting");
    Ok(())
}

/// Poll input, update, render, pace; until the app reaches `Exit`
fn run(app: &mut App, term: &mut TerminalGuard) -> anyhow::Result<()> {
    let fps = app.config().fps;
    let mut translator = EventTranslator::new(term.viewport()?, term.reports_release(), fps);
    let mut canvas = Canvas::new(translator.viewport());
    let mut clock = FrameClock::new(fps);
    let mut events = Vec::new();

    while app.is_running() {
        while event::poll(Duration::ZERO).context("polling input")? {
            let event = event::read().context("reading input")?;
            translator.translate(event, &mut events);
        }
        translator.tick(&mut events);
        for event in events.drain(..) {
            app.handle_event(event);
        }

        app.update();

        canvas.resize(translator.viewport());
        terminal::draw(&mut canvas, app);
        term.present(&canvas)?;

        clock.wait();
    }

    if clock.overruns() > 0 {
        log::debug!("{} frames overran", clock.overruns());
    }
    Ok(())
}
