//! Fixed timestep simulation tick
//!
//! One call advances a session by exactly one frame. Speeds are expressed in
//! pixels per frame, so simulation speed follows the tick rate.

use super::collision::resolve_obstacles;
use super::state::{GamePhase, GameState};

/// Directional input held during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// Advance the session by one frame: spawner, obstacles, then the player.
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase == GamePhase::GameOver {
        return;
    }

    state.time_ticks += 1;

    if state.spawner.tick() {
        state.spawn_obstacle();
    }

    resolve_obstacles(state);
    if state.phase == GamePhase::GameOver {
        log::info!("Game over with score {}", state.player.score);
        return;
    }

    state.player.move_by(input);
}
