//! Game state and core simulation types
//!
//! Everything a snapshot needs to resume a session lives here.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::rect::Rect;
use super::spawn::Spawner;
use super::tick::TickInput;
use crate::consts::*;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Lives ran out; the session no longer advances
    GameOver,
}

/// Things that happened during a tick, for audio and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A new obstacle entered above the playfield
    Spawned,
    /// An obstacle left the bottom edge
    Scored,
    /// An obstacle hit the player
    Crashed,
    /// The last life was lost
    GameOver,
}

/// The player's ship
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub rect: Rect,
    /// Pixels per frame along each pressed axis
    pub speed: f32,
    pub lives: u32,
    pub score: u64,
}

impl Player {
    pub fn new(center: Vec2, lives: u32, score: u64) -> Self {
        Self {
            rect: Rect::new(center, Vec2::splat(PLAYER_SIZE)),
            speed: PLAYER_SPEED,
            lives,
            score,
        }
    }

    /// Fresh player at the bottom-center of the playfield
    pub fn at_start(lives: u32) -> Self {
        Self::new(
            Vec2::new(WIDTH / 2.0, HEIGHT - PLAYER_START_OFFSET),
            lives,
            0,
        )
    }

    pub fn pos(&self) -> Vec2 {
        self.rect.center
    }

    /// Move along every pressed axis, then keep the ship on screen.
    /// Diagonals are not normalized.
    pub fn move_by(&mut self, input: &TickInput) {
        let mut delta = Vec2::ZERO;
        if input.left {
            delta.x -= self.speed;
        }
        if input.right {
            delta.x += self.speed;
        }
        if input.up {
            delta.y -= self.speed;
        }
        if input.down {
            delta.y += self.speed;
        }
        self.rect.center += delta;
        self.rect.clamp_within(WIDTH, HEIGHT);
    }
}

/// A falling asteroid
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub rect: Rect,
    /// Fixed at creation
    speed: u32,
}

impl Obstacle {
    pub fn new(center: Vec2, speed: u32) -> Self {
        Self {
            rect: Rect::new(center, Vec2::splat(OBSTACLE_SIZE)),
            speed,
        }
    }

    /// Random column above the visible area, random speed
    pub fn spawn(rng: &mut impl Rng) -> Self {
        let half = OBSTACLE_SIZE / 2.0;
        let x = rng.random_range(half..=WIDTH - half);
        let speed = rng.random_range(OBSTACLE_MIN_SPEED..=OBSTACLE_MAX_SPEED);
        Self::new(Vec2::new(x, OBSTACLE_SPAWN_Y), speed)
    }

    pub fn pos(&self) -> Vec2 {
        self.rect.center
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    /// Fall by `speed` pixels
    pub fn advance(&mut self) {
        self.rect.center.y += self.speed as f32;
    }

    /// Top edge is below the playfield
    pub fn has_exited(&self) -> bool {
        self.rect.top() > HEIGHT
    }
}

/// A single play session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed of the obstacle RNG
    pub seed: u64,
    pub player: Player,
    /// Active obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    pub spawner: Spawner,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
    rng: Pcg32,
}

impl GameState {
    /// Start a new session
    pub fn new(seed: u64, lives: u32, fps: u32) -> Self {
        Self::from_parts(seed, Player::at_start(lives), Vec::new(), Spawner::for_fps(fps))
    }

    /// Assemble a session from existing entities (used when restoring)
    pub fn from_parts(
        seed: u64,
        player: Player,
        obstacles: Vec<Obstacle>,
        spawner: Spawner,
    ) -> Self {
        let phase = if player.lives == 0 {
            GamePhase::GameOver
        } else {
            GamePhase::Playing
        };
        Self {
            seed,
            player,
            obstacles,
            spawner,
            phase,
            time_ticks: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Create one obstacle from the session RNG
    pub fn spawn_obstacle(&mut self) {
        let obstacle = Obstacle::spawn(&mut self.rng);
        log::trace!(
            "Spawned obstacle at x={} speed={}",
            obstacle.pos().x,
            obstacle.speed()
        );
        self.obstacles.push(obstacle);
        self.events.push(GameEvent::Spawned);
    }

    /// Take the events produced so far
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_session() {
        let state = GameState::new(1, PLAYER_START_LIVES, FPS);
        assert_eq!(state.player.lives, 3);
        assert_eq!(state.player.score, 0);
        assert_eq!(state.player.pos(), Vec2::new(500.0, 740.0));
        assert!(state.obstacles.is_empty());
        assert_eq!(state.spawner.timer(), 0);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_player_diagonal_unnormalized() {
        let mut player = Player::new(Vec2::new(500.0, 400.0), 3, 0);
        let input = TickInput {
            up: true,
            right: true,
            ..Default::default()
        };
        player.move_by(&input);
        assert_eq!(player.pos(), Vec2::new(505.0, 395.0));
    }

    #[test]
    fn test_player_opposite_keys_cancel() {
        let mut player = Player::new(Vec2::new(500.0, 400.0), 3, 0);
        let input = TickInput {
            left: true,
            right: true,
            ..Default::default()
        };
        player.move_by(&input);
        assert_eq!(player.pos(), Vec2::new(500.0, 400.0));
    }

    #[test]
    fn test_player_stops_at_left_edge() {
        // 3px from the edge, speed 5: must not overshoot
        let mut player = Player::new(Vec2::new(28.0, 400.0), 3, 0);
        let input = TickInput {
            left: true,
            ..Default::default()
        };
        player.move_by(&input);
        assert_eq!(player.rect.left(), 0.0);
    }

    #[test]
    fn test_obstacle_falls_straight_down() {
        let mut obstacle = Obstacle::new(Vec2::new(300.0, -50.0), 4);
        obstacle.advance();
        obstacle.advance();
        assert_eq!(obstacle.pos(), Vec2::new(300.0, -42.0));
        assert_eq!(obstacle.speed(), 4);
    }

    #[test]
    fn test_obstacle_exit_uses_top_edge() {
        // Center below the bottom but top edge still visible
        let obstacle = Obstacle::new(Vec2::new(100.0, HEIGHT + 1.0), 3);
        assert!(!obstacle.has_exited());
        let obstacle = Obstacle::new(Vec2::new(100.0, HEIGHT + 26.0), 3);
        assert!(obstacle.has_exited());
    }

    #[test]
    fn test_restored_dead_player_is_game_over() {
        let state = GameState::from_parts(
            7,
            Player::new(Vec2::new(100.0, 100.0), 0, 12),
            Vec::new(),
            Spawner::for_fps(FPS),
        );
        assert!(state.is_over());
    }

    proptest! {
        #[test]
        fn prop_player_stays_in_bounds(
            x in -200.0f32..1200.0,
            y in -200.0f32..1000.0,
            up: bool, down: bool, left: bool, right: bool,
        ) {
            let mut player = Player::new(Vec2::new(x, y), 3, 0);
            player.move_by(&TickInput { up, down, left, right });
            prop_assert!(player.rect.left() >= 0.0);
            prop_assert!(player.rect.right() <= WIDTH);
            prop_assert!(player.rect.top() >= 0.0);
            prop_assert!(player.rect.bottom() <= HEIGHT);
        }

        #[test]
        fn prop_spawned_obstacle_speed_in_range(seed: u64, frames in 0u32..50) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut obstacle = Obstacle::spawn(&mut rng);
            let speed = obstacle.speed();
            prop_assert!((OBSTACLE_MIN_SPEED..=OBSTACLE_MAX_SPEED).contains(&speed));
            prop_assert!(obstacle.rect.left() >= 0.0 && obstacle.rect.right() <= WIDTH);
            prop_assert!(obstacle.rect.bottom() <= 0.0);
            for _ in 0..frames {
                obstacle.advance();
            }
            prop_assert_eq!(obstacle.speed(), speed);
        }
    }
}
