//! Obstacle movement, collision and scoring
//!
//! Each obstacle is advanced and then checked, in spawn order: leaving the
//! bottom edge scores a point, touching the player costs a life. An obstacle
//! is removed at most once, and the exit check wins over the hit check.

use super::state::{GameEvent, GamePhase, GameState};

/// What happened to a single obstacle this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleOutcome {
    /// Still falling
    Active,
    /// Left the playfield, score +1
    Exited,
    /// Hit the player, lives -1
    Hit,
}

/// Advance every obstacle and apply exits/hits to the player.
///
/// When the last life is lost the session switches to `GameOver` and the
/// remaining obstacles are left untouched for this frame.
pub fn resolve_obstacles(state: &mut GameState) {
    let mut removed = vec![false; state.obstacles.len()];

    for (i, obstacle) in state.obstacles.iter_mut().enumerate() {
        obstacle.advance();

        let outcome = if obstacle.has_exited() {
            ObstacleOutcome::Exited
        } else if obstacle.rect.intersects(&state.player.rect) {
            ObstacleOutcome::Hit
        } else {
            ObstacleOutcome::Active
        };

        match outcome {
            ObstacleOutcome::Active => {}
            ObstacleOutcome::Exited => {
                removed[i] = true;
                state.player.score = state.player.score.saturating_add(1);
                state.events.push(GameEvent::Scored);
            }
            ObstacleOutcome::Hit => {
                removed[i] = true;
                state.player.lives = state.player.lives.saturating_sub(1);
                state.events.push(GameEvent::Crashed);
                log::debug!("Crash! {} lives left", state.player.lives);

                if state.player.lives == 0 {
                    state.phase = GamePhase::GameOver;
                    state.events.push(GameEvent::GameOver);
                    break;
                }
            }
        }
    }

    let mut flags = removed.into_iter();
    state.obstacles.retain(|_| !flags.next().unwrap_or(false));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::spawn::Spawner;
    use crate::sim::state::{Obstacle, Player};
    use glam::Vec2;
    use proptest::prelude::*;

    fn state_with(player: Player, obstacles: Vec<Obstacle>) -> GameState {
        GameState::from_parts(1, player, obstacles, Spawner::for_fps(FPS))
    }

    fn centered_player(lives: u32) -> Player {
        Player::new(Vec2::new(500.0, 400.0), lives, 0)
    }

    #[test]
    fn test_exit_scores_without_collision_check() {
        // Top edge passes the bottom after moving; player sits at the bottom
        let player = Player::new(Vec2::new(100.0, HEIGHT - 25.0), 3, 0);
        let obstacle = Obstacle::new(Vec2::new(100.0, HEIGHT + 23.0), 3);
        let mut state = state_with(player, vec![obstacle]);

        resolve_obstacles(&mut state);

        assert!(state.obstacles.is_empty());
        assert_eq!(state.player.score, 1);
        assert_eq!(state.player.lives, 3);
        assert_eq!(state.events, vec![GameEvent::Scored]);
    }

    #[test]
    fn test_hit_costs_a_life() {
        let obstacle = Obstacle::new(Vec2::new(500.0, 350.0), 5);
        let mut state = state_with(centered_player(3), vec![obstacle]);

        resolve_obstacles(&mut state);

        assert!(state.obstacles.is_empty());
        assert_eq!(state.player.lives, 2);
        assert_eq!(state.player.score, 0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.events, vec![GameEvent::Crashed]);
    }

    #[test]
    fn test_miss_keeps_obstacle() {
        let obstacle = Obstacle::new(Vec2::new(100.0, 100.0), 5);
        let mut state = state_with(centered_player(3), vec![obstacle]);

        resolve_obstacles(&mut state);

        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].pos().y, 105.0);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_last_life_ends_game_and_stops_processing() {
        let obstacles = vec![
            Obstacle::new(Vec2::new(500.0, 380.0), 3),
            // Would score if processed
            Obstacle::new(Vec2::new(200.0, HEIGHT + 30.0), 3),
            // Would move if processed
            Obstacle::new(Vec2::new(800.0, 100.0), 3),
        ];
        let mut state = state_with(centered_player(1), obstacles);

        resolve_obstacles(&mut state);

        assert_eq!(state.player.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.player.score, 0);
        assert_eq!(state.obstacles.len(), 2);
        assert_eq!(state.obstacles[1].pos().y, 100.0);
        assert_eq!(
            state.events,
            vec![GameEvent::Crashed, GameEvent::GameOver]
        );
    }

    #[test]
    fn test_multiple_events_in_one_frame() {
        let obstacles = vec![
            Obstacle::new(Vec2::new(100.0, HEIGHT + 30.0), 3),
            Obstacle::new(Vec2::new(490.0, 410.0), 3),
            Obstacle::new(Vec2::new(900.0, HEIGHT + 40.0), 7),
            Obstacle::new(Vec2::new(520.0, 380.0), 4),
            Obstacle::new(Vec2::new(300.0, 10.0), 4),
        ];
        let mut state = state_with(centered_player(5), obstacles);

        resolve_obstacles(&mut state);

        assert_eq!(state.player.score, 2);
        assert_eq!(state.player.lives, 3);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].pos(), Vec2::new(300.0, 14.0));
    }

    proptest! {
        #[test]
        fn prop_aggregate_is_order_independent(
            specs in prop::collection::vec((0.0f32..1000.0, -60.0f32..900.0, 3u32..=7), 0..12),
            rotate in 0usize..12,
        ) {
            let obstacles: Vec<Obstacle> = specs
                .iter()
                .map(|&(x, y, speed)| Obstacle::new(Vec2::new(x, y), speed))
                .collect();
            let mut reordered = obstacles.clone();
            reordered.reverse();
            if !reordered.is_empty() {
                let k = rotate % reordered.len();
                reordered.rotate_left(k);
            }

            // Enough lives that nobody reaches game over mid-frame
            let lives = 100;
            let mut a = state_with(centered_player(lives), obstacles);
            let mut b = state_with(centered_player(lives), reordered);
            resolve_obstacles(&mut a);
            resolve_obstacles(&mut b);

            prop_assert_eq!(a.player.score, b.player.score);
            prop_assert_eq!(a.player.lives, b.player.lives);
            prop_assert_eq!(a.obstacles.len(), b.obstacles.len());
        }
    }
}
