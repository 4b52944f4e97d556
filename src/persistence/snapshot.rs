//! Snapshot document
//!
//! Wire format:
//! `{"player": {"x", "y", "lives", "score"}, "obstacles": [{"x", "y", "speed"}], "obstacle_timer": n}`
//! Positions are entity centers.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{GameState, Obstacle, Player, Spawner};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub x: f32,
    pub y: f32,
    pub lives: u32,
    pub score: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleRecord {
    pub x: f32,
    pub y: f32,
    pub speed: u32,
}

/// Everything needed to resume a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub player: PlayerRecord,
    pub obstacles: Vec<ObstacleRecord>,
    #[serde(default)]
    pub obstacle_timer: u32,
}

impl Snapshot {
    /// Capture the persistent part of a session
    pub fn capture(state: &GameState) -> Self {
        let pos = state.player.pos();
        Self {
            player: PlayerRecord {
                x: pos.x,
                y: pos.y,
                lives: state.player.lives,
                score: state.player.score,
            },
            obstacles: state
                .obstacles
                .iter()
                .map(|o| ObstacleRecord {
                    x: o.pos().x,
                    y: o.pos().y,
                    speed: o.speed(),
                })
                .collect(),
            obstacle_timer: state.spawner.timer(),
        }
    }

    /// Rebuild a session from stored fields, verbatim.
    ///
    /// The RNG is not part of the snapshot; `seed` drives spawns from here on.
    pub fn restore(&self, seed: u64, fps: u32) -> GameState {
        let player = Player::new(
            Vec2::new(self.player.x, self.player.y),
            self.player.lives,
            self.player.score,
        );
        let obstacles = self
            .obstacles
            .iter()
            .map(|o| Obstacle::new(Vec2::new(o.x, o.y), o.speed))
            .collect();
        let interval = Spawner::for_fps(fps).interval();
        let spawner = Spawner::with_timer(interval, self.obstacle_timer);
        GameState::from_parts(seed, player, obstacles, spawner)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FPS;
    use crate::sim::{TickInput, tick};

    fn played_state() -> GameState {
        let mut state = GameState::new(2024, 3, FPS);
        let input = TickInput {
            left: true,
            ..Default::default()
        };
        for _ in 0..200 {
            tick(&mut state, &input);
        }
        state
    }

    #[test]
    fn test_capture_restore_preserves_session() {
        let state = played_state();
        let snapshot = Snapshot::capture(&state);
        let restored = snapshot.restore(1, FPS);

        assert_eq!(restored.player, state.player);
        assert_eq!(restored.obstacles, state.obstacles);
        assert_eq!(restored.spawner, state.spawner);
    }

    #[test]
    fn test_json_field_names() {
        let state = GameState::new(1, 3, FPS);
        let json = Snapshot::capture(&state).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["player"]["x"], 500.0);
        assert_eq!(value["player"]["y"], 740.0);
        assert_eq!(value["player"]["lives"], 3);
        assert_eq!(value["player"]["score"], 0);
        assert!(value["obstacles"].as_array().unwrap().is_empty());
        assert_eq!(value["obstacle_timer"], 0);
    }

    #[test]
    fn test_integer_coordinates_parse() {
        let json = r#"{
            "player": {"x": 500, "y": 740, "lives": 2, "score": 17},
            "obstacles": [{"x": 120, "y": -30, "speed": 6}]
        }"#;
        let snapshot = Snapshot::from_json(json).unwrap();
        assert_eq!(snapshot.obstacle_timer, 0);
        let state = snapshot.restore(9, FPS);
        assert_eq!(state.player.lives, 2);
        assert_eq!(state.player.score, 17);
        assert_eq!(state.obstacles[0].pos(), Vec2::new(120.0, -30.0));
        assert_eq!(state.obstacles[0].speed(), 6);
    }

    #[test]
    fn test_saturated_timer_spawns_on_first_tick() {
        let json = r#"{
            "player": {"x": 500, "y": 740, "lives": 3, "score": 0},
            "obstacles": [],
            "obstacle_timer": 4294967295
        }"#;
        let mut state = Snapshot::from_json(json).unwrap().restore(5, FPS);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.spawner.timer(), 0);
    }

    #[test]
    fn test_saturated_score_survives_an_exit() {
        let json = r#"{
            "player": {"x": 500, "y": 740, "lives": 3, "score": 18446744073709551615},
            "obstacles": [{"x": 100, "y": 900, "speed": 5}],
            "obstacle_timer": 0
        }"#;
        let mut state = Snapshot::from_json(json).unwrap().restore(5, FPS);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.player.score, u64::MAX);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(Snapshot::from_json("{\"player\": {\"x\": 1").is_err());
        assert!(Snapshot::from_json(r#"{"obstacles": []}"#).is_err());
        assert!(Snapshot::from_json(r#"{"player": {"x": 1, "y": 2, "lives": -1, "score": 0}, "obstacles": []}"#).is_err());
    }
}
