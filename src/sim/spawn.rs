//! Frame-counter driven obstacle spawning

use crate::consts::SPAWN_INTERVAL_SECS;
use crate::secs_to_ticks;

/// Counts frames and fires once every `interval` frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spawner {
    timer: u32,
    interval: u32,
}

impl Spawner {
    pub fn new(interval: u32) -> Self {
        Self::with_timer(interval, 0)
    }

    /// Interval matching one spawn per simulated second at `fps`
    pub fn for_fps(fps: u32) -> Self {
        Self::new(secs_to_ticks(SPAWN_INTERVAL_SECS, fps))
    }

    /// Resume a saved counter. A counter at or past the interval fires on
    /// the next tick.
    pub fn with_timer(interval: u32, timer: u32) -> Self {
        let interval = interval.max(1);
        Self {
            timer: timer.min(interval),
            interval,
        }
    }

    pub fn timer(&self) -> u32 {
        self.timer
    }

    pub fn interval(&self) -> u32 {
        self.interval
    }

    /// Advance one frame. Returns true when an obstacle should be created.
    pub fn tick(&mut self) -> bool {
        self.timer = self.timer.saturating_add(1);
        if self.timer >= self.interval {
            self.timer = 0;
            true
        } else {
            false
        }
    }
}
