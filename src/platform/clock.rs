//! Fixed-rate frame pacing

use std::time::{Duration, Instant};

/// Length of one frame at `fps` (1 fps minimum)
pub fn frame_duration(fps: u32) -> Duration {
    Duration::from_secs_f64(1.0 / fps.max(1) as f64)
}

/// Sleeps out whatever is left of each frame
#[derive(Debug)]
pub struct FrameClock {
    frame: Duration,
    frame_start: Instant,
    /// Frames that overran their budget
    overruns: u64,
}

impl FrameClock {
    pub fn new(fps: u32) -> Self {
        Self {
            frame: frame_duration(fps),
            frame_start: Instant::now(),
            overruns: 0,
        }
    }

    pub fn overruns(&self) -> u64 {
        self.overruns
    }

    /// Time left in the current frame
    pub fn remaining(&self) -> Duration {
        self.frame.saturating_sub(self.frame_start.elapsed())
    }

    /// Block until the current frame is over, then start the next one
    pub fn wait(&mut self) {
        let rest = self.remaining();
        if rest.is_zero() {
            self.overruns += 1;
            log::trace!("Frame overran by {:?}", self.frame_start.elapsed() - self.frame);
        } else {
            std::thread::sleep(rest);
        }
        self.frame_start = Instant::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_duration() {
        assert_eq!(frame_duration(1), Duration::from_secs(1));
        assert_eq!(frame_duration(50), Duration::from_millis(20));
        let sixty = frame_duration(60);
        assert!(sixty > Duration::from_micros(16_600) && sixty < Duration::from_micros(16_700));
    }

    #[test]
    fn test_zero_fps_is_one_second() {
        assert_eq!(frame_duration(0), Duration::from_secs(1));
    }

    #[test]
    fn test_wait_paces_frames() {
        let mut clock = FrameClock::new(200);
        let start = Instant::now();
        clock.wait();
        clock.wait();
        assert!(start.elapsed() >= Duration::from_millis(9));
    }

    #[test]
    fn test_overrun_counted() {
        let mut clock = FrameClock::new(1000);
        std::thread::sleep(Duration::from_millis(5));
        clock.wait();
        assert_eq!(clock.overruns(), 1);
    }
}
