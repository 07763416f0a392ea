//! Frame clocks

use std::time::{Duration, Instant};

/// Measures how long each frame took
pub trait Clock {
    /// Seconds since the previous call. The first call returns 0.
    fn frame_time(&mut self) -> f32;

    /// Give back the rest of a frame when the display isn't pacing us
    fn idle(&mut self, _seconds: f32) {}
}

/// Wall clock backed by [`Instant`]
#[derive(Debug, Default)]
pub struct SystemClock {
    last: Option<Instant>,
}

impl SystemClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for SystemClock {
    fn frame_time(&mut self) -> f32 {
        let now = Instant::now();
        let elapsed = self
            .last
            .map(|last| now.duration_since(last).as_secs_f32())
            .unwrap_or(0.0);
        self.last = Some(now);
        elapsed
    }

    fn idle(&mut self, seconds: f32) {
        if seconds > 0.0 {
            std::thread::sleep(Duration::from_secs_f32(seconds));
        }
    }
}

/// Clock that advances a fixed amount per frame
#[derive(Debug, Clone)]
pub struct ManualClock {
    frame: f32,
    started: bool,
}

impl ManualClock {
    pub fn new(frame: f32) -> Self {
        Self {
            frame,
            started: false,
        }
    }

    /// Clock for a display running at `hz` frames per second
    pub fn from_hz(hz: f32) -> Self {
        Self::new(1.0 / hz)
    }

    /// Change the duration reported for the following frames
    pub fn set_frame(&mut self, frame: f32) {
        self.frame = frame;
    }
}

impl Clock for ManualClock {
    fn frame_time(&mut self) -> f32 {
        if !self.started {
            self.started = true;
            return 0.0;
        }
        self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock() {
        let mut clock = ManualClock::from_hz(50.0);
        assert_eq!(clock.frame_time(), 0.0);
        assert_eq!(clock.frame_time(), 0.02);
        clock.set_frame(0.5);
        assert_eq!(clock.frame_time(), 0.5);
        clock.idle(1.0);
        assert_eq!(clock.frame_time(), 0.5);
    }

    #[test]
    fn test_system_clock_first_frame_is_zero() {
        let mut clock = SystemClock::new();
        assert_eq!(clock.frame_time(), 0.0);
        clock.idle(0.002);
        assert!(clock.frame_time() > 0.0);
    }
}
