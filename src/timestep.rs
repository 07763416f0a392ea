//! Fixed-timestep accumulator
//!
//! Real frame time is banked here and paid out in whole simulation steps;
//! whatever is left over becomes the render blend factor.

use crate::consts::{MAX_ACCUMULATOR, SIM_DT};

/// Banks wall-clock time and releases it one fixed step at a time
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    /// Fixed simulation interval (seconds)
    step: f32,
    /// Time banked but not yet simulated
    accumulator: f32,
    /// Cap on banked time
    max_accumulator: f32,
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(SIM_DT)
    }
}

impl FixedTimestep {
    pub fn new(step: f32) -> Self {
        Self {
            step,
            accumulator: 0.0,
            max_accumulator: MAX_ACCUMULATOR,
        }
    }

    #[inline]
    pub fn step(&self) -> f32 {
        self.step
    }

    #[inline]
    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    /// Bank a frame's worth of wall time. After a long stall at most
    /// `MAX_ACCUMULATOR` seconds are ever caught up.
    pub fn accumulate(&mut self, frame_time: f32) {
        self.accumulator = (self.accumulator + frame_time).min(self.max_accumulator);
    }

    /// Take one step from the bank if there is one
    pub fn consume(&mut self) -> bool {
        if self.accumulator >= self.step {
            self.accumulator -= self.step;
            true
        } else {
            false
        }
    }

    /// Fraction of a step left in the bank, in [0, 1)
    #[inline]
    pub fn blend(&self) -> f32 {
        self.accumulator / self.step
    }

    /// Drop banked time (after a restart or a pause)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
