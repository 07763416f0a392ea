//! High score tracking
//!
//! One best survival time per process. It lives only in memory and survives
//! session restarts, never process exit.

use serde::{Deserialize, Serialize};

/// Best survival time seen so far (seconds)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HighScore {
    best: f32,
}

impl HighScore {
    pub fn new() -> Self {
        Self { best: 0.0 }
    }

    /// Current best time
    #[inline]
    pub fn best(&self) -> f32 {
        self.best
    }

    /// Check if a time would beat the current best
    pub fn qualifies(&self, elapsed: f32) -> bool {
        elapsed > self.best
    }

    /// Record a finished session. Returns true if it set a new best.
    pub fn record(&mut self, elapsed: f32) -> bool {
        if !self.qualifies(elapsed) {
            return false;
        }
        self.best = elapsed;
        true
    }
}

/// Format a survival time the way the HUD shows it
pub fn format_time(seconds: f32) -> String {
    format!("{:.2}", seconds)
}
