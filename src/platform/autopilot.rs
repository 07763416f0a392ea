//! Headless player
//!
//! Steers by the same single button a person has: tap whenever the bird has
//! sunk below the next gap and is still falling. After a death it waits out
//! the restart guard and plays again until its session budget is spent.

use super::input::{Platform, PlatformEvent};
use crate::consts::SPACING;
use crate::sim::{PlayState, Session};

/// How far below the gap middle the bird may sink before tapping
const DEFAULT_TAP_DEPTH: f32 = 60.0;

#[derive(Debug, Clone)]
pub struct Autopilot {
    sessions: u32,
    finished: u32,
    counted_attempt: Option<u32>,
    tap_depth: f32,
}

impl Autopilot {
    /// Play `sessions` runs, then quit
    pub fn new(sessions: u32) -> Self {
        Self {
            sessions,
            finished: 0,
            counted_attempt: None,
            tap_depth: DEFAULT_TAP_DEPTH,
        }
    }

    pub fn with_tap_depth(mut self, depth: f32) -> Self {
        self.tap_depth = depth;
        self
    }

    /// Runs that have ended in a death
    pub fn finished(&self) -> u32 {
        self.finished
    }

    /// Gap middle the bird should aim for: the first pair not yet behind it,
    /// or the screen middle while nothing is on screen
    pub fn target_y(session: &Session) -> f32 {
        let left = session.player.center().x - session.player.radius;
        session
            .obstacles
            .chunks_exact(2)
            .find(|pair| pair[0].physics.position().x + pair[0].width >= left)
            .map(|pair| pair[0].height + SPACING)
            .unwrap_or_else(|| session.viewport.mid_y())
    }

    fn should_tap(&self, session: &Session) -> bool {
        let y = session.player.center().y;
        let falling = session.player.physics.velocity().y > 0.0;
        falling && y > Self::target_y(session) + self.tap_depth
    }
}

impl Platform for Autopilot {
    fn poll_events(&mut self, session: &Session) -> Vec<PlatformEvent> {
        match session.phase {
            PlayState::Playing => {
                if self.should_tap(session) {
                    vec![PlatformEvent::Action]
                } else {
                    Vec::new()
                }
            }
            PlayState::Died => {
                if self.counted_attempt != Some(session.attempt) {
                    self.counted_attempt = Some(session.attempt);
                    self.finished += 1;
                    log::debug!("Autopilot finished run {} of {}", self.finished, self.sessions);
                }
                if self.finished >= self.sessions {
                    vec![PlatformEvent::Quit]
                } else if session.can_restart() {
                    vec![PlatformEvent::Action]
                } else {
                    Vec::new()
                }
            }
        }
    }
}
