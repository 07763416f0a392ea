//! Input events

use std::collections::BTreeSet;

use crate::sim::Session;

/// Host events the loop reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformEvent {
    /// Window closed or escape pressed
    Quit,
    /// The action button went down (one per press)
    Action,
}

/// Source of host events, polled once per frame.
///
/// The session is passed read-only so synthetic input can react to it.
pub trait Platform {
    fn poll_events(&mut self, session: &Session) -> Vec<PlatformEvent>;
}

/// Fires actions on fixed frame indices, then quits after a frame count
#[derive(Debug, Clone)]
pub struct ScriptedInput {
    actions: BTreeSet<u64>,
    quit_after: u64,
    frame: u64,
}

impl ScriptedInput {
    pub fn new(actions: impl IntoIterator<Item = u64>, quit_after: u64) -> Self {
        Self {
            actions: actions.into_iter().collect(),
            quit_after,
            frame: 0,
        }
    }

    /// Frames polled so far
    pub fn frame(&self) -> u64 {
        self.frame
    }
}

impl Platform for ScriptedInput {
    fn poll_events(&mut self, _session: &Session) -> Vec<PlatformEvent> {
        let frame = self.frame;
        self.frame += 1;

        if frame >= self.quit_after {
            return vec![PlatformEvent::Quit];
        }
        if self.actions.contains(&frame) {
            vec![PlatformEvent::Action]
        } else {
            Vec::new()
        }
    }
}
