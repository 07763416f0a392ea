//! Platform abstraction layer
//!
//! Handles the host side of the game loop:
//! - Time (frame durations, frame pacing)
//! - Input events (quit, the single action button)
//!
//! Headless implementations of both live here too, so the loop runs the
//! same way under tests and the CLI as it would behind a window.

pub mod autopilot;
pub mod input;
pub mod time;

pub use autopilot::Autopilot;
pub use input::{Platform, PlatformEvent, ScriptedInput};
pub use time::{Clock, ManualClock, SystemClock};
