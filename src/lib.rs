//! openflap - a side-scrolling arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, session state)
//! - `timestep` / `app`: Fixed-timestep loop decoupled from frame arrival
//! - `renderer`: Interpolated render snapshots and the renderer seam
//! - `platform`: Input events and wall clocks
//! - `audio`: Sound effect triggering
//! - `settings`: Persisted `key=value` user settings
//! - `replay`: Seeded input tapes for score verification

pub mod app;
pub mod audio;
pub mod highscores;
pub mod math;
pub mod platform;
pub mod renderer;
pub mod replay;
pub mod settings;
pub mod sim;
pub mod timestep;

pub use app::{App, GameLoop};
pub use highscores::HighScore;
pub use math::{Vector2, Vector2Ext};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Simulation rate (steps per second)
    pub const SIM_HZ: f32 = 100.0;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / SIM_HZ;
    /// Upper bound on banked frame time (seconds) to prevent spiral of death
    pub const MAX_ACCUMULATOR: f32 = 3.0;

    /// Default viewport, used when no settings are available
    pub const DEFAULT_SCREEN_WIDTH: u32 = 800;
    pub const DEFAULT_SCREEN_HEIGHT: u32 = 600;

    /// Player defaults
    pub const PLAYER_START_X: f32 = 100.0;
    pub const PLAYER_RADIUS: f32 = 30.0;
    pub const PLAYER_SPRITE_SIZE: f32 = 64.0;
    /// Vertical velocity set by a jump (negative is up)
    pub const JUMP_POWER: f32 = -670.0;
    /// Downward acceleration, pixels/s²
    pub const GRAVITY: f32 = 1600.0;

    /// Grace period after dying before restart input is accepted
    pub const DIED_WAIT_TIME: f32 = 0.3;

    /// Obstacle defaults
    pub const WALL_VELOCITY: f32 = -210.0;
    pub const WALL_WIDTH: f32 = 100.0;
    /// Half the vertical gap between a top and bottom obstacle
    pub const SPACING: f32 = 105.0;
    /// Keeps the shorter obstacle of a pair at least this tall
    pub const WALL_BUFFER: f32 = 50.0;
    /// Seconds between obstacle pairs
    pub const SPAWN_TIME: f32 = 1.6;
    /// Half-width of the gap midpoint band around the screen middle
    pub const SPAWN_RANGE: f32 = 145.0;
}

/// Simulation viewport in pixels. +Y points down.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(consts::DEFAULT_SCREEN_WIDTH, consts::DEFAULT_SCREEN_HEIGHT)
    }
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width as f32,
            height: height as f32,
        }
    }

    /// Vertical middle of the screen
    #[inline]
    pub fn mid_y(&self) -> f32 {
        self.height * 0.5
    }
}

/// Linear blend between the previous and current physics state
#[inline]
pub fn lerp(last: Vector2, current: Vector2, blend: f32) -> Vector2 {
    current * blend + last * (1.0 - blend)
}
