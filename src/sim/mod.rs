//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod entity;
pub mod physics;
pub mod rng;
pub mod state;
pub mod tick;

pub use collision::{circle_rect_overlap, player_fell};
pub use entity::{Player, Rect, Sprite, SpriteKind};
pub use physics::Integrator;
pub use rng::Random;
pub use state::{GameEvent, PlayState, Session};
pub use tick::{TickInput, tick};
