//! Simulation entities
//!
//! Each entity pairs an [`Integrator`] with its collision bounds. Visual
//! assets are looked up by the renderer from the entity kind.

use serde::{Deserialize, Serialize};

use super::physics::Integrator;
use crate::consts::*;
use crate::math::Vector2;

/// Axis-aligned rectangle, `min` is the top-left corner (+Y down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vector2,
    pub max: Vector2,
}

impl Rect {
    pub fn from_origin_size(origin: Vector2, width: f32, height: f32) -> Self {
        Self {
            min: origin,
            max: origin + Vector2::new(width, height),
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Point inside the rectangle closest to `point`
    #[inline]
    pub fn closest_point(&self, point: Vector2) -> Vector2 {
        Vector2::new(
            point.x.max(self.min.x).min(self.max.x),
            point.y.max(self.min.y).min(self.max.y),
        )
    }
}

/// The player-controlled flapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub physics: Integrator,
    /// Collision circle radius
    pub radius: f32,
}

impl Player {
    /// Fresh player at rest at the spawn column, falling under gravity
    pub fn spawn() -> Self {
        Self {
            physics: Integrator::new(
                Vector2::new(PLAYER_START_X, 0.0),
                Vector2::ZERO,
                Vector2::new(0.0, GRAVITY),
            ),
            radius: PLAYER_RADIUS,
        }
    }

    /// Integrate one step; the player can't rise above the top of the screen
    pub fn update(&mut self, dt: f32) {
        self.physics.update(dt);
        let position = self.physics.position();
        if position.y < 0.0 {
            self.physics.set_position(Vector2::new(position.x, 0.0));
        }
    }

    /// Instantaneous upward impulse; replaces the current velocity
    pub fn jump(&mut self, power: f32) {
        self.physics.set_velocity(Vector2::new(0.0, power));
    }

    #[inline]
    pub fn center(&self) -> Vector2 {
        self.physics.position()
    }
}

/// What a rectangular sprite represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpriteKind {
    /// Half of an obstacle pair
    Obstacle,
    /// Parallax scenery; the index selects the texture layer
    Background(u8),
}

/// A rectangular moving entity (obstacle or background layer)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sprite {
    pub kind: SpriteKind,
    pub physics: Integrator,
    pub width: f32,
    pub height: f32,
}

impl Sprite {
    pub fn new(kind: SpriteKind, position: Vector2, velocity: Vector2, width: f32, height: f32) -> Self {
        Self {
            kind,
            physics: Integrator::new(position, velocity, Vector2::ZERO),
            width,
            height,
        }
    }

    #[inline]
    pub fn update(&mut self, dt: f32) {
        self.physics.update(dt);
    }

    /// Current collision bounds
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.physics.position(), self.width, self.height)
    }

    /// True once the right edge has passed the left edge of the screen
    #[inline]
    pub fn is_offscreen_left(&self) -> bool {
        self.physics.position().x + self.width < 0.0
    }

    /// Stop moving and drop the interpolation history
    pub fn freeze(&mut self) {
        self.physics.set_velocity(Vector2::ZERO);
        self.physics.update(0.0);
    }
}
