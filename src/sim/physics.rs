//! Kinematic integration
//!
//! Every moving entity carries an [`Integrator`]. Acceleration is constant for
//! an entity's lifetime (gravity for the player, zero for scrolling scenery),
//! and each fixed step is advanced with a classical RK4 step. For constant
//! acceleration that is algebraically the closed-form solution, but the
//! four-sample structure is kept as-is so results stay bit-identical across
//! builds and replays.

use serde::{Deserialize, Serialize};

use crate::math::Vector2;

/// Position/velocity derivative sample
#[derive(Debug, Clone, Copy, Default)]
struct Derivative {
    position: Vector2,
    velocity: Vector2,
}

/// Kinematic state advanced once per fixed step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Integrator {
    last_position: Vector2,
    position: Vector2,
    velocity: Vector2,
    acceleration: Vector2,
}

impl Integrator {
    pub fn new(position: Vector2, velocity: Vector2, acceleration: Vector2) -> Self {
        Self {
            last_position: position,
            position,
            velocity,
            acceleration,
        }
    }

    /// Advance one step of `dt` seconds.
    ///
    /// `last_position` receives the pre-step position, so `update(0.0)`
    /// collapses the interpolation source onto the current position.
    pub fn update(&mut self, dt: f32) {
        let a = self.evaluate(Derivative::default(), 0.0);
        let b = self.evaluate(a, dt * 0.5);
        let c = self.evaluate(b, dt * 0.5);
        let d = self.evaluate(c, dt);

        let position_change =
            (a.position + (b.position + c.position) * 2.0 + d.position) * (1.0 / 6.0);
        let velocity_change =
            (a.velocity + (b.velocity + c.velocity) * 2.0 + d.velocity) * (1.0 / 6.0);

        self.last_position = self.position;
        self.position = self.position + position_change * dt;
        self.velocity = self.velocity + velocity_change * dt;
    }

    /// Derivative of the state advanced by `derivative * dt`
    fn evaluate(&self, derivative: Derivative, dt: f32) -> Derivative {
        // Position of the trial state is never read: acceleration does not
        // depend on it.
        let velocity = self.velocity + derivative.velocity * dt;
        Derivative {
            position: velocity,
            velocity: self.acceleration,
        }
    }

    /// Render position between the previous and current step
    #[inline]
    pub fn interpolated(&self, blend: f32) -> Vector2 {
        crate::lerp(self.last_position, self.position, blend)
    }

    #[inline]
    pub fn last_position(&self) -> Vector2 {
        self.last_position
    }

    #[inline]
    pub fn position(&self) -> Vector2 {
        self.position
    }

    #[inline]
    pub fn velocity(&self) -> Vector2 {
        self.velocity
    }

    #[inline]
    pub fn acceleration(&self) -> Vector2 {
        self.acceleration
    }

    pub fn set_last_position(&mut self, last_position: Vector2) {
        self.last_position = last_position;
    }

    pub fn set_position(&mut self, position: Vector2) {
        self.position = position;
    }

    pub fn set_velocity(&mut self, velocity: Vector2) {
        self.velocity = velocity;
    }

    pub fn set_acceleration(&mut self, acceleration: Vector2) {
        self.acceleration = acceleration;
    }
}
