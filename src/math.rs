//! 2D vector helpers
//!
//! `Vector2` is plain `glam::Vec2`; arithmetic, equality (exact, no epsilon)
//! and normalization come from glam. `Vector2Ext` adds the degree-based
//! helpers and the fallible index accessor the game code uses.

pub use glam::Vec2 as Vector2;

/// Degree-based helpers for [`Vector2`]
pub trait Vector2Ext: Sized {
    /// Unit heading for an angle in degrees, 0° pointing up the screen (-Y)
    fn from_degrees(degrees: f32) -> Self;

    /// Rotate counter-clockwise (in +Y-down screen space: clockwise) by degrees
    fn rotated_degrees(self, degrees: f32) -> Self;

    fn magnitude(self) -> f32;

    fn magnitude_squared(self) -> f32;

    /// Unit vector in the same direction. Zero in, NaN out (no guard).
    fn unit_vector(self) -> Self;

    /// Component by index: 0 is x, 1 is y
    fn component(self, index: usize) -> Option<f32>;
}

impl Vector2Ext for Vector2 {
    fn from_degrees(degrees: f32) -> Self {
        let radians = (degrees - 90.0).to_radians();
        Vector2::new(radians.cos(), radians.sin())
    }

    fn rotated_degrees(self, degrees: f32) -> Self {
        let (sine, cosine) = degrees.to_radians().sin_cos();
        Vector2::new(cosine * self.x - sine * self.y, sine * self.x + cosine * self.y)
    }

    #[inline]
    fn magnitude(self) -> f32 {
        self.length()
    }

    #[inline]
    fn magnitude_squared(self) -> f32 {
        self.length_squared()
    }

    #[inline]
    fn unit_vector(self) -> Self {
        self / self.length()
    }

    #[inline]
    fn component(self, index: usize) -> Option<f32> {
        match index {
            0 => Some(self.x),
            1 => Some(self.y),
            _ => None,
        }
    }
}
