//! Collision detection
//!
//! The player is a circle, obstacles are axis-aligned rectangles. Contact is
//! tested against the closest point of the rectangle to the circle center.

use super::entity::{Player, Rect};
use crate::Viewport;
use crate::math::Vector2;

/// Does a circle overlap a rectangle?
///
/// Clamps the center onto the rectangle per axis, then compares the squared
/// distance to the clamped point against the squared radius (touching at
/// exactly `radius` is a miss).
pub fn circle_rect_overlap(center: Vector2, radius: f32, rect: &Rect) -> bool {
    let closest = rect.closest_point(center);
    let dx = closest.x - center.x;
    let dy = closest.y - center.y;
    dx * dx + dy * dy < radius * radius
}

/// Has the player fallen out through the bottom of the screen?
pub fn player_fell(player: &Player, viewport: &Viewport) -> bool {
    player.center().y > viewport.height + player.radius
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wall() -> Rect {
        Rect::from_origin_size(Vector2::new(400.0, 0.0), 100.0, 200.0)
    }

    #[test]
    fn test_center_on_edge_midpoints_hits() {
        let rect = wall();
        let r = 30.0;
        // left, right, top and bottom edge midpoints
        assert!(circle_rect_overlap(Vector2::new(400.0, 100.0), r, &rect));
        assert!(circle_rect_overlap(Vector2::new(500.0, 100.0), r, &rect));
        assert!(circle_rect_overlap(Vector2::new(450.0, 0.0), r, &rect));
        assert!(circle_rect_overlap(Vector2::new(450.0, 200.0), r, &rect));
    }

    #[test]
    fn test_just_outside_misses() {
        let rect = wall();
        let r = 30.0;
        let eps = 0.01;
        assert!(!circle_rect_overlap(Vector2::new(400.0 - r - eps, 100.0), r, &rect));
        assert!(!circle_rect_overlap(Vector2::new(500.0 + r + eps, 100.0), r, &rect));
        assert!(!circle_rect_overlap(Vector2::new(450.0, 200.0 + r + eps), r, &rect));
    }

    #[test]
    fn test_corner_uses_euclidean_distance() {
        let rect = wall();
        let r = 30.0;
        // 25 px diagonally off the bottom-right corner
        let off = 25.0 / std::f32::consts::SQRT_2;
        assert!(circle_rect_overlap(Vector2::new(500.0 + off, 200.0 + off), r, &rect));
        // 29 px along each axis is ~41 px away
        assert!(!circle_rect_overlap(Vector2::new(529.0, 229.0), r, &rect));
    }

    #[test]
    fn test_touching_is_not_a_hit() {
        let rect = wall();
        assert!(!circle_rect_overlap(Vector2::new(370.0, 100.0), 30.0, &rect));
        assert!(circle_rect_overlap(Vector2::new(370.5, 100.0), 30.0, &rect));
    }

    #[test]
    fn test_player_fell_threshold() {
        let viewport = Viewport::new(800, 600);
        let mut player = Player::spawn();
        player.physics.set_position(Vector2::new(100.0, 630.0));
        assert!(!player_fell(&player, &viewport));
        player.physics.set_position(Vector2::new(100.0, 630.5));
        assert!(player_fell(&player, &viewport));
    }
}
