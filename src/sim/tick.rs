//! Fixed timestep simulation tick
//!
//! Advances a [`Session`] by exactly one step. Same session, same inputs,
//! same `dt`: same result.

use super::collision::{circle_rect_overlap, player_fell};
use super::state::{PlayState, Session};
use crate::consts::*;
use crate::math::Vector2;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// The "activate" button went down (jump, or restart after dying)
    pub action: bool,
}

impl TickInput {
    pub fn action() -> Self {
        Self { action: true }
    }
}

/// Advance the session by one fixed timestep
pub fn tick(session: &mut Session, input: &TickInput, dt: f32) {
    if input.action {
        session.activate();
    }

    match session.phase {
        PlayState::Playing => step_playing(session, dt),
        PlayState::Died => session.died_countdown -= dt,
    }

    session.steps += 1;
}

fn step_playing(session: &mut Session, dt: f32) {
    session.elapsed += dt;

    session.player.update(dt);

    // Obstacles leave for good once fully past the left edge
    for obstacle in &mut session.obstacles {
        obstacle.update(dt);
    }
    session.obstacles.retain(|o| !o.is_offscreen_left());

    // Background layers wrap around to the right edge instead
    let width = session.viewport.width;
    for layer in &mut session.backgrounds {
        layer.update(dt);
        let position = layer.physics.position();
        if position.x <= -width {
            layer.physics.set_position(Vector2::new(width, position.y));
            layer.physics.update(0.0);
        }
    }

    session.spawn_countdown -= dt;
    if session.spawn_countdown <= 0.0 {
        session.spawn_obstacle_pair();
        session.spawn_countdown = SPAWN_TIME;
    }

    if check_collisions(session) {
        session.die();
    }
}

/// Fell off the bottom, or touched any obstacle
fn check_collisions(session: &Session) -> bool {
    if player_fell(&session.player, &session.viewport) {
        return true;
    }

    let center = session.player.center();
    let radius = session.player.radius;
    session
        .obstacles
        .iter()
        .any(|obstacle| circle_rect_overlap(center, radius, &obstacle.bounds()))
}
