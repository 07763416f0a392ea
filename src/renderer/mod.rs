//! Rendering boundary
//!
//! The loop turns the session into a [`RenderFrame`] of positioned quads and
//! HUD text, blending each entity between its last two physics states. A
//! [`Renderer`] backend only has to draw the frame in order.

use crate::consts::PLAYER_SPRITE_SIZE;
use crate::highscores::format_time;
use crate::sim::{PlayState, Session, SpriteKind};
use crate::{Vector2, Viewport, lerp};

/// HUD text column, measured from the right edge
const HUD_RIGHT_INSET: i32 = 160;

/// What a quad is textured with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawLayer {
    /// Parallax layer with its texture index
    Background(u8),
    Obstacle,
    Player,
}

/// One textured quad, in whole screen pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawItem {
    pub layer: DrawLayer,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextColor {
    White,
    Red,
}

/// A line of HUD text
#[derive(Debug, Clone, PartialEq)]
pub struct HudText {
    pub text: String,
    pub x: i32,
    pub y: i32,
    pub color: TextColor,
}

/// Everything needed to draw one frame, back to front
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    /// Fraction of a step between the last two physics states
    pub blend: f32,
    pub items: Vec<DrawItem>,
    pub text: Vec<HudText>,
}

impl RenderFrame {
    /// Snapshot the session: backgrounds, then obstacles, then the player,
    /// then the HUD
    pub fn build(session: &Session, blend: f32) -> Self {
        let mut items = Vec::with_capacity(session.backgrounds.len() + session.obstacles.len() + 1);

        for sprite in session.backgrounds.iter().chain(session.obstacles.iter()) {
            let layer = match sprite.kind {
                SpriteKind::Background(texture) => DrawLayer::Background(texture),
                SpriteKind::Obstacle => DrawLayer::Obstacle,
            };
            let pos = snap(sprite.physics.interpolated(blend));
            items.push(DrawItem {
                layer,
                x: pos.0,
                y: pos.1,
                width: sprite.width.max(0.0).round() as u32,
                height: sprite.height.max(0.0).round() as u32,
            });
        }

        // Sprite art is centered a few pixels off the collision circle
        let player = &session.player;
        let center = snap(lerp(
            player.physics.last_position(),
            player.physics.position(),
            blend,
        ));
        let radius = player.radius as i32;
        items.push(DrawItem {
            layer: DrawLayer::Player,
            x: center.0 - radius - 3,
            y: center.1 - radius - 1,
            width: PLAYER_SPRITE_SIZE as u32,
            height: PLAYER_SPRITE_SIZE as u32,
        });

        let hud_x = session.viewport.width as i32 - HUD_RIGHT_INSET;
        let mut text = vec![
            HudText {
                text: format!("Time: {}", format_time(session.elapsed)),
                x: hud_x,
                y: 15,
                color: TextColor::White,
            },
            HudText {
                text: format!("High Score: {}", format_time(session.high_score.best())),
                x: hud_x,
                y: 35,
                color: TextColor::White,
            },
        ];
        if session.phase == PlayState::Died {
            text.push(HudText {
                text: "You Died!".to_string(),
                x: 10,
                y: 10,
                color: TextColor::Red,
            });
        }

        Self {
            viewport: session.viewport,
            blend,
            items,
            text,
        }
    }

    /// Quads of one kind, in draw order
    pub fn items_of(&self, layer: DrawLayer) -> impl Iterator<Item = &DrawItem> {
        self.items.iter().filter(move |item| item.layer == layer)
    }
}

fn snap(pos: Vector2) -> (i32, i32) {
    (pos.x.round() as i32, pos.y.round() as i32)
}

/// A drawing backend
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame);

    /// Whether presenting a frame waits for the display's vertical sync.
    /// Backends that return immediately leave pacing to the loop.
    fn blocks_on_vsync(&self) -> bool {
        false
    }
}

/// Draws nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _frame: &RenderFrame) {}
}

/// Logs per-frame stats at trace level and keeps the latest frame
#[derive(Debug, Default, Clone)]
pub struct TraceRenderer {
    frames: u64,
    last: Option<RenderFrame>,
}

impl TraceRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn last_frame(&self) -> Option<&RenderFrame> {
        self.last.as_ref()
    }
}

impl Renderer for TraceRenderer {
    fn render(&mut self, frame: &RenderFrame) {
        self.frames += 1;
        log::trace!(
            "frame {}: {} quads, blend {:.3}",
            self.frames,
            frame.items.len(),
            frame.blend
        );
        self.last = Some(frame.clone());
    }
}
