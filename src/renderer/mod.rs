//! Rendering module
//!
//! The game draws through the primitive-shape [`Canvas`] trait so any backend
//! (GPU, terminal, test buffer) can present a frame. [`draw_frame`] turns a
//! read-only [`World`](crate::sim::World) into canvas calls.

pub mod scene;
pub mod text;

pub use scene::draw_frame;
pub use text::TextCanvas;

use glam::Vec2;

use crate::sim::Rect;

/// RGBA, 0.0..=1.0 per channel
pub type Color = [f32; 4];

/// Named colors used by the scene
pub mod palette {
    use super::Color;

    pub const BACKGROUND: Color = [0.96, 0.96, 0.96, 1.0];
    pub const FLOOR: Color = [0.55, 0.27, 0.07, 1.0];
    pub const GIRDER: Color = [0.80, 0.20, 0.25, 1.0];
    pub const LADDER: Color = [0.95, 0.75, 0.10, 1.0];
    pub const GOAL: Color = [0.45, 0.25, 0.10, 1.0];
    pub const BARREL: Color = [0.65, 0.40, 0.15, 1.0];
    pub const PLAYER: Color = [0.10, 0.35, 0.85, 1.0];
    /// Player tint while holding the hammer
    pub const PLAYER_ARMED: Color = [0.95, 0.55, 0.05, 1.0];
    pub const PICKUP: Color = [0.50, 0.50, 0.55, 1.0];
    pub const TEXT: Color = [0.25, 0.25, 0.25, 1.0];
    pub const OVERLAY: Color = [0.0, 0.0, 0.0, 0.6];
    pub const ALERT: Color = [0.90, 0.10, 0.10, 1.0];
}

/// Minimal drawing surface
pub trait Canvas {
    fn clear(&mut self, color: Color);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn stroke_rect(&mut self, rect: Rect, thickness: f32, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    /// Text with its top-left corner at `pos`; `size` is the glyph height
    fn text(&mut self, pos: Vec2, size: f32, color: Color, text: &str);
}
