//! Axis-aligned geometry and overlap tests
//!
//! Screen space: x grows right, y grows down. All overlap tests are closed
//! intervals, so touching edges count as a hit. Arcade collisions err on the
//! generous side.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (top-left corner plus size)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle from a top-left position and a size
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.w * 0.5
    }

    /// Shrink horizontally by `inset` on each side
    pub fn inset_x(&self, inset: f32) -> Self {
        Self::new(self.x + inset, self.y, (self.w - inset * 2.0).max(0.0), self.h)
    }

    /// Mirror around the vertical centerline of a play area `width` wide
    pub fn mirrored_x(&self, width: f32) -> Self {
        Self::new(width - self.x - self.w, self.y, self.w, self.h)
    }

    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }

    pub fn overlaps(&self, other: &Rect) -> bool {
        overlaps(self, other)
    }
}

/// Closed-interval AABB overlap
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    !(a.right() < b.left() || b.right() < a.left() || a.bottom() < b.top() || b.bottom() < a.top())
}

/// Circle vs rectangle, using the nearest point of the rectangle to the center
pub fn circle_rect_overlaps(center: Vec2, radius: f32, rect: &Rect) -> bool {
    let nearest = Vec2::new(
        center.x.clamp(rect.left(), rect.right()),
        center.y.clamp(rect.top(), rect.bottom()),
    );
    center.distance_squared(nearest) <= radius * radius
}

/// Does `body` span the top of `surface` horizontally?
///
/// The surface is shrunk by `inset` on both ends so actors standing on the
/// very lip of a platform slide off instead of hovering.
pub fn horizontally_aligned(body: &Rect, surface: &Rect, inset: f32) -> bool {
    body.right() > surface.left() + inset && body.left() < surface.right() - inset
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touching_edges_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        let c = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(overlaps(&a, &b));
        assert!(overlaps(&a, &c));
        assert!(a.overlaps(&b));
    }

    #[test]
    fn test_separated_rects_miss() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.5, 0.0, 10.0, 10.0);
        let c = Rect::new(0.0, -10.5, 10.0, 10.0);
        assert!(!overlaps(&a, &b));
        assert!(!overlaps(&a, &c));
    }

    #[test]
    fn test_contained_rect_overlaps() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(40.0, 40.0, 5.0, 5.0);
        assert!(overlaps(&outer, &inner));
        assert!(overlaps(&inner, &outer));
    }

    #[test]
    fn test_circle_rect() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        // Center inside
        assert!(circle_rect_overlaps(Vec2::new(5.0, 5.0), 1.0, &rect));
        // Exactly touching a side
        assert!(circle_rect_overlaps(Vec2::new(13.0, 5.0), 3.0, &rect));
        // Near the corner but outside the radius
        assert!(!circle_rect_overlaps(Vec2::new(13.0, 13.0), 4.0, &rect));
        // Corner within the radius
        assert!(circle_rect_overlaps(Vec2::new(13.0, 13.0), 4.5, &rect));
    }

    #[test]
    fn test_horizontal_alignment_inset() {
        let surface = Rect::new(100.0, 200.0, 100.0, 16.0);
        let on = Rect::new(150.0, 160.0, 28.0, 40.0);
        let lip_left = Rect::new(74.0, 160.0, 28.0, 40.0);
        let lip_right = Rect::new(198.0, 160.0, 28.0, 40.0);
        assert!(horizontally_aligned(&on, &surface, 2.0));
        assert!(!horizontally_aligned(&lip_left, &surface, 2.0));
        assert!(!horizontally_aligned(&lip_right, &surface, 2.0));
    }

    #[test]
    fn test_mirror_and_inset() {
        let r = Rect::new(60.0, 0.0, 560.0, 16.0);
        let m = r.mirrored_x(800.0);
        assert_eq!(m.left(), 180.0);
        assert_eq!(m.right(), 740.0);
        let probe = Rect::new(10.0, 0.0, 28.0, 40.0).inset_x(4.0);
        assert_eq!(probe.left(), 14.0);
        assert_eq!(probe.w, 20.0);
    }
}
