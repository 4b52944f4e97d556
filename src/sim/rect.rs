//! Axis-aligned bounding boxes
//!
//! Used for entity placement, collision tests and UI hit-testing.

use glam::Vec2;

/// An axis-aligned rectangle stored as center + size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub center: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    /// Build from the top-left corner, the way menu layouts are written
    pub fn from_top_left(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            center: Vec2::new(x + w / 2.0, y + h / 2.0),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.center.x - self.size.x / 2.0
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.center.x + self.size.x / 2.0
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.center.y - self.size.y / 2.0
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.center.y + self.size.y / 2.0
    }

    /// Strict overlap test: rectangles that only share an edge do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Point containment, inclusive of the top-left edges and exclusive of
    /// the bottom-right ones
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.left() && p.x < self.right() && p.y >= self.top() && p.y < self.bottom()
    }

    /// Shift the rectangle so it lies fully inside `[0, width] x [0, height]`.
    /// Rectangles larger than the bounds are pinned to the top-left.
    pub fn clamp_within(&mut self, width: f32, height: f32) {
        let half = self.size / 2.0;
        self.center.x = self.center.x.min(width - half.x).max(half.x);
        self.center.y = self.center.y.min(height - half.y).max(half.y);
    }
}
