//! 2D math utilities
//!
//! Re-exports glam with the engine's rectangle type

pub use glam::*;

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in pixel or world units.
///
/// `x`/`y` is the top-left corner, `w`/`h` the extents.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
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

    pub fn from_position_size(position: Vec2, size: Vec2) -> Self {
        Self::new(position.x, position.y, size.x, size.y)
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Overlap test. Touching edges do not count as a collision.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersects() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert!(!a.intersects(&Rect::new(10.0, 0.0, 5.0, 5.0))); // shared edge
        assert!(!a.intersects(&Rect::new(20.0, 20.0, 1.0, 1.0)));
    }

    #[test]
    fn test_contains() {
        let r = Rect::new(2.0, 2.0, 4.0, 4.0);
        assert!(r.contains(Vec2::new(2.0, 5.9)));
        assert!(!r.contains(Vec2::new(6.0, 3.0)));
    }
}
