//! Axis-aligned rectangles
//!
//! Arena space has its origin at the top-left with y pointing down, so `pos`
//! is a rectangle's top-left corner and `pos + size` its bottom-right.

use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Strict overlap test: touching edges do not count
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// True if `inner` lies completely inside `self` (edges may touch)
    pub fn contains(&self, inner: &Aabb) -> bool {
        inner.left() >= self.left()
            && inner.right() <= self.right()
            && inner.top() >= self.top()
            && inner.bottom() <= self.bottom()
    }
}

/// Clamp a top-left position so a box of `size` stays inside `bounds`.
///
/// `bounds` must be at least as large as `size` on both axes.
pub fn clamp_inside(pos: Vec2, size: Vec2, bounds: &Aabb) -> Vec2 {
    let min = bounds.pos;
    let max = bounds.pos + bounds.size - size;
    pos.clamp(min, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Aabb {
        Aabb::new(Vec2::new(x, y), Vec2::new(w, h))
    }

    #[test]
    fn test_overlap() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&rect(5.0, 5.0, 10.0, 10.0)));
        assert!(a.overlaps(&rect(2.0, 2.0, 2.0, 2.0)));
        assert!(!a.overlaps(&rect(20.0, 0.0, 5.0, 5.0)));
        assert!(!a.overlaps(&rect(0.0, 20.0, 5.0, 5.0)));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&rect(10.0, 0.0, 5.0, 5.0)));
        assert!(!a.overlaps(&rect(0.0, 10.0, 5.0, 5.0)));
        assert!(!a.overlaps(&rect(-5.0, 0.0, 5.0, 5.0)));
    }

    #[test]
    fn test_clamp_inside() {
        let bounds = rect(0.0, 30.0, 800.0, 420.0);
        let size = Vec2::new(62.0, 62.0);

        let p = clamp_inside(Vec2::new(-50.0, 0.0), size, &bounds);
        assert_eq!(p, Vec2::new(0.0, 30.0));

        let p = clamp_inside(Vec2::new(1000.0, 1000.0), size, &bounds);
        assert_eq!(p, Vec2::new(738.0, 388.0));
        assert!(bounds.contains(&Aabb::new(p, size)));
    }
}
