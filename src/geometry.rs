//! Layout primitives shared by panels, buttons, the dockspace and the pipeline
//!
//! All coordinates live in a normalized space whose origin is the centre of the
//! viewport, with x growing to the right and y growing upwards. Units are
//! logical pixels (physical pixels divided by the window content scale).

use std::ops::{Add, AddAssign, Neg, Sub};

use serde::{Deserialize, Serialize};

// ============================================================================
// Vectors
// ============================================================================

/// A 2D vector used for positions, dimensions and offsets
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Both components set to the same value
    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v }
    }

    pub fn half(self) -> Self {
        Self::new(self.x / 2.0, self.y / 2.0)
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

impl From<(f32, f32)> for Vec2 {
    fn from((x, y): (f32, f32)) -> Self {
        Vec2::new(x, y)
    }
}

// ============================================================================
// Rectangles
// ============================================================================

/// Axis-aligned rectangle stored as its four edges
///
/// Invariant: `left <= right` and `bottom <= top`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect2D {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
}

impl Rect2D {
    pub fn new(left: f32, right: f32, bottom: f32, top: f32) -> Self {
        Self {
            left: left.min(right),
            right: right.max(left),
            bottom: bottom.min(top),
            top: top.max(bottom),
        }
    }

    /// Build the rectangle of a quad given its centre and dimensions
    pub fn from_center(center: Vec2, dimensions: Vec2) -> Self {
        let half = dimensions.half();
        Self::new(
            center.x - half.x,
            center.x + half.x,
            center.y - half.y,
            center.y + half.y,
        )
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.top - self.bottom
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.left + self.right) / 2.0,
            (self.bottom + self.top) / 2.0,
        )
    }

    pub fn dimensions(&self) -> Vec2 {
        Vec2::new(self.width(), self.height())
    }

    /// Inclusive containment test
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.bottom && p.y <= self.top
    }

    /// Grow the rectangle by `amount` on every side
    pub fn expanded(&self, amount: f32) -> Self {
        Self::new(
            self.left - amount,
            self.right + amount,
            self.bottom - amount,
            self.top + amount,
        )
    }

    /// Whether the point lies within `tolerance` of the left edge
    /// (inside the expanded rectangle).
    pub fn near_left(&self, p: Vec2, tolerance: f32) -> bool {
        p.x <= self.left + tolerance
    }

    pub fn near_right(&self, p: Vec2, tolerance: f32) -> bool {
        p.x >= self.right - tolerance
    }

    pub fn near_bottom(&self, p: Vec2, tolerance: f32) -> bool {
        p.y <= self.bottom + tolerance
    }

    pub fn near_top(&self, p: Vec2, tolerance: f32) -> bool {
        p.y >= self.top - tolerance
    }
}

/// Position and dimensions of a quad, moved around as one value so that
/// the two are never observed out of sync
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Centre of the quad
    pub position: Vec2,
    pub dimensions: Vec2,
}

impl Metrics {
    pub fn new(position: Vec2, dimensions: Vec2) -> Self {
        Self {
            position,
            dimensions,
        }
    }

    pub fn rect(&self) -> Rect2D {
        Rect2D::from_center(self.position, self.dimensions)
    }

    pub fn from_rect(rect: Rect2D) -> Self {
        Self {
            position: rect.center(),
            dimensions: rect.dimensions(),
        }
    }
}

/// Approximate float comparison used for edge adjacency checks
#[inline]
pub fn approx_eq(a: f32, b: f32, epsilon: f32) -> bool {
    (a - b).abs() <= epsilon
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_from_center() {
        let rect = Rect2D::from_center(Vec2::new(10.0, -20.0), Vec2::new(200.0, 100.0));
        assert_eq!(rect.left, -90.0);
        assert_eq!(rect.right, 110.0);
        assert_eq!(rect.bottom, -70.0);
        assert_eq!(rect.top, 30.0);
        assert_eq!(rect.center(), Vec2::new(10.0, -20.0));
    }

    #[test]
    fn test_rect_new_normalizes_edges() {
        let rect = Rect2D::new(5.0, -5.0, 3.0, -3.0);
        assert!(rect.left <= rect.right);
        assert!(rect.bottom <= rect.top);
        assert_eq!(rect.width(), 10.0);
        assert_eq!(rect.height(), 6.0);
    }

    #[test]
    fn test_contains_is_inclusive() {
        let rect = Rect2D::new(0.0, 10.0, 0.0, 10.0);
        assert!(rect.contains(Vec2::new(0.0, 0.0)));
        assert!(rect.contains(Vec2::new(10.0, 10.0)));
        assert!(!rect.contains(Vec2::new(10.01, 5.0)));
    }

    #[test]
    fn test_expanded() {
        let rect = Rect2D::new(0.0, 10.0, 0.0, 10.0).expanded(3.0);
        assert!(rect.contains(Vec2::new(-3.0, 13.0)));
        assert!(!rect.contains(Vec2::new(-3.5, 5.0)));
    }

    #[test]
    fn test_metrics_rect_roundtrip() {
        let metrics = Metrics::new(Vec2::new(-25.0, 0.0), Vec2::new(250.0, 100.0));
        assert_eq!(Metrics::from_rect(metrics.rect()), metrics);
    }
}
