//! Normalized arc geometry.
//!
//! Angles are stored as fractions of a full turn and only converted to
//! radians when a point is needed.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// A point in normalized unit-circle space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Linear interpolation towards `other` by `t` (0 = self, 1 = other).
    pub fn lerp(self, other: Point, t: f64) -> Point {
        Point::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Convert a turn fraction to radians.
pub fn fraction_to_radians(fraction: f64) -> f64 {
    fraction * PI * 2.0
}

/// Point on the circle of radius `r` around `(cx, cy)` at the given turn fraction.
pub fn polar(cx: f64, cy: f64, r: f64, fraction: f64) -> Point {
    let angle = fraction_to_radians(fraction);
    Point::new(cx + r * angle.cos(), cy + r * angle.sin())
}

/// An annular sector: angular span `[start, end)` between radii `r0` and `r`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcShape {
    pub start: f64,
    pub end: f64,
    pub cx: f64,
    pub cy: f64,
    /// Inner radius.
    pub r0: f64,
    /// Outer radius.
    pub r: f64,
}

impl ArcShape {
    /// Arc centred on the origin.
    pub fn new(start: f64, end: f64, r0: f64, r: f64) -> Self {
        Self {
            start,
            end,
            cx: 0.0,
            cy: 0.0,
            r0,
            r,
        }
    }

    pub fn span(&self) -> f64 {
        self.end - self.start
    }

    pub fn mid(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn center(&self) -> Point {
        Point::new(self.cx, self.cy)
    }

    pub fn point_at(&self, fraction: f64, radius: f64) -> Point {
        polar(self.cx, self.cy, radius, fraction)
    }

    /// Where the start angle meets the inner radius.
    pub fn inner_start(&self) -> Point {
        self.point_at(self.start, self.r0)
    }

    /// Where the end angle meets the inner radius.
    pub fn inner_end(&self) -> Point {
        self.point_at(self.end, self.r0)
    }

    /// Whether `other`'s angular span lies inside this one, within `eps`.
    pub fn contains_span(&self, other: &ArcShape, eps: f64) -> bool {
        other.start >= self.start - eps && other.end <= self.end + eps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_polar_quarter_turns() {
        let p = polar(0.0, 0.0, 1.0, 0.0);
        assert!((p.x - 1.0).abs() < EPS && p.y.abs() < EPS);

        let p = polar(0.0, 0.0, 2.0, 0.25);
        assert!(p.x.abs() < EPS && (p.y - 2.0).abs() < EPS);

        let p = polar(1.0, 1.0, 1.0, 0.5);
        assert!(p.x.abs() < EPS && (p.y - 1.0).abs() < EPS);
    }

    #[test]
    fn test_inner_boundary_points_sit_on_inner_radius() {
        let arc = ArcShape::new(0.1, 0.3, 0.55, 0.6);
        assert!((arc.inner_start().distance(arc.center()) - 0.55).abs() < EPS);
        assert!((arc.inner_end().distance(arc.center()) - 0.55).abs() < EPS);
        assert!((arc.span() - 0.2).abs() < EPS);
        assert!((arc.mid() - 0.2).abs() < EPS);
    }

    #[test]
    fn test_contains_span() {
        let outer = ArcShape::new(0.1, 0.5, 0.95, 1.0);
        assert!(outer.contains_span(&ArcShape::new(0.2, 0.4, 0.55, 0.6), EPS));
        assert!(!outer.contains_span(&ArcShape::new(0.05, 0.4, 0.55, 0.6), EPS));
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(2.0, -4.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.midpoint(b), Point::new(1.0, -2.0));
    }
}
