//! 2-D vector math for positions, velocities and steering forces.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn distance(&self, other: &Self) -> f64 {
        (*self - *other).magnitude()
    }

    /// Unit vector in the same direction. `None` for the zero vector.
    pub fn unit(&self) -> Option<Self> {
        self.set_magnitude(1.0)
    }

    /// Returns `self` unchanged when its length is within `limit`,
    /// otherwise `self` scaled to exactly `limit`.
    pub fn clamp_magnitude(&self, limit: f64) -> Self {
        let mag = self.magnitude();
        if mag > limit {
            *self * (limit / mag)
        } else {
            *self
        }
    }

    /// Scales `self` to exactly `mag`. `None` for the zero vector, which has
    /// no direction to scale along.
    pub fn set_magnitude(&self, mag: f64) -> Option<Self> {
        let current = self.magnitude();
        if current > 0.0 {
            Some(*self * (mag / current))
        } else {
            None
        }
    }

    /// Wraps both components into `[0, bounds.x) x [0, bounds.y)`.
    pub fn wrap(&self, bounds: &Self) -> Self {
        Self::new(wrap(self.x, bounds.x), wrap(self.y, bounds.y))
    }

    pub fn to_array(self) -> [f64; 2] {
        [self.x, self.y]
    }
}

impl From<[f64; 2]> for Vector2 {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl Add for Vector2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vector2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vector2 {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Vector2 {
    type Output = Self;
    fn div(self, rhs: f64) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vector2 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl std::iter::Sum for Vector2 {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

/// Euclidean modulo: always lands in `[0, bound)`.
pub fn wrap(scalar: f64, bound: f64) -> f64 {
    ((scalar % bound) + bound) % bound
}

/// Drawing angle of a heading, as the canvas renderer computes it.
///
/// Only the vertical case is special-cased; every other vector goes through
/// `atan(y / x)` with no quadrant correction, so headings with negative `x`
/// map onto the mirrored angle. Renderers rely on this exact mapping.
pub fn angle_of(v: &Vector2) -> f64 {
    if v.x == 0.0 {
        if v.y > 0.0 {
            0.5 * PI
        } else {
            1.5 * PI
        }
    } else {
        (v.y / v.x).atan()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_clamp_magnitude() {
        let v = Vector2::new(3.0, 4.0);
        assert_eq!(v.clamp_magnitude(10.0), v);

        let clamped = v.clamp_magnitude(2.5);
        assert!((clamped.magnitude() - 2.5).abs() < EPS);
        assert!((clamped.x - 1.5).abs() < EPS);
        assert!((clamped.y - 2.0).abs() < EPS);
    }

    #[test]
    fn test_set_magnitude() {
        let v = Vector2::new(0.0, 2.0).set_magnitude(7.0).unwrap();
        assert!((v.y - 7.0).abs() < EPS);
        assert!(v.x.abs() < EPS);

        // Zero vector has no direction
        assert!(Vector2::ZERO.set_magnitude(1.0).is_none());
        assert!(Vector2::ZERO.unit().is_none());
    }

    #[test]
    fn test_wrap_is_euclidean() {
        assert!((wrap(100.5, 100.0) - 0.5).abs() < EPS);
        assert!((wrap(-0.5, 100.0) - 99.5).abs() < EPS);
        assert!((wrap(-250.0, 100.0) - 50.0).abs() < EPS);
        assert_eq!(wrap(0.0, 100.0), 0.0);

        let p = Vector2::new(-1.0, 101.0).wrap(&Vector2::new(100.0, 50.0));
        assert!((p.x - 99.0).abs() < EPS);
        assert!((p.y - 1.0).abs() < EPS);
    }

    #[test]
    fn test_angle_of_two_branch_formula() {
        assert!((angle_of(&Vector2::new(0.0, 1.0)) - 0.5 * PI).abs() < EPS);
        assert!((angle_of(&Vector2::new(0.0, -1.0)) - 1.5 * PI).abs() < EPS);
        assert!((angle_of(&Vector2::new(1.0, 1.0)) - PI / 4.0).abs() < EPS);
        // No quadrant correction for negative x
        assert!((angle_of(&Vector2::new(-1.0, -1.0)) - PI / 4.0).abs() < EPS);
    }

    #[test]
    fn test_sum_and_ops() {
        let total: Vector2 = [Vector2::new(1.0, 2.0), Vector2::new(-3.0, 0.5)]
            .into_iter()
            .sum();
        assert_eq!(total, Vector2::new(-2.0, 2.5));
        assert_eq!(-total * 2.0, Vector2::new(4.0, -5.0));
        assert_eq!(total / 2.0, Vector2::new(-1.0, 1.25));
    }
}
