//! Point type for navmesh positions.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// Position in navmesh space (meters, f32, Y-up)
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct NavPoint {
    /// X coordinate in meters
    pub x: f32,
    /// Y coordinate in meters (up)
    pub y: f32,
    /// Z coordinate in meters
    pub z: f32,
}

impl NavPoint {
    /// Create a new point
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Origin
    pub const ZERO: NavPoint = NavPoint {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Euclidean distance to another point
    #[inline]
    pub fn distance(&self, other: &NavPoint) -> f32 {
        self.distance_squared(other).sqrt()
    }

    /// Squared distance (avoids sqrt)
    #[inline]
    pub fn distance_squared(&self, other: &NavPoint) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }

    /// Midpoint between two points
    #[inline]
    pub fn midpoint(&self, other: &NavPoint) -> NavPoint {
        NavPoint::new(
            (self.x + other.x) * 0.5,
            (self.y + other.y) * 0.5,
            (self.z + other.z) * 0.5,
        )
    }

    /// True if every component is finite
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for NavPoint {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        NavPoint::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for NavPoint {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        NavPoint::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Mul<f32> for NavPoint {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: f32) -> Self {
        NavPoint::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}
