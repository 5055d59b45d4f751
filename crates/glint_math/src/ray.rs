use crate::{Interval, Vec3};

/// A ray in 3D space with origin, direction and a valid parametric range.
///
/// Hits are only reported for `t` between `min` and `max`. The lower bound keeps
/// rays from re-hitting the surface they start on; the upper bound is used by
/// shadow rays to stop at the light.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Expected to be normalized by the caller when used for shading.
    pub direction: Vec3,
    pub min: f32,
    pub max: f32,
}

impl Ray {
    pub const DEFAULT_MIN: f32 = 0.0001;
    pub const DEFAULT_MAX: f32 = f32::MAX;

    /// Create a new ray with the default parametric range.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self::with_bounds(origin, direction, Self::DEFAULT_MIN, Self::DEFAULT_MAX)
    }

    /// Create a ray with an explicit `[min, max]` range.
    pub fn with_bounds(origin: Vec3, direction: Vec3, min: f32, max: f32) -> Self {
        Self {
            origin,
            direction,
            min,
            max,
        }
    }

    /// The valid parametric range as an interval.
    #[inline]
    pub fn interval(&self) -> Interval {
        Interval::new(self.min, self.max)
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

impl Default for Ray {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::Z)
    }
}
