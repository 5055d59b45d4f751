//! Ray parameter ranges.
//!
//! Each primitive accepts a hit distance against the ray's `[min, max]` range
//! with its own bound kind: spheres use the open range, triangles the closed
//! range and planes the half-open one. Boxes reuse the same type per axis.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn size(&self) -> f32 {
        self.max - self.min
    }

    /// `min <= x <= max`. Triangle hits.
    pub fn contains(&self, x: f32) -> bool {
        self.min <= x && x <= self.max
    }

    /// `min < x < max`. Sphere hits.
    pub fn surrounds(&self, x: f32) -> bool {
        self.min < x && x < self.max
    }

    /// `min <= x < max`. Plane hits: a hit exactly at the ray's `max` (the
    /// light, for a shadow ray) does not count as occluding.
    pub fn contains_half_open(&self, x: f32) -> bool {
        self.min <= x && x < self.max
    }

    /// Pad by `delta / 2` on both ends, so flat boxes keep some thickness.
    pub fn expand(&self, delta: f32) -> Interval {
        let pad = delta * 0.5;
        Interval::new(self.min - pad, self.max + pad)
    }

    /// Smallest interval covering both.
    pub fn surrounding(a: &Interval, b: &Interval) -> Interval {
        Interval::new(a.min.min(b.min), a.max.max(b.max))
    }

    /// Contains nothing; the identity for [`Interval::surrounding`].
    pub const EMPTY: Interval = Interval {
        min: f32::INFINITY,
        max: f32::NEG_INFINITY,
    };
}
