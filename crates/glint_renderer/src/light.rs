//! Light sources.

use glint_math::{Color, Vec3, VectorExt};

/// A punctual light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    /// Radiates from a point, falling off with the squared distance.
    Point {
        origin: Vec3,
        intensity: f32,
        color: Color,
    },
    /// Parallel rays from infinitely far away.
    Directional {
        /// Unit direction the light travels in (not where it comes from).
        direction: Vec3,
        intensity: f32,
        color: Color,
    },
}

impl Light {
    pub fn point(origin: Vec3, intensity: f32, color: Color) -> Self {
        Self::Point {
            origin,
            intensity,
            color,
        }
    }

    /// The direction is normalized automatically.
    pub fn directional(direction: Vec3, intensity: f32, color: Color) -> Self {
        Self::Directional {
            direction: direction.normalize(),
            intensity,
            color,
        }
    }

    /// Unit direction from `point` towards the light, and the distance to it.
    ///
    /// Directional lights are infinitely far away, so the distance is
    /// `f32::MAX` and a shadow ray bounded by it tests the whole half-line.
    pub fn direction_from(&self, point: Vec3) -> (Vec3, f32) {
        match *self {
            Light::Point { origin, .. } => {
                let mut to_light = origin - point;
                let distance = to_light.normalize_in_place();
                (to_light, distance)
            }
            Light::Directional { direction, .. } => (-direction, f32::MAX),
        }
    }

    /// Radiance arriving at `target`.
    pub fn radiance(&self, target: Vec3) -> Color {
        match *self {
            Light::Point {
                origin,
                intensity,
                color,
            } => color * (intensity / origin.distance_squared(target)),
            Light::Directional {
                intensity, color, ..
            } => color * intensity,
        }
    }

    pub fn color(&self) -> Color {
        match *self {
            Light::Point { color, .. } | Light::Directional { color, .. } => color,
        }
    }

    pub fn intensity(&self) -> f32 {
        match *self {
            Light::Point { intensity, .. } | Light::Directional { intensity, .. } => intensity,
        }
    }
}
