//! Infinite plane primitive.

use glint_math::{Ray, Vec3};

use crate::hittable::{HitQuery, HitRecord, Hittable};

/// Rays closer to parallel than this never hit a plane.
const PARALLEL_EPSILON: f32 = 1e-6;

/// An infinite plane through `origin` with unit `normal`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub origin: Vec3,
    pub normal: Vec3,
    pub material_index: usize,
}

impl Plane {
    /// Create a new plane. The normal is normalized automatically.
    pub fn new(origin: Vec3, normal: Vec3, material_index: usize) -> Self {
        Self {
            origin,
            normal: normal.normalize(),
            material_index,
        }
    }
}

impl Hittable for Plane {
    fn hit(&self, ray: &Ray, rec: &mut HitRecord, query: HitQuery) -> bool {
        let denom = self.normal.dot(ray.direction);
        if denom.abs() < PARALLEL_EPSILON {
            return false;
        }

        let t = self.normal.dot(self.origin - ray.origin) / denom;
        if !ray.interval().contains_half_open(t) {
            return false;
        }

        if query == HitQuery::Closest {
            rec.record(ray, t, self.normal, self.material_index);
        }

        true
    }
}
