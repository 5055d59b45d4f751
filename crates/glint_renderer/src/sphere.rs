//! Sphere primitive for ray tracing.

use glint_math::{Aabb, Ray, Vec3};

use crate::hittable::{HitQuery, HitRecord, Hittable};

/// A sphere primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub origin: Vec3,
    pub radius: f32,
    pub material_index: usize,
}

impl Sphere {
    /// Create a new sphere. Negative radii are clamped to zero.
    pub fn new(origin: Vec3, radius: f32, material_index: usize) -> Self {
        Self {
            origin,
            radius: radius.max(0.0),
            material_index,
        }
    }

    pub fn bounding_box(&self) -> Aabb {
        let rvec = Vec3::splat(self.radius);
        Aabb::from_points(self.origin - rvec, self.origin + rvec)
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, rec: &mut HitRecord, query: HitQuery) -> bool {
        let oc = ray.origin - self.origin;
        let a = ray.direction.length_squared();
        let b = oc.dot(ray.direction);
        let c = oc.length_squared() - self.radius * self.radius;

        // Tangent rays count as misses
        let discriminant = b * b - a * c;
        if discriminant <= 0.0 {
            return false;
        }

        let sqrtd = discriminant.sqrt();

        // Near root first, far root when the near one is behind the ray start
        let mut t = (-b - sqrtd) / a;
        if t < ray.min {
            t = (-b + sqrtd) / a;
        }
        if !ray.interval().surrounds(t) {
            return false;
        }

        if query == HitQuery::Closest {
            let normal = (ray.at(t) - self.origin) / self.radius;
            rec.record(ray, t, normal, self.material_index);
        }

        true
    }
}
