//! Hittable trait and HitRecord for ray-object intersection.

use glint_math::{Ray, Vec3};

/// Record of a ray-object intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Point of intersection
    pub origin: Vec3,
    /// Unit geometric normal at the intersection
    pub normal: Vec3,
    /// Ray parameter of the intersection
    pub t: f32,
    pub did_hit: bool,
    /// Index into the scene's material table
    pub material_index: usize,
}

impl Default for HitRecord {
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            normal: Vec3::ZERO,
            t: f32::INFINITY,
            did_hit: false,
            material_index: 0,
        }
    }
}

impl HitRecord {
    /// Fill in a hit at parameter `t` along `ray`.
    pub fn record(&mut self, ray: &Ray, t: f32, normal: Vec3, material_index: usize) {
        self.origin = ray.at(t);
        self.normal = normal;
        self.t = t;
        self.did_hit = true;
        self.material_index = material_index;
    }
}

/// What the caller wants to know about an intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitQuery {
    /// Primary query: fill in the record for the intersection that was found.
    Closest,
    /// Shadow query: only report whether anything is hit. The record is left
    /// untouched and implementations may stop at the first hit.
    Any,
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Test `ray` against this object inside the ray's own `[min, max]` range.
    ///
    /// With `HitQuery::Closest` a hit fills `rec`; with `HitQuery::Any` the
    /// record is not written.
    fn hit(&self, ray: &Ray, rec: &mut HitRecord, query: HitQuery) -> bool;

    /// Occlusion test for shadow rays.
    fn occludes(&self, ray: &Ray) -> bool {
        let mut scratch = HitRecord::default();
        self.hit(ray, &mut scratch, HitQuery::Any)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record_is_a_miss() {
        let rec = HitRecord::default();

        assert!(!rec.did_hit);
        assert_eq!(rec.t, f32::INFINITY);
        assert_eq!(rec.material_index, 0);
    }

    #[test]
    fn test_record_fills_hit() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let mut rec = HitRecord::default();
        rec.record(&ray, 2.5, Vec3::Y, 3);

        assert!(rec.did_hit);
        assert_eq!(rec.t, 2.5);
        assert_eq!(rec.origin, Vec3::new(2.5, 0.0, 0.0));
        assert_eq!(rec.normal, Vec3::Y);
        assert_eq!(rec.material_index, 3);
    }
}
