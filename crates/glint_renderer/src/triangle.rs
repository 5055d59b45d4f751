//! Single triangle primitive with face culling.
//!
//! Winding is clockwise: the face normal is `normalize(cross(v1 - v0, v2 - v0))`
//! and a face is front-facing when a ray travels against that normal.

use glint_math::{Aabb, Ray, Vec3};

use crate::hittable::{HitQuery, HitRecord, Hittable};

/// Which side of a triangle rays may hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CullMode {
    /// Faces seen from the front are invisible.
    FrontFace,
    /// Faces seen from the back are invisible.
    BackFace,
    /// Both sides are hit.
    #[default]
    Disabled,
}

impl CullMode {
    /// `facing` is `dot(normal, ray.direction)`.
    ///
    /// Shadow rays travel from the surface towards the light, the opposite of
    /// the light's own path, so the rejected side flips for `HitQuery::Any`.
    pub fn culls(self, facing: f32, query: HitQuery) -> bool {
        match (self, query) {
            (CullMode::FrontFace, HitQuery::Closest) => facing < 0.0,
            (CullMode::FrontFace, HitQuery::Any) => facing > 0.0,
            (CullMode::BackFace, HitQuery::Closest) => facing > 0.0,
            (CullMode::BackFace, HitQuery::Any) => facing < 0.0,
            (CullMode::Disabled, _) => false,
        }
    }
}

/// A triangle with a precomputed face normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub v0: Vec3,
    pub v1: Vec3,
    pub v2: Vec3,
    pub normal: Vec3,
    pub cull_mode: CullMode,
    pub material_index: usize,
}

impl Triangle {
    /// Create a triangle, computing its face normal from the winding.
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3, cull_mode: CullMode, material_index: usize) -> Self {
        let normal = (v1 - v0).cross(v2 - v0).normalize();
        Self::with_normal(v0, v1, v2, normal, cull_mode, material_index)
    }

    /// Create a triangle with a known unit normal.
    pub fn with_normal(
        v0: Vec3,
        v1: Vec3,
        v2: Vec3,
        normal: Vec3,
        cull_mode: CullMode,
        material_index: usize,
    ) -> Self {
        Self {
            v0,
            v1,
            v2,
            normal,
            cull_mode,
            material_index,
        }
    }

    pub fn bounding_box(&self) -> Aabb {
        Aabb::from_point_cloud([&self.v0, &self.v1, &self.v2])
    }
}

impl Hittable for Triangle {
    fn hit(&self, ray: &Ray, rec: &mut HitRecord, query: HitQuery) -> bool {
        let facing = self.normal.dot(ray.direction);
        if facing == 0.0 {
            return false;
        }
        if self.cull_mode.culls(facing, query) {
            return false;
        }

        // Intersect the supporting plane
        let t = (self.v0 - ray.origin).dot(self.normal) / facing;
        if !ray.interval().contains(t) {
            return false;
        }

        // Inside test: the point must be left of every edge
        let p = ray.at(t);
        for (a, b) in [(self.v0, self.v1), (self.v1, self.v2), (self.v2, self.v0)] {
            if (b - a).cross(p - a).dot(self.normal) < 0.0 {
                return false;
            }
        }

        if query == HitQuery::Closest {
            rec.record(ray, t, self.normal, self.material_index);
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Triangle in the z = 0 plane with its normal towards -Z, like a wall
    /// seen by a camera looking down +Z.
    fn facing_camera(cull_mode: CullMode) -> Triangle {
        Triangle::new(
            Vec3::new(-0.75, 1.5, 0.0),
            Vec3::new(0.75, 0.0, 0.0),
            Vec3::new(-0.75, 0.0, 0.0),
            cull_mode,
            0,
        )
    }

    #[test]
    fn test_normal_follows_winding() {
        let tri = facing_camera(CullMode::Disabled);
        assert!((tri.normal - -Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_triangle_hit() {
        let tri = facing_camera(CullMode::Disabled);
        let ray = Ray::new(Vec3::new(-0.25, 0.5, -5.0), Vec3::Z);
        let mut rec = HitRecord::default();

        assert!(tri.hit(&ray, &mut rec, HitQuery::Closest));
        assert!((rec.t - 5.0).abs() < 1e-5);
        assert!((rec.origin - Vec3::new(-0.25, 0.5, 0.0)).length() < 1e-5);
        assert_eq!(rec.normal, tri.normal);
    }

    #[test]
    fn test_triangle_miss_outside_edges() {
        let tri = facing_camera(CullMode::Disabled);
        let mut rec = HitRecord::default();

        // In the plane's way but right of the hypotenuse
        let ray = Ray::new(Vec3::new(0.5, 1.0, -5.0), Vec3::Z);
        assert!(!tri.hit(&ray, &mut rec, HitQuery::Closest));

        // Parallel to the plane
        let ray = Ray::new(Vec3::new(-0.25, 0.5, -5.0), Vec3::X);
        assert!(!tri.hit(&ray, &mut rec, HitQuery::Closest));
    }

    #[test]
    fn test_no_culling_hits_both_sides() {
        let tri = facing_camera(CullMode::Disabled);
        let mut rec = HitRecord::default();

        let front = Ray::new(Vec3::new(-0.25, 0.5, -5.0), Vec3::Z);
        let back = Ray::new(Vec3::new(-0.25, 0.5, 5.0), -Vec3::Z);
        for query in [HitQuery::Closest, HitQuery::Any] {
            assert!(tri.hit(&front, &mut rec, query));
            assert!(tri.hit(&back, &mut rec, query));
        }
    }

    #[test]
    fn test_cull_sense_by_facing() {
        // Front-facing means the ray runs against the normal (facing < 0)
        let toward = -1.0;
        let away = 1.0;

        assert!(CullMode::FrontFace.culls(toward, HitQuery::Closest));
        assert!(!CullMode::FrontFace.culls(away, HitQuery::Closest));
        assert!(CullMode::FrontFace.culls(away, HitQuery::Any));
        assert!(!CullMode::FrontFace.culls(toward, HitQuery::Any));

        assert!(CullMode::BackFace.culls(away, HitQuery::Closest));
        assert!(!CullMode::BackFace.culls(toward, HitQuery::Closest));
        assert!(CullMode::BackFace.culls(toward, HitQuery::Any));
        assert!(!CullMode::BackFace.culls(away, HitQuery::Any));

        for facing in [toward, away] {
            for query in [HitQuery::Closest, HitQuery::Any] {
                assert!(!CullMode::Disabled.culls(facing, query));
            }
        }
    }

    #[test]
    fn test_back_face_culling() {
        let tri = facing_camera(CullMode::BackFace);
        let mut rec = HitRecord::default();

        // `front` travels against the -Z normal
        let front = Ray::new(Vec3::new(-0.25, 0.5, -5.0), Vec3::Z);
        let back = Ray::new(Vec3::new(-0.25, 0.5, 5.0), -Vec3::Z);
        assert!(tri.hit(&front, &mut rec, HitQuery::Closest));
        assert!(!tri.hit(&back, &mut rec, HitQuery::Closest));
    }

    #[test]
    fn test_front_face_culling() {
        let tri = facing_camera(CullMode::FrontFace);
        let mut rec = HitRecord::default();

        // Primary rays lose the side the normal faces
        let front = Ray::new(Vec3::new(-0.25, 0.5, -5.0), Vec3::Z);
        let back = Ray::new(Vec3::new(-0.25, 0.5, 5.0), -Vec3::Z);
        assert!(!tri.hit(&front, &mut rec, HitQuery::Closest));
        assert!(tri.hit(&back, &mut rec, HitQuery::Closest));
    }

    #[test]
    fn test_shadow_rays_flip_culled_side() {
        let front = Ray::new(Vec3::new(-0.25, 0.5, -5.0), Vec3::Z);
        let back = Ray::new(Vec3::new(-0.25, 0.5, 5.0), -Vec3::Z);

        for mode in [CullMode::FrontFace, CullMode::BackFace] {
            let tri = facing_camera(mode);
            for ray in [&front, &back] {
                let mut rec = HitRecord::default();
                let primary = tri.hit(ray, &mut rec, HitQuery::Closest);
                let shadow = tri.occludes(ray);
                assert_ne!(primary, shadow, "{mode:?} should flip for shadow rays");
            }
        }
    }

    #[test]
    fn test_any_query_leaves_record_untouched() {
        let tri = facing_camera(CullMode::Disabled);
        let ray = Ray::new(Vec3::new(-0.25, 0.5, -5.0), Vec3::Z);
        let mut rec = HitRecord::default();

        assert!(tri.hit(&ray, &mut rec, HitQuery::Any));
        assert_eq!(rec, HitRecord::default());
    }

    #[test]
    fn test_respects_ray_bounds() {
        let tri = facing_camera(CullMode::Disabled);
        let mut rec = HitRecord::default();

        let ray = Ray::with_bounds(Vec3::new(-0.25, 0.5, -5.0), Vec3::Z, 0.0001, 4.0);
        assert!(!tri.hit(&ray, &mut rec, HitQuery::Closest));

        // Max is inclusive for triangles
        let ray = Ray::with_bounds(Vec3::new(-0.25, 0.5, -5.0), Vec3::Z, 0.0001, 5.0);
        assert!(tri.hit(&ray, &mut rec, HitQuery::Closest));
    }
}
