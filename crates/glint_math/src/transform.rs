// Transform utilities for Mat4 and Vec3
//
// glam::Mat4 already provides transform_point3() (w=1) and
// transform_vector3() (w=0); these add the pieces the tracer needs on top.

use crate::Aabb;
use glam::{Mat4, Vec3};

/// Extension trait for Mat4 to provide additional transform utilities
pub trait Mat4Ext {
    /// Build an affine transform whose columns are the given basis vectors,
    /// with `origin` as the translation.
    fn from_basis(right: Vec3, up: Vec3, forward: Vec3, origin: Vec3) -> Mat4;

    /// Transform an axis-aligned bounding box.
    /// Computes the bounding box of all 8 transformed corners.
    fn transform_aabb(&self, aabb: &Aabb) -> Aabb;
}

impl Mat4Ext for Mat4 {
    fn from_basis(right: Vec3, up: Vec3, forward: Vec3, origin: Vec3) -> Mat4 {
        Mat4::from_cols(
            right.extend(0.0),
            up.extend(0.0),
            forward.extend(0.0),
            origin.extend(1.0),
        )
    }

    fn transform_aabb(&self, aabb: &Aabb) -> Aabb {
        if aabb.is_empty() {
            return Aabb::EMPTY;
        }

        let lo = aabb.min_point();
        let hi = aabb.max_point();

        let corners = (0..8).map(|i| {
            Vec3::new(
                if i & 1 == 0 { lo.x } else { hi.x },
                if i & 2 == 0 { lo.y } else { hi.y },
                if i & 4 == 0 { lo.z } else { hi.z },
            )
        });

        let mut result_min = Vec3::splat(f32::INFINITY);
        let mut result_max = Vec3::splat(f32::NEG_INFINITY);
        for corner in corners {
            let p = self.transform_point3(corner);
            result_min = result_min.min(p);
            result_max = result_max.max(p);
        }

        Aabb::from_points(result_min, result_max)
    }
}

/// In-place helpers for Vec3.
pub trait VectorExt {
    /// Normalize in place, returning the magnitude before normalization.
    ///
    /// A zero vector is left untouched.
    fn normalize_in_place(&mut self) -> f32;
}

impl VectorExt for Vec3 {
    fn normalize_in_place(&mut self) -> f32 {
        let magnitude = self.length();
        if magnitude > 0.0 {
            *self /= magnitude;
        }
        magnitude
    }
}
