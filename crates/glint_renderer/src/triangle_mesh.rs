//! Transformable triangle mesh.
//!
//! Object-space geometry plus a translation, rotation and scale. The world-space
//! caches (positions, normals, bounds) are only refreshed by
//! [`TriangleMesh::update_transforms`]; setting a transform leaves them stale
//! until the caller asks for the update.

use glint_core::Mesh;
use glint_math::{Aabb, Mat3, Mat4, Mat4Ext, Ray, Vec3};

use crate::hittable::{HitQuery, HitRecord, Hittable};
use crate::triangle::{CullMode, Triangle};

/// A mesh of triangles sharing one cull mode and one material.
#[derive(Debug, Clone)]
pub struct TriangleMesh {
    positions: Vec<Vec3>,
    /// One per triangle.
    normals: Vec<Vec3>,
    indices: Vec<u32>,

    pub cull_mode: CullMode,
    /// Checked by the scene on insertion, fixed afterwards.
    material_index: usize,

    translation: Mat4,
    rotation: Mat4,
    scale: Mat4,

    transformed_positions: Vec<Vec3>,
    transformed_normals: Vec<Vec3>,

    bounds: Aabb,
    world_bounds: Aabb,
}

impl TriangleMesh {
    /// An empty mesh with identity transforms.
    pub fn new(cull_mode: CullMode, material_index: usize) -> Self {
        Self {
            positions: Vec::new(),
            normals: Vec::new(),
            indices: Vec::new(),
            cull_mode,
            material_index,
            translation: Mat4::IDENTITY,
            rotation: Mat4::IDENTITY,
            scale: Mat4::IDENTITY,
            transformed_positions: Vec::new(),
            transformed_normals: Vec::new(),
            bounds: Aabb::EMPTY,
            world_bounds: Aabb::EMPTY,
        }
    }

    /// Build from ingested geometry. World-space caches are ready on return.
    pub fn from_mesh(mesh: &Mesh, cull_mode: CullMode, material_index: usize) -> Self {
        let mut this = Self::new(cull_mode, material_index);
        this.positions = mesh.positions().to_vec();
        this.indices = mesh.indices().to_vec();
        this.normals = mesh.normals().to_vec();

        this.update_aabb();
        this.update_transforms();
        this
    }

    /// Append a standalone triangle as three new vertices.
    ///
    /// Pass `skip_update = true` when appending many triangles and call
    /// [`update_transforms`](Self::update_transforms) once at the end.
    pub fn append_triangle(&mut self, triangle: &Triangle, skip_update: bool) {
        let base = self.positions.len() as u32;
        self.positions
            .extend_from_slice(&[triangle.v0, triangle.v1, triangle.v2]);
        self.indices.extend_from_slice(&[base, base + 1, base + 2]);
        self.normals.push(triangle.normal);
        self.bounds = Aabb::surrounding(&self.bounds, &triangle.bounding_box());

        if !skip_update {
            self.update_transforms();
        }
    }

    /// Set the translation part of the transform.
    pub fn translate(&mut self, translation: Vec3) {
        self.translation = Mat4::from_translation(translation);
    }

    /// Set the rotation part of the transform to `yaw` radians about +Y.
    pub fn rotate_y(&mut self, yaw: f32) {
        self.rotation = Mat4::from_rotation_y(yaw);
    }

    /// Set the scale part of the transform.
    pub fn scale(&mut self, scale: Vec3) {
        self.scale = Mat4::from_scale(scale);
    }

    /// Object-to-world transform, `T * R * S`.
    pub fn world_transform(&self) -> Mat4 {
        self.translation * self.rotation * self.scale
    }

    /// Recompute the object-space bounds from the current positions.
    pub fn update_aabb(&mut self) {
        self.bounds = Aabb::from_point_cloud(&self.positions);
    }

    /// Recompute world-space positions, normals and bounds from the current
    /// transform.
    pub fn update_transforms(&mut self) {
        let world = self.world_transform();
        // Inverse transpose keeps normals perpendicular under non-uniform scale
        let normal_matrix = Mat3::from_mat4(world).inverse().transpose();

        self.transformed_positions.clear();
        self.transformed_positions
            .extend(self.positions.iter().map(|&p| world.transform_point3(p)));

        self.transformed_normals.clear();
        self.transformed_normals
            .extend(self.normals.iter().map(|&n| (normal_matrix * n).normalize()));

        self.world_bounds = world.transform_aabb(&self.bounds);
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn transformed_positions(&self) -> &[Vec3] {
        &self.transformed_positions
    }

    pub fn transformed_normals(&self) -> &[Vec3] {
        &self.transformed_normals
    }

    /// Object-space bounds.
    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    /// World-space bounds as of the last `update_transforms`.
    pub fn world_bounds(&self) -> Aabb {
        self.world_bounds
    }

    pub fn material_index(&self) -> usize {
        self.material_index
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// World-space triangle `face`, built from the cached transforms.
    fn world_triangle(&self, face: usize) -> Triangle {
        let tri = &self.indices[face * 3..face * 3 + 3];
        Triangle::with_normal(
            self.transformed_positions[tri[0] as usize],
            self.transformed_positions[tri[1] as usize],
            self.transformed_positions[tri[2] as usize],
            self.transformed_normals[face],
            self.cull_mode,
            self.material_index,
        )
    }
}

impl Hittable for TriangleMesh {
    fn hit(&self, ray: &Ray, rec: &mut HitRecord, query: HitQuery) -> bool {
        if !self.world_bounds.hit(ray) {
            return false;
        }

        // Caches are empty until the first update_transforms
        let faces = self.transformed_normals.len().min(self.triangle_count());

        let mut closest = HitRecord::default();
        for face in 0..faces {
            let triangle = self.world_triangle(face);
            let mut candidate = HitRecord::default();

            if triangle.hit(ray, &mut candidate, query) {
                if query == HitQuery::Any {
                    return true;
                }
                if candidate.t < closest.t {
                    closest = candidate;
                }
            }
        }

        if closest.did_hit {
            *rec = closest;
            true
        } else {
            false
        }
    }
}
