//! Triangle mesh geometry as delivered by ingestion.
//!
//! A `Mesh` is object-space data only: positions, a flat index buffer and one
//! normal per triangle. Placing it in the world (transforms, world-space
//! caches) is the renderer's job.

use glint_math::{Aabb, Vec3};
use thiserror::Error;

/// Cross products shorter than this are treated as zero-area faces.
const DEGENERATE_EPSILON: f32 = 1e-12;

/// Errors that can occur while building a mesh.
#[derive(Error, Debug)]
pub enum MeshError {
    #[error("Index buffer length {0} is not a multiple of 3")]
    IndexCount(usize),

    #[error("Face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        face: usize,
        index: u32,
        vertex_count: usize,
    },

    #[error("Face {face} is degenerate (zero area)")]
    DegenerateFace { face: usize },

    #[error("OBJ error: {0}")]
    Obj(#[from] tobj::LoadError),

    #[error("OBJ file contains no faces")]
    Empty,
}

/// Result type for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;

/// A validated triangle mesh.
///
/// Invariants, checked by `Mesh::new`:
/// - `indices.len() % 3 == 0`
/// - every index is a valid position index
/// - `normals.len() == indices.len() / 3`, all unit length
#[derive(Clone, Debug)]
pub struct Mesh {
    positions: Vec<Vec3>,
    indices: Vec<u32>,
    normals: Vec<Vec3>,
    bounds: Aabb,
}

impl Mesh {
    /// Build a mesh from positions and a triangle index buffer.
    ///
    /// Computes one flat normal per triangle, `normalize(cross(v1 - v0, v2 - v0))`.
    /// Zero-area faces are rejected rather than given a NaN normal.
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>) -> MeshResult<Self> {
        if indices.len() % 3 != 0 {
            return Err(MeshError::IndexCount(indices.len()));
        }

        let vertex_count = positions.len();
        let mut normals = Vec::with_capacity(indices.len() / 3);

        for (face, tri) in indices.chunks_exact(3).enumerate() {
            if let Some(&index) = tri.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(MeshError::IndexOutOfRange {
                    face,
                    index,
                    vertex_count,
                });
            }

            let p0 = positions[tri[0] as usize];
            let p1 = positions[tri[1] as usize];
            let p2 = positions[tri[2] as usize];

            let cross = (p1 - p0).cross(p2 - p0);
            let length = cross.length();

            if length.is_nan() || length <= DEGENERATE_EPSILON {
                return Err(MeshError::DegenerateFace { face });
            }

            normals.push(cross / length);
        }

        let bounds = Aabb::from_point_cloud(&positions);

        Ok(Self {
            positions,
            indices,
            normals,
            bounds,
        })
    }

    /// Object-space vertex positions.
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Triangle indices (every 3 indices form a triangle).
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// One unit normal per triangle.
    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    /// Object-space bounding box.
    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    /// Get the number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Get the number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Scale positions uniformly in place. Normals are unaffected.
    pub fn scale(&mut self, factor: f32) {
        for p in &mut self.positions {
            *p *= factor;
        }
        self.bounds = Aabb::from_point_cloud(&self.positions);
    }
}
