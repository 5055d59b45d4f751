//! OBJ ingestion.
//!
//! Only positions and faces are read. Faces are triangulated by `tobj`
//! (1-based OBJ indices come out 0-based) and every model in the file is
//! merged into one `Mesh`. Normals are always recomputed flat per face.

use std::path::Path;

use glint_math::Vec3;

use crate::mesh::{Mesh, MeshError, MeshResult};

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        single_index: true,
        triangulate: true,
        ..Default::default()
    }
}

/// Load an OBJ file from disk into a single mesh.
pub fn load_obj<P: AsRef<Path>>(path: P) -> MeshResult<Mesh> {
    let path = path.as_ref();
    log::info!("Loading mesh from: {:?}", path);

    let (models, _materials) = tobj::load_obj(path, &load_options())?;
    let mesh = merge_models(&models)?;

    log::info!(
        "Loaded {} vertices, {} triangles from {:?}",
        mesh.vertex_count(),
        mesh.triangle_count(),
        path
    );
    Ok(mesh)
}

/// Parse OBJ text already in memory. `mtllib` references are ignored.
pub fn parse_obj(source: &str) -> MeshResult<Mesh> {
    let mut reader = source.as_bytes();
    let (models, _materials) = tobj::load_obj_buf(&mut reader, &load_options(), |_| {
        Err(tobj::LoadError::OpenFileFailed)
    })?;

    merge_models(&models)
}

fn merge_models(models: &[tobj::Model]) -> MeshResult<Mesh> {
    let mut positions: Vec<Vec3> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();

    for model in models {
        let mesh = &model.mesh;
        if mesh.indices.is_empty() {
            log::warn!("OBJ model '{}' has no faces, skipping", model.name);
            continue;
        }

        let base = positions.len() as u32;
        positions.extend(mesh.positions.chunks_exact(3).map(Vec3::from_slice));
        indices.extend(mesh.indices.iter().map(|&i| base + i));
    }

    if indices.is_empty() {
        return Err(MeshError::Empty);
    }

    Mesh::new(positions, indices)
}
