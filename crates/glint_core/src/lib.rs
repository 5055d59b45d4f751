//! Glint Core - mesh ingestion for the glint ray tracer.
//!
//! This crate provides:
//!
//! - **Mesh**: validated triangle geometry with one flat normal per face
//! - **OBJ loading**: `load_obj` / `parse_obj` built on `tobj`
//!
//! # Example
//!
//! ```ignore
//! use glint_core::load_obj;
//!
//! let mesh = load_obj("lowpoly_bunny.obj")?;
//! println!("Loaded {} triangles", mesh.triangle_count());
//! ```

pub mod mesh;
pub mod obj;

// Re-export commonly used types
pub use mesh::{Mesh, MeshError, MeshResult};
pub use obj::{load_obj, parse_obj};
