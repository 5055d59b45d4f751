// Re-export glam for convenience
pub use glam::*;

// Glint math types
mod aabb;
mod color;
mod interval;
mod ray;
mod transform;

pub use aabb::Aabb;
pub use color::{colors, Color, ColorExt};
pub use interval::Interval;
pub use ray::Ray;
pub use transform::{Mat4Ext, VectorExt};
