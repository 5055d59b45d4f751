//! glint renderer - CPU Whitted-style ray tracing
//!
//! Direct lighting only: one primary ray per pixel, a shadow ray per light,
//! and a choice of which lighting term to show. Frames are rendered in
//! parallel scanline bands.

pub mod brdf;
mod camera;
mod hittable;
mod light;
mod material;
mod plane;
mod renderer;
mod scene;
mod sphere;
mod triangle;
mod triangle_mesh;

pub use camera::{Camera, ViewPlane};
pub use hittable::{HitQuery, HitRecord, Hittable};
pub use light::Light;
pub use material::{CookTorrance, Lambert, LambertPhong, Material, SolidColor};
pub use plane::Plane;
pub use renderer::{
    default_thread_count, ray_color, render_pixel, FrameBuffer, LightingMode, RenderConfig,
    RenderError, RenderResult, Renderer, BACKGROUND, SHADOW_BIAS, SHADOW_RAY_MIN,
};
pub use scene::{Scene, SceneError, SceneResult};
pub use sphere::Sphere;
pub use triangle::{CullMode, Triangle};
pub use triangle_mesh::TriangleMesh;

/// Re-export Vec3 and common math types from glint_math
pub use glint_math::{colors, Color, ColorExt, Ray, Vec3};
