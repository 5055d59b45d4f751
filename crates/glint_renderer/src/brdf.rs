//! Reflectance functions.
//!
//! Lambertian diffuse, Phong, and the pieces of the Cook-Torrance microfacet
//! model (Fresnel-Schlick, GGX distribution, Schlick-GGX/Smith geometry).
//! Roughness follows the Disney/UE4 remapping `alpha = roughness^2`.
//!
//! All direction arguments are unit vectors pointing away from the surface.
//! Cosines are clamped to zero so no term ever contributes negative light.

use glint_math::{Color, Vec3};
use std::f32::consts::PI;

/// Lambertian diffuse with a scalar coefficient: `kd * cd / pi`.
#[inline]
pub fn lambert(kd: f32, cd: Color) -> Color {
    kd * cd / PI
}

/// Lambertian diffuse with a per-channel coefficient.
#[inline]
pub fn lambert_rgb(kd: Color, cd: Color) -> Color {
    kd * cd / PI
}

/// Phong specular lobe.
///
/// - `ks`: specular reflection coefficient
/// - `exp`: Phong exponent
/// - `l`: direction to the light
/// - `v`: direction to the viewer
/// - `n`: surface normal
pub fn phong(ks: f32, exp: f32, l: Vec3, v: Vec3, n: Vec3) -> Color {
    let r = reflect(l, n);
    let cos_alpha = r.dot(v).max(0.0);
    Color::splat(ks * cos_alpha.powf(exp))
}

/// Fresnel reflectance, Schlick's approximation.
///
/// `f0` is the reflectance at normal incidence: about 0.04 for dielectrics,
/// the albedo for conductors.
pub fn fresnel_schlick(h: Vec3, v: Vec3, f0: Color) -> Color {
    let cos_theta = h.dot(v).max(0.0);
    f0 + (Color::ONE - f0) * (1.0 - cos_theta).powi(5)
}

/// Trowbridge-Reitz GGX normal distribution.
pub fn normal_distribution_ggx(n: Vec3, h: Vec3, roughness: f32) -> f32 {
    let alpha = roughness * roughness;
    let alpha2 = alpha * alpha;
    let n_dot_h = n.dot(h).max(0.0);

    let denom = n_dot_h * n_dot_h * (alpha2 - 1.0) + 1.0;
    alpha2 / (PI * denom * denom)
}

/// Schlick-GGX geometry term for a single direction (direct lighting `k`).
pub fn geometry_schlick_ggx(n: Vec3, v: Vec3, roughness: f32) -> f32 {
    let alpha = roughness * roughness;
    let k = (alpha + 1.0) * (alpha + 1.0) / 8.0;
    let n_dot_v = n.dot(v).max(0.0);

    n_dot_v / (n_dot_v * (1.0 - k) + k)
}

/// Smith geometry term: masking (view) times shadowing (light).
pub fn geometry_smith(n: Vec3, v: Vec3, l: Vec3, roughness: f32) -> f32 {
    geometry_schlick_ggx(n, v, roughness) * geometry_schlick_ggx(n, l, roughness)
}

/// Mirror `l` about `n`. Both point away from the surface, as does the result.
#[inline]
pub fn reflect(l: Vec3, n: Vec3) -> Vec3 {
    2.0 * l.dot(n) * n - l
}
