//! Surface materials.
//!
//! A material answers one question: how much light arriving from `l` leaves
//! towards `v` at a hit point. Lights, visibility and cosine weighting are the
//! renderer's business.

use glint_math::{colors, Color, Vec3};

use crate::brdf;
use crate::hittable::HitRecord;

/// Reflectance at normal incidence for dielectrics.
const DIELECTRIC_F0: Color = Color::splat(0.04);

/// Cosines below this skip the specular term to avoid dividing by ~0.
const GRAZING_EPSILON: f32 = 1e-4;

/// Smallest roughness accepted by `CookTorrance`; zero makes GGX singular.
const MIN_ROUGHNESS: f32 = 1e-3;

/// Trait for materials that describe how light interacts with surfaces.
pub trait Material: Send + Sync {
    /// Reflected color for light arriving from `light_dir` and leaving towards
    /// `view_dir`. Both are unit vectors pointing away from the surface.
    fn shade(&self, hit: &HitRecord, light_dir: Vec3, view_dir: Vec3) -> Color;
}

/// Constant color, ignores lighting geometry.
#[derive(Debug, Clone, Copy)]
pub struct SolidColor {
    color: Color,
}

impl SolidColor {
    pub fn new(color: Color) -> Self {
        Self { color }
    }

    /// The color without any light information.
    pub fn shade_unlit(&self) -> Color {
        self.color
    }
}

impl Default for SolidColor {
    fn default() -> Self {
        Self::new(colors::RED)
    }
}

impl Material for SolidColor {
    fn shade(&self, _hit: &HitRecord, _light_dir: Vec3, _view_dir: Vec3) -> Color {
        self.color
    }
}

/// Lambertian (diffuse) material.
#[derive(Debug, Clone, Copy)]
pub struct Lambert {
    diffuse_color: Color,
    diffuse_reflectance: f32,
}

impl Lambert {
    /// Create a new Lambert material with the given color and reflectance `kd`.
    pub fn new(diffuse_color: Color, diffuse_reflectance: f32) -> Self {
        Self {
            diffuse_color,
            diffuse_reflectance,
        }
    }
}

impl Material for Lambert {
    fn shade(&self, _hit: &HitRecord, _light_dir: Vec3, _view_dir: Vec3) -> Color {
        brdf::lambert(self.diffuse_reflectance, self.diffuse_color)
    }
}

/// Lambert diffuse plus a Phong highlight.
#[derive(Debug, Clone, Copy)]
pub struct LambertPhong {
    diffuse_color: Color,
    diffuse_reflectance: f32,
    specular_reflectance: f32,
    phong_exponent: f32,
}

impl LambertPhong {
    pub fn new(diffuse_color: Color, kd: f32, ks: f32, phong_exponent: f32) -> Self {
        Self {
            diffuse_color,
            diffuse_reflectance: kd,
            specular_reflectance: ks,
            phong_exponent,
        }
    }
}

impl Material for LambertPhong {
    fn shade(&self, hit: &HitRecord, light_dir: Vec3, view_dir: Vec3) -> Color {
        brdf::lambert(self.diffuse_reflectance, self.diffuse_color)
            + brdf::phong(
                self.specular_reflectance,
                self.phong_exponent,
                light_dir,
                view_dir,
                hit.normal,
            )
    }
}

/// Cook-Torrance microfacet material with a metalness workflow.
#[derive(Debug, Clone, Copy)]
pub struct CookTorrance {
    albedo: Color,
    metalness: f32,
    roughness: f32,
}

impl CookTorrance {
    /// `metalness` is clamped to [0, 1], `roughness` to (0, 1].
    pub fn new(albedo: Color, metalness: f32, roughness: f32) -> Self {
        Self {
            albedo,
            metalness: metalness.clamp(0.0, 1.0),
            roughness: roughness.clamp(MIN_ROUGHNESS, 1.0),
        }
    }

    pub fn metalness(&self) -> f32 {
        self.metalness
    }

    pub fn roughness(&self) -> f32 {
        self.roughness
    }
}

impl Material for CookTorrance {
    fn shade(&self, hit: &HitRecord, light_dir: Vec3, view_dir: Vec3) -> Color {
        let n = hit.normal;
        let f0 = DIELECTRIC_F0.lerp(self.albedo, self.metalness);
        let h = (view_dir + light_dir).normalize_or_zero();

        let ks = brdf::fresnel_schlick(h, view_dir, f0);
        let kd = (Color::ONE - ks) * (1.0 - self.metalness);
        let diffuse = brdf::lambert_rgb(kd, self.albedo);

        let n_dot_v = n.dot(view_dir);
        let n_dot_l = n.dot(light_dir);
        if n_dot_v <= GRAZING_EPSILON || n_dot_l <= GRAZING_EPSILON {
            return diffuse;
        }

        let d = brdf::normal_distribution_ggx(n, h, self.roughness);
        let g = brdf::geometry_smith(n, view_dir, light_dir, self.roughness);
        let specular = ks * (d * g / (4.0 * n_dot_v * n_dot_l));

        diffuse + specular
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn hit_facing_up() -> HitRecord {
        HitRecord {
            normal: Vec3::Y,
            did_hit: true,
            t: 1.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_solid_color() {
        let material = SolidColor::new(colors::BLUE);
        let hit = hit_facing_up();

        assert_eq!(material.shade_unlit(), colors::BLUE);
        assert_eq!(material.shade(&hit, Vec3::X, -Vec3::Y), colors::BLUE);
        assert_eq!(SolidColor::default().shade_unlit(), colors::RED);
    }

    #[test]
    fn test_lambert_is_view_independent() {
        let material = Lambert::new(colors::WHITE, 1.0);
        let hit = hit_facing_up();
        let l = Vec3::new(1.0, 1.0, 0.0).normalize();

        let a = material.shade(&hit, l, Vec3::Y);
        let b = material.shade(&hit, l, Vec3::new(0.0, 1.0, 1.0).normalize());
        assert_eq!(a, b);
        assert!((a - Color::splat(1.0 / PI)).length() < 1e-6);
    }

    #[test]
    fn test_lambert_phong_adds_highlight() {
        let plain = Lambert::new(colors::WHITE, 0.5);
        let shiny = LambertPhong::new(colors::WHITE, 0.5, 0.5, 20.0);
        let hit = hit_facing_up();
        let l = Vec3::new(1.0, 1.0, 0.0).normalize();
        let mirror = Vec3::new(-1.0, 1.0, 0.0).normalize();

        let base = plain.shade(&hit, l, mirror);
        let highlighted = shiny.shade(&hit, l, mirror);
        assert!((highlighted - base - Color::splat(0.5)).length() < 1e-5);
    }

    #[test]
    fn test_cook_torrance_clamps_parameters() {
        let material = CookTorrance::new(colors::WHITE, 2.0, 0.0);

        assert_eq!(material.metalness(), 1.0);
        assert!(material.roughness() > 0.0);
    }

    #[test]
    fn test_cook_torrance_metal_has_no_diffuse() {
        let material = CookTorrance::new(Color::new(0.972, 0.960, 0.915), 1.0, 0.6);
        let hit = hit_facing_up();

        // Light below the horizon leaves only the diffuse lobe, which metals lack
        let c = material.shade(&hit, -Vec3::Y, Vec3::Y);
        assert_eq!(c, Color::ZERO);
    }

    #[test]
    fn test_cook_torrance_grazing_keeps_diffuse() {
        let material = CookTorrance::new(Color::splat(0.75), 0.0, 0.6);
        let hit = hit_facing_up();

        let c = material.shade(&hit, Vec3::X, Vec3::Y);
        assert!(c.is_finite());
        assert!(c.min_element() > 0.0);
    }

    #[test]
    fn test_cook_torrance_is_finite_and_positive() {
        let hit = hit_facing_up();
        let l = Vec3::new(0.3, 1.0, 0.2).normalize();
        let v = Vec3::new(-0.4, 1.0, 0.1).normalize();

        for metalness in [0.0, 1.0] {
            for roughness in [0.1, 0.6, 1.0] {
                let material = CookTorrance::new(Color::splat(0.75), metalness, roughness);
                let c = material.shade(&hit, l, v);

                assert!(c.is_finite());
                assert!(c.min_element() >= 0.0);
            }
        }
    }

    #[test]
    fn test_cook_torrance_smoother_is_sharper_at_mirror() {
        let hit = hit_facing_up();
        let l = Vec3::new(1.0, 1.0, 0.0).normalize();
        let mirror = Vec3::new(-1.0, 1.0, 0.0).normalize();

        let smooth = CookTorrance::new(colors::WHITE, 1.0, 0.1).shade(&hit, l, mirror);
        let rough = CookTorrance::new(colors::WHITE, 1.0, 1.0).shade(&hit, l, mirror);
        assert!(smooth.x > rough.x);
    }
}
