//! Scene container: geometry, materials, lights and the camera.
//!
//! Geometry lives in one list per primitive kind. Objects refer to materials by
//! index into the scene's material table, which always has the default
//! material at index 0.

use glint_math::{colors, Color, Ray, Vec3};
use thiserror::Error;

use crate::camera::Camera;
use crate::hittable::{HitQuery, HitRecord, Hittable};
use crate::light::Light;
use crate::material::{Material, SolidColor};
use crate::plane::Plane;
use crate::sphere::Sphere;
use crate::triangle_mesh::TriangleMesh;

/// Errors that can occur while building a scene.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SceneError {
    #[error("Material index {index} is out of range ({count} materials)")]
    UnknownMaterial { index: usize, count: usize },
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;

pub struct Scene {
    name: String,
    camera: Camera,
    materials: Vec<Box<dyn Material>>,
    spheres: Vec<Sphere>,
    planes: Vec<Plane>,
    meshes: Vec<TriangleMesh>,
    lights: Vec<Light>,
}

impl Scene {
    /// An empty scene with the default material (solid red) at index 0.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            camera: Camera::default(),
            materials: vec![Box::new(SolidColor::new(colors::RED))],
            spheres: Vec::new(),
            planes: Vec::new(),
            meshes: Vec::new(),
            lights: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Append a material and return its index.
    pub fn add_material<M: Material + 'static>(&mut self, material: M) -> usize {
        self.materials.push(Box::new(material));
        self.materials.len() - 1
    }

    pub fn add_sphere(
        &mut self,
        origin: Vec3,
        radius: f32,
        material_index: usize,
    ) -> SceneResult<usize> {
        self.check_material(material_index)?;
        self.spheres.push(Sphere::new(origin, radius, material_index));
        Ok(self.spheres.len() - 1)
    }

    pub fn add_plane(
        &mut self,
        origin: Vec3,
        normal: Vec3,
        material_index: usize,
    ) -> SceneResult<usize> {
        self.check_material(material_index)?;
        self.planes.push(Plane::new(origin, normal, material_index));
        Ok(self.planes.len() - 1)
    }

    /// Add a mesh and return its index for [`Scene::mesh_mut`].
    pub fn add_triangle_mesh(&mut self, mesh: TriangleMesh) -> SceneResult<usize> {
        self.check_material(mesh.material_index())?;
        self.meshes.push(mesh);
        Ok(self.meshes.len() - 1)
    }

    pub fn add_point_light(&mut self, origin: Vec3, intensity: f32, color: Color) -> usize {
        self.lights.push(Light::point(origin, intensity, color));
        self.lights.len() - 1
    }

    pub fn add_directional_light(&mut self, direction: Vec3, intensity: f32, color: Color) -> usize {
        self.lights.push(Light::directional(direction, intensity, color));
        self.lights.len() - 1
    }

    fn check_material(&self, index: usize) -> SceneResult<()> {
        if index < self.materials.len() {
            Ok(())
        } else {
            Err(SceneError::UnknownMaterial {
                index,
                count: self.materials.len(),
            })
        }
    }

    pub fn material(&self, index: usize) -> Option<&dyn Material> {
        self.materials.get(index).map(|m| m.as_ref())
    }

    pub fn materials(&self) -> &[Box<dyn Material>] {
        &self.materials
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }

    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }

    pub fn meshes(&self) -> &[TriangleMesh] {
        &self.meshes
    }

    /// Mutable access for transforming a mesh. Call
    /// [`TriangleMesh::update_transforms`] afterwards.
    pub fn mesh_mut(&mut self, index: usize) -> Option<&mut TriangleMesh> {
        self.meshes.get_mut(index)
    }

    pub fn meshes_mut(&mut self) -> &mut [TriangleMesh] {
        &mut self.meshes
    }

    /// Nearest intersection along `ray` across every object.
    ///
    /// Returns a record with `did_hit == false` when nothing is hit. Ties on
    /// `t` keep the first object found (spheres, then planes, then meshes).
    pub fn get_closest_hit(&self, ray: &Ray) -> HitRecord {
        let mut closest = HitRecord::default();

        closest_in(&self.spheres, ray, &mut closest);
        closest_in(&self.planes, ray, &mut closest);
        closest_in(&self.meshes, ray, &mut closest);

        closest
    }

    /// Whether anything blocks `ray`. Stops at the first hit.
    pub fn does_hit(&self, ray: &Ray) -> bool {
        self.spheres.iter().any(|s| s.occludes(ray))
            || self.planes.iter().any(|p| p.occludes(ray))
            || self.meshes.iter().any(|m| m.occludes(ray))
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new("untitled")
    }
}

fn closest_in<H: Hittable>(objects: &[H], ray: &Ray, closest: &mut HitRecord) {
    for object in objects {
        let mut rec = HitRecord::default();
        if object.hit(ray, &mut rec, HitQuery::Closest) && rec.t < closest.t {
            *closest = rec;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambert;
    use crate::triangle::{CullMode, Triangle};
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    #[test]
    fn test_default_material() {
        let scene = Scene::new("empty");

        assert_eq!(scene.materials().len(), 1);
        let hit = HitRecord::default();
        let color = scene.material(0).unwrap().shade(&hit, Vec3::Y, Vec3::Y);
        assert_eq!(color, colors::RED);
    }

    #[test]
    fn test_add_returns_indices() {
        let mut scene = Scene::new("indices");
        let white = scene.add_material(Lambert::new(colors::WHITE, 1.0));

        assert_eq!(white, 1);
        assert_eq!(scene.add_sphere(Vec3::ZERO, 1.0, white), Ok(0));
        assert_eq!(scene.add_sphere(Vec3::X, 1.0, 0), Ok(1));
        assert_eq!(scene.add_plane(Vec3::ZERO, Vec3::Y, white), Ok(0));
        assert_eq!(scene.add_point_light(Vec3::Y, 1.0, Color::ONE), 0);
        assert_eq!(scene.add_directional_light(-Vec3::Y, 1.0, Color::ONE), 1);
    }

    #[test]
    fn test_unknown_material_is_rejected() {
        let mut scene = Scene::new("bad");

        let err = scene.add_sphere(Vec3::ZERO, 1.0, 4).unwrap_err();
        assert_eq!(err, SceneError::UnknownMaterial { index: 4, count: 1 });
        assert!(scene.spheres().is_empty());

        let mesh = TriangleMesh::new(CullMode::Disabled, 2);
        assert!(scene.add_triangle_mesh(mesh).is_err());
        assert!(scene.add_plane(Vec3::ZERO, Vec3::Y, 1).is_err());
    }

    #[test]
    fn test_empty_scene_misses() {
        let scene = Scene::new("empty");
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);

        assert!(!scene.get_closest_hit(&ray).did_hit);
        assert!(!scene.does_hit(&ray));
    }

    #[test]
    fn test_closest_across_kinds() {
        let mut scene = Scene::new("kinds");
        scene.add_plane(Vec3::new(0.0, 0.0, 10.0), -Vec3::Z, 0).unwrap();
        scene.add_sphere(Vec3::new(0.0, 0.0, 6.0), 1.0, 0).unwrap();

        let mut mesh = TriangleMesh::new(CullMode::Disabled, 0);
        mesh.append_triangle(
            &Triangle::new(
                Vec3::new(-1.0, 1.0, 3.0),
                Vec3::new(1.0, -1.0, 3.0),
                Vec3::new(-1.0, -1.0, 3.0),
                CullMode::Disabled,
                0,
            ),
            false,
        );
        scene.add_triangle_mesh(mesh).unwrap();

        let hit = scene.get_closest_hit(&Ray::new(Vec3::new(-0.5, -0.5, 0.0), Vec3::Z));
        assert!(hit.did_hit);
        assert!((hit.t - 3.0).abs() < 1e-5);

        // Beside the triangle the sphere is nearest, beside both the plane
        let hit = scene.get_closest_hit(&Ray::new(Vec3::new(0.5, 0.5, 0.0), Vec3::Z));
        assert!(hit.t > 4.0 && hit.t < 6.0);
        let hit = scene.get_closest_hit(&Ray::new(Vec3::new(3.0, 3.0, 0.0), Vec3::Z));
        assert!((hit.t - 10.0).abs() < 1e-5);
    }

    #[derive(Clone, Copy)]
    enum Primitive {
        Sphere(Vec3, f32),
        Plane(Vec3, Vec3),
        Triangle(Vec3, Vec3, Vec3),
    }

    fn add_all(scene: &mut Scene, primitives: &[(Primitive, usize)]) {
        for &(primitive, material) in primitives {
            match primitive {
                Primitive::Sphere(origin, radius) => {
                    scene.add_sphere(origin, radius, material).unwrap();
                }
                Primitive::Plane(origin, normal) => {
                    scene.add_plane(origin, normal, material).unwrap();
                }
                Primitive::Triangle(v0, v1, v2) => {
                    let mut mesh = TriangleMesh::new(CullMode::Disabled, material);
                    mesh.append_triangle(&Triangle::new(v0, v1, v2, CullMode::Disabled, material), false);
                    scene.add_triangle_mesh(mesh).unwrap();
                }
            }
        }
    }

    #[test]
    fn test_closest_hit_ignores_insertion_order() {
        let mut rng = StdRng::seed_from_u64(7);

        let mut primitives = vec![
            (Primitive::Plane(Vec3::new(0.0, 0.0, 20.0), -Vec3::Z), 1),
            (Primitive::Plane(Vec3::new(0.0, -2.0, 0.0), Vec3::Y), 2),
            (
                Primitive::Triangle(
                    Vec3::new(-3.0, 3.0, 9.0),
                    Vec3::new(3.0, -3.0, 9.0),
                    Vec3::new(-3.0, -3.0, 9.0),
                ),
                3,
            ),
        ];
        for i in 0..8 {
            let origin = Vec3::new(-1.5 + 0.4 * i as f32, 0.3 * i as f32 - 1.0, 4.0 + i as f32);
            primitives.push((Primitive::Sphere(origin, 0.6), i % 4));
        }

        let rays: Vec<Ray> = (0..25)
            .map(|i| {
                let x = (i % 5) as f32 * 0.15 - 0.3;
                let y = (i / 5) as f32 * 0.15 - 0.3;
                Ray::new(Vec3::ZERO, Vec3::new(x, y, 1.0).normalize())
            })
            .collect();

        let mut scene = Scene::new("reference");
        for _ in 0..3 {
            scene.add_material(Lambert::new(colors::WHITE, 1.0));
        }
        add_all(&mut scene, &primitives);
        let expected: Vec<HitRecord> = rays.iter().map(|r| scene.get_closest_hit(r)).collect();
        assert!(expected.iter().all(|h| h.did_hit));

        for _ in 0..10 {
            primitives.shuffle(&mut rng);

            let mut scene = Scene::new("shuffled");
            for _ in 0..3 {
                scene.add_material(Lambert::new(colors::WHITE, 1.0));
            }
            add_all(&mut scene, &primitives);

            for (ray, want) in rays.iter().zip(&expected) {
                assert_eq!(scene.get_closest_hit(ray), *want);
            }
        }
    }

    #[test]
    fn test_does_hit_respects_bounds() {
        let mut scene = Scene::new("shadow");
        scene.add_sphere(Vec3::new(0.0, 0.0, 5.0), 1.0, 0).unwrap();

        let blocked = Ray::with_bounds(Vec3::ZERO, Vec3::Z, 0.0001, 10.0);
        let short = Ray::with_bounds(Vec3::ZERO, Vec3::Z, 0.0001, 3.0);
        assert!(scene.does_hit(&blocked));
        assert!(!scene.does_hit(&short));
    }

    #[test]
    fn test_mesh_mut() {
        let mut scene = Scene::new("meshes");
        let mut mesh = TriangleMesh::new(CullMode::Disabled, 0);
        mesh.append_triangle(
            &Triangle::new(
                Vec3::new(-1.0, 1.0, 3.0),
                Vec3::new(1.0, -1.0, 3.0),
                Vec3::new(-1.0, -1.0, 3.0),
                CullMode::Disabled,
                0,
            ),
            false,
        );
        let index = scene.add_triangle_mesh(mesh).unwrap();

        let ray = Ray::new(Vec3::new(-0.5, -0.5, 0.0), Vec3::Z);
        assert!(scene.does_hit(&ray));

        let mesh = scene.mesh_mut(index).unwrap();
        mesh.translate(Vec3::new(0.0, 100.0, 0.0));
        mesh.update_transforms();
        assert!(!scene.does_hit(&ray));

        assert!(scene.mesh_mut(9).is_none());
        assert_eq!(scene.meshes_mut().len(), 1);
    }

    #[test]
    fn test_mesh_material_survives_edits() {
        let mut scene = Scene::new("meshes");
        let white = scene.add_material(Lambert::new(colors::WHITE, 1.0));
        let mut mesh = TriangleMesh::new(CullMode::Disabled, white);
        mesh.append_triangle(
            &Triangle::new(
                Vec3::new(-1.0, 1.0, 3.0),
                Vec3::new(1.0, -1.0, 3.0),
                Vec3::new(-1.0, -1.0, 3.0),
                CullMode::Disabled,
                white,
            ),
            false,
        );
        let index = scene.add_triangle_mesh(mesh).unwrap();

        let mesh = scene.mesh_mut(index).unwrap();
        mesh.scale(Vec3::splat(2.0));
        mesh.update_transforms();
        assert_eq!(mesh.material_index(), white);

        let hit = scene.get_closest_hit(&Ray::new(Vec3::new(-0.5, -0.5, 0.0), Vec3::Z));
        assert!(hit.did_hit);
        assert_eq!(hit.material_index, white);
        assert!(scene.material(hit.material_index).is_some());
    }
}
