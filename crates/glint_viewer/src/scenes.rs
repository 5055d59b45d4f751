//! Built-in demo scenes.

use std::f32::consts::FRAC_PI_2;
use std::path::Path;

use anyhow::{Context, Result};
use glint_core::load_obj;
use glint_math::{colors, Color, Vec3};
use glint_renderer::{Camera, CookTorrance, CullMode, Lambert, Scene, Triangle, TriangleMesh};

use crate::cli::SceneKind;

/// Build the requested scene. `obj` is required for [`SceneKind::Bunny`].
pub fn build(kind: SceneKind, obj: Option<&Path>) -> Result<Scene> {
    let scene = match kind {
        SceneKind::Reference => reference()?,
        SceneKind::Bunny => {
            let path = obj.context("the bunny scene needs --obj <path>")?;
            bunny(path)?
        }
        SceneKind::Plane => plane()?,
    };

    log::info!(
        "Scene '{}': {} spheres, {} planes, {} meshes, {} lights",
        scene.name(),
        scene.spheres().len(),
        scene.planes().len(),
        scene.meshes().len(),
        scene.lights().len()
    );
    Ok(scene)
}

/// Pose the scene at `seconds`: every mesh spins a quarter turn per second.
pub fn animate(scene: &mut Scene, seconds: f32) {
    for mesh in scene.meshes_mut() {
        mesh.rotate_y(FRAC_PI_2 * seconds);
        mesh.update_transforms();
    }
}

/// Materials shared by the room scenes.
struct RoomMaterials {
    gray_blue: usize,
    white: usize,
}

/// Camera, five walls and the three colored lights of the room scenes.
fn room(name: &str) -> Result<(Scene, RoomMaterials)> {
    let mut scene = Scene::new(name);
    *scene.camera_mut() = Camera::new(Vec3::new(0.0, 3.0, -9.0), 45.0);

    let materials = RoomMaterials {
        gray_blue: scene.add_material(Lambert::new(Color::new(0.49, 0.57, 0.57), 1.0)),
        white: scene.add_material(Lambert::new(colors::WHITE, 1.0)),
    };

    let walls = [
        (Vec3::new(0.0, 0.0, 10.0), -Vec3::Z), // back
        (Vec3::ZERO, Vec3::Y),                 // floor
        (Vec3::new(0.0, 10.0, 0.0), -Vec3::Y), // ceiling
        (Vec3::new(5.0, 0.0, 0.0), -Vec3::X),  // right
        (Vec3::new(-5.0, 0.0, 0.0), Vec3::X),  // left
    ];
    for (origin, normal) in walls {
        scene.add_plane(origin, normal, materials.gray_blue)?;
    }

    scene.add_point_light(Vec3::new(0.0, 5.0, 5.0), 50.0, Color::new(1.0, 0.61, 0.45));
    scene.add_point_light(Vec3::new(-2.5, 5.0, -5.0), 70.0, Color::new(1.0, 0.8, 0.45));
    scene.add_point_light(Vec3::new(2.5, 2.5, -5.0), 50.0, Color::new(0.34, 0.47, 0.68));

    Ok((scene, materials))
}

fn reference() -> Result<Scene> {
    let (mut scene, materials) = room("Reference Scene")?;

    let metal = Color::new(0.972, 0.960, 0.915);
    let plastic = Color::splat(0.75);
    let roughness = [1.0, 0.6, 0.1];
    let columns = [-1.75, 0.0, 1.75];

    // Metals on the bottom row, plastics above, rough to smooth left to right
    for (row, (albedo, metalness)) in [(metal, 1.0), (plastic, 0.0)].into_iter().enumerate() {
        for (x, r) in columns.into_iter().zip(roughness) {
            let material = scene.add_material(CookTorrance::new(albedo, metalness, r));
            scene.add_sphere(Vec3::new(x, 1.0 + 2.0 * row as f32, 0.0), 0.75, material)?;
        }
    }

    // Clockwise winding
    let base = Triangle::new(
        Vec3::new(-0.75, 1.5, 0.0),
        Vec3::new(0.75, 0.0, 0.0),
        Vec3::new(-0.75, 0.0, 0.0),
        CullMode::Disabled,
        materials.white,
    );
    let culled = [
        (CullMode::BackFace, -1.75),
        (CullMode::FrontFace, 0.0),
        (CullMode::Disabled, 1.75),
    ];
    for (cull_mode, x) in culled {
        let mut mesh = TriangleMesh::new(cull_mode, materials.white);
        mesh.append_triangle(&base, true);
        mesh.translate(Vec3::new(x, 4.5, 0.0));
        mesh.update_aabb();
        mesh.update_transforms();
        scene.add_triangle_mesh(mesh)?;
    }

    Ok(scene)
}

fn bunny(path: &Path) -> Result<Scene> {
    let (mut scene, materials) = room("Bunny Scene")?;

    let geometry =
        load_obj(path).with_context(|| format!("Failed to load mesh {}", path.display()))?;
    let mut mesh = TriangleMesh::from_mesh(&geometry, CullMode::BackFace, materials.white);
    mesh.scale(Vec3::splat(2.0));
    mesh.update_transforms();
    scene.add_triangle_mesh(mesh)?;

    Ok(scene)
}

fn plane() -> Result<Scene> {
    let mut scene = Scene::new("Plane Scene");
    scene.camera_mut().origin = Vec3::new(0.0, 3.0, -9.0);
    scene.camera_mut().look_at(Vec3::new(0.0, 1.0, 0.0));

    let floor = scene.add_material(Lambert::new(colors::WHITE, 1.0));
    let ball = scene.add_material(CookTorrance::new(Color::new(0.9, 0.3, 0.2), 0.0, 0.4));

    scene.add_plane(Vec3::ZERO, Vec3::Y, floor)?;
    scene.add_sphere(Vec3::new(0.0, 1.0, 0.0), 1.0, ball)?;
    scene.add_point_light(Vec3::new(0.0, 5.0, 0.0), 50.0, colors::WHITE);
    scene.add_directional_light(Vec3::new(-1.0, -1.0, 1.0), 0.5, Color::new(0.6, 0.7, 1.0));

    Ok(scene)
}
