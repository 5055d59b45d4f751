//! Pinhole camera for primary ray generation.
//!
//! Left-handed, y-up: the camera looks down its local +Z with +X to the right.

use glint_math::{Mat4, Mat4Ext, Ray, Vec3};

/// Keeps `forward` off the world up axis, where the basis is undefined.
const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

const MIN_FOV: f32 = 0.0;
const MAX_FOV: f32 = 180.0;

/// Camera for generating rays into the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub origin: Vec3,
    /// Full vertical field of view in degrees
    pub fov_angle: f32,

    forward: Vec3,
    up: Vec3,
    right: Vec3,

    total_pitch: f32,
    total_yaw: f32,
}

impl Camera {
    pub fn new(origin: Vec3, fov_angle: f32) -> Self {
        Self {
            origin,
            fov_angle,
            forward: Vec3::Z,
            up: Vec3::Y,
            right: Vec3::X,
            total_pitch: 0.0,
            total_yaw: 0.0,
        }
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    /// Rebuild the orthonormal basis from `forward` and return the
    /// camera-to-world matrix (columns right, up, forward, origin).
    pub fn calculate_camera_to_world(&mut self) -> Mat4 {
        self.right = Vec3::Y.cross(self.forward).normalize();
        self.up = self.forward.cross(self.right);

        Mat4::from_basis(self.right, self.up, self.forward, self.origin)
    }

    /// Widen (positive) or narrow (negative) the field of view, clamped to
    /// [0, 180] degrees.
    pub fn zoom(&mut self, delta_degrees: f32) {
        self.fov_angle = (self.fov_angle + delta_degrees).clamp(MIN_FOV, MAX_FOV);
    }

    /// Accumulate pitch (about right) and yaw (about +Y), both in radians,
    /// and re-derive `forward`.
    pub fn rotate(&mut self, delta_pitch: f32, delta_yaw: f32) {
        self.total_pitch = (self.total_pitch + delta_pitch).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.total_yaw += delta_yaw;
        self.update_forward();
    }

    /// Point the camera at `target`.
    pub fn look_at(&mut self, target: Vec3) {
        let dir = (target - self.origin).normalize();
        self.total_pitch = (-dir.y).asin().clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.total_yaw = dir.x.atan2(dir.z);
        self.update_forward();
    }

    /// Move along the camera's own axes: x right, y up, z forward.
    pub fn translate_local(&mut self, movement: Vec3) {
        let camera_to_world = self.calculate_camera_to_world();
        self.origin += camera_to_world.transform_vector3(movement);
    }

    /// Freeze the camera into a ray generator for a `width` x `height` image.
    pub fn view_plane(&mut self, width: u32, height: u32) -> ViewPlane {
        let camera_to_world = self.calculate_camera_to_world();

        ViewPlane {
            camera_to_world,
            origin: self.origin,
            fov_scale: (self.fov_angle.to_radians() / 2.0).tan(),
            aspect_ratio: width as f32 / height as f32,
            width: width as f32,
            height: height as f32,
        }
    }

    fn update_forward(&mut self) {
        let rotation = Mat4::from_rotation_y(self.total_yaw) * Mat4::from_rotation_x(self.total_pitch);
        self.forward = rotation.transform_vector3(Vec3::Z).normalize();
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO, 90.0)
    }
}

/// Per-frame ray generator. Cheap to copy into worker threads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewPlane {
    camera_to_world: Mat4,
    origin: Vec3,
    fov_scale: f32,
    aspect_ratio: f32,
    width: f32,
    height: f32,
}

impl ViewPlane {
    /// Ray through the centre of pixel (`px`, `py`), row 0 at the top.
    ///
    /// The direction is not normalized; its local z component is 1.
    pub fn primary_ray(&self, px: u32, py: u32) -> Ray {
        let cx = (2.0 * (px as f32 + 0.5) / self.width - 1.0) * self.aspect_ratio * self.fov_scale;
        let cy = (1.0 - 2.0 * (py as f32 + 0.5) / self.height) * self.fov_scale;

        let direction = self.camera_to_world.transform_vector3(Vec3::new(cx, cy, 1.0));
        Ray::new(self.origin, direction)
    }
}
