//! Whitted-style direct lighting renderer.
//!
//! One primary ray per pixel, one shadow ray per light, no bounces. The frame
//! is split into horizontal bands of scanlines and each band is rendered on
//! the renderer's own rayon pool.

use std::fmt;
use std::time::Instant;

use glint_math::{colors, Color, ColorExt, Ray};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::camera::ViewPlane;
use crate::scene::Scene;

/// Shadow rays start this far along the normal to avoid self-intersection.
pub const SHADOW_BIAS: f32 = 0.001;

/// Minimum parameter for shadow rays.
pub const SHADOW_RAY_MIN: f32 = 0.0001;

/// Color returned when a primary ray hits nothing.
pub const BACKGROUND: Color = colors::BLACK;

/// Errors that can occur while rendering.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to build render thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Frame buffer is {actual_width}x{actual_height} but the renderer is configured for {width}x{height}")]
    BufferSize {
        width: u32,
        height: u32,
        actual_width: u32,
        actual_height: u32,
    },
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Which part of the lighting equation to visualize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightingMode {
    /// Radiance times BRDF times cosine.
    #[default]
    Combined,
    /// Only the cosine between normal and light, as grey.
    ObservedArea,
    /// Only the incident radiance.
    Radiance,
    /// Only the material's BRDF.
    Brdf,
}

impl LightingMode {
    pub const ALL: [LightingMode; 4] = [
        LightingMode::Combined,
        LightingMode::ObservedArea,
        LightingMode::Radiance,
        LightingMode::Brdf,
    ];

    /// Next mode in the cycle, wrapping back to `Combined`.
    pub fn next(self) -> Self {
        match self {
            LightingMode::Combined => LightingMode::ObservedArea,
            LightingMode::ObservedArea => LightingMode::Radiance,
            LightingMode::Radiance => LightingMode::Brdf,
            LightingMode::Brdf => LightingMode::Combined,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            LightingMode::Combined => "combined",
            LightingMode::ObservedArea => "observed_area",
            LightingMode::Radiance => "radiance",
            LightingMode::Brdf => "brdf",
        }
    }
}

impl fmt::Display for LightingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Half the logical cores, at least one.
pub fn default_thread_count() -> usize {
    (num_cpus::get() / 2).max(1)
}

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub shadows_enabled: bool,
    pub lighting_mode: LightingMode,
    /// Worker threads (also the number of scanline bands)
    pub threads: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            shadows_enabled: true,
            lighting_mode: LightingMode::default(),
            threads: default_thread_count(),
        }
    }
}

impl RenderConfig {
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_shadows(mut self, enabled: bool) -> Self {
        self.shadows_enabled = enabled;
        self
    }

    pub fn with_lighting_mode(mut self, mode: LightingMode) -> Self {
        self.lighting_mode = mode;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }
}

/// Row-major frame of packed `0x00RRGGBB` pixels, row 0 at the top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u32>,
}

impl FrameBuffer {
    /// Create a new buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize],
        }
    }

    /// Get the packed pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> u32 {
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    /// Convert to tightly packed RGB bytes (for saving).
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for &p in &self.pixels {
            bytes.extend_from_slice(&[(p >> 16) as u8, (p >> 8) as u8, p as u8]);
        }
        bytes
    }
}

/// Compute the color seen by a primary ray.
///
/// Sums the contribution of every light visible from the hit point. Channels
/// are left unclamped.
pub fn ray_color(scene: &Scene, ray: &Ray, mode: LightingMode, shadows_enabled: bool) -> Color {
    let hit = scene.get_closest_hit(ray);
    if !hit.did_hit {
        return BACKGROUND;
    }

    let Some(material) = scene.material(hit.material_index) else {
        return BACKGROUND;
    };

    let view_dir = -ray.direction.normalize();
    let shadow_origin = hit.origin + hit.normal * SHADOW_BIAS;
    let mut color = Color::ZERO;

    for light in scene.lights() {
        let (to_light, distance) = light.direction_from(shadow_origin);

        if shadows_enabled {
            let shadow_ray = Ray::with_bounds(shadow_origin, to_light, SHADOW_RAY_MIN, distance);
            if scene.does_hit(&shadow_ray) {
                continue;
            }
        }

        let cos_angle = hit.normal.dot(to_light);
        let (light_dir, _) = light.direction_from(hit.origin);

        match mode {
            LightingMode::ObservedArea => {
                if cos_angle > 0.0 {
                    color += Color::splat(cos_angle);
                }
            }
            LightingMode::Radiance => {
                color += light.radiance(hit.origin);
            }
            LightingMode::Brdf => {
                color += material.shade(&hit, light_dir, view_dir);
            }
            LightingMode::Combined => {
                if cos_angle > 0.0 {
                    color += light.radiance(hit.origin)
                        * material.shade(&hit, light_dir, view_dir)
                        * cos_angle;
                }
            }
        }
    }

    color
}

/// Render a single pixel to its packed value.
pub fn render_pixel(
    scene: &Scene,
    view: &ViewPlane,
    x: u32,
    y: u32,
    mode: LightingMode,
    shadows_enabled: bool,
) -> u32 {
    let ray = view.primary_ray(x, y);
    ray_color(scene, &ray, mode, shadows_enabled).pack_rgb()
}

/// Rows per band when `height` rows are split across `bands` workers.
fn rows_per_band(height: u32, bands: usize) -> usize {
    (height as usize).div_ceil(bands.max(1)).max(1)
}

/// Multithreaded frame renderer.
pub struct Renderer {
    config: RenderConfig,
    pool: rayon::ThreadPool,
}

impl Renderer {
    /// Create a renderer with its own pool of `config.threads` workers.
    pub fn new(config: RenderConfig) -> RenderResult<Self> {
        let threads = config.threads.max(1);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("glint-render-{i}"))
            .build()?;

        log::info!(
            "Renderer ready: {}x{}, {} threads, mode {}, shadows {}",
            config.width,
            config.height,
            threads,
            config.lighting_mode,
            if config.shadows_enabled { "on" } else { "off" }
        );

        Ok(Self {
            config: RenderConfig { threads, ..config },
            pool,
        })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Flip shadow rays on or off. Returns the new state.
    pub fn toggle_shadows(&mut self) -> bool {
        self.config.shadows_enabled = !self.config.shadows_enabled;
        log::info!(
            "Shadows {}",
            if self.config.shadows_enabled { "on" } else { "off" }
        );
        self.config.shadows_enabled
    }

    /// Advance to the next lighting mode. Returns the new mode.
    pub fn cycle_lighting_mode(&mut self) -> LightingMode {
        self.set_lighting_mode(self.config.lighting_mode.next());
        self.config.lighting_mode
    }

    pub fn set_lighting_mode(&mut self, mode: LightingMode) {
        self.config.lighting_mode = mode;
        log::info!("Lighting mode: {}", mode);
    }

    /// A black buffer matching the configured resolution.
    pub fn create_buffer(&self) -> FrameBuffer {
        FrameBuffer::new(self.config.width, self.config.height)
    }

    /// Render one frame into `buffer`.
    ///
    /// The camera basis is refreshed first; the scene is only read while the
    /// workers run. Every pixel is written exactly once.
    pub fn render(&self, scene: &mut Scene, buffer: &mut FrameBuffer) -> RenderResult<()> {
        let (width, height) = (self.config.width, self.config.height);
        if buffer.width != width
            || buffer.height != height
            || buffer.pixels.len() != width as usize * height as usize
        {
            return Err(RenderError::BufferSize {
                width,
                height,
                actual_width: buffer.width,
                actual_height: buffer.height,
            });
        }
        if buffer.pixels.is_empty() {
            return Ok(());
        }

        let view = scene.camera_mut().view_plane(width, height);
        let scene: &Scene = scene;
        let mode = self.config.lighting_mode;
        let shadows = self.config.shadows_enabled;
        let band_rows = rows_per_band(height, self.config.threads);
        let row_len = width as usize;

        let start = Instant::now();
        self.pool.install(|| {
            buffer
                .pixels
                .par_chunks_mut(band_rows * row_len)
                .enumerate()
                .for_each(|(band, pixels)| {
                    let first_row = band * band_rows;
                    for (i, pixel) in pixels.iter_mut().enumerate() {
                        let x = (i % row_len) as u32;
                        let y = (first_row + i / row_len) as u32;
                        *pixel = render_pixel(scene, &view, x, y, mode, shadows);
                    }
                });
        });

        log::debug!(
            "Rendered '{}' ({} mode) in {:.2?}",
            scene.name(),
            mode,
            start.elapsed()
        );
        Ok(())
    }

    /// Render one frame into a fresh buffer.
    pub fn render_frame(&self, scene: &mut Scene) -> RenderResult<FrameBuffer> {
        let mut buffer = self.create_buffer();
        self.render(scene, &mut buffer)?;
        Ok(buffer)
    }
}
