//! Headless CPU renderer: ray-cast, displace, shade, tone map, encode.

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use glam::{Vec2, Vec3};
use image::{Rgb, RgbImage};
use log::{debug, info, warn};
use rayon::prelude::*;
use rayon::ThreadPool;

use crate::camera::CameraSystem;
use crate::error::Result;
use crate::ocean::{displacement, Frame, OceanSystem};
use crate::params::{linear_to_srgb, DerivedArrays, RecordingConfig, RenderConfig};
use crate::shading::{EnvironmentMap, FoamNoise, SurfaceShader};

/// Fixed-point passes that undo horizontal displacement when locating the
/// rest position under a ray hit
const REST_SEARCH_ITERATIONS: usize = 3;

/// Renders ocean frames into 8-bit sRGB images
pub struct HeadlessRenderer {
    config: RenderConfig,
    camera: CameraSystem,
    noise: FoamNoise,
    environment: Option<Box<dyn EnvironmentMap>>,
    warned_missing_environment: AtomicBool,
    pool: ThreadPool,
}

impl HeadlessRenderer {
    /// Create a renderer with its own shading thread pool
    ///
    /// `config.threads == 0` sizes the pool to the available cores.
    pub fn new(config: RenderConfig, camera: CameraSystem, noise: FoamNoise) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .thread_name(|index| format!("wavefield-shade-{}", index))
            .build()?;
        debug!("Shading pool with {} threads", pool.current_num_threads());

        Ok(Self {
            config,
            camera,
            noise,
            environment: None,
            warned_missing_environment: AtomicBool::new(false),
            pool,
        })
    }

    /// Bind an environment map for Fresnel reflections
    pub fn with_environment(mut self, environment: Box<dyn EnvironmentMap>) -> Self {
        self.environment = Some(environment);
        self
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn camera(&self) -> &CameraSystem {
        &self.camera
    }

    /// Render one frame
    ///
    /// Each pixel casts a camera ray onto the mean sea plane. Rays that miss
    /// the plane or reach it beyond the far plane see the fog color.
    pub fn render(&self, frame: &Frame) -> RgbImage {
        let width = self.config.width.max(1);
        let height = self.config.height.max(1);
        let inv_view_proj = self.camera.view_proj(self.config.aspect_ratio()).inverse();

        let environment = self.environment.as_deref();
        if environment.is_none() && !self.warned_missing_environment.swap(true, Ordering::Relaxed)
        {
            warn!("No environment map bound, reflections use a neutral color");
        }

        let shader = SurfaceShader::new(&frame.shading, &self.noise, environment);
        let eye = self.camera.position();
        let far = self.camera.config().far_plane_m;
        let exposure = self.config.exposure;
        let background = encode_pixel(frame.shading.fog_color, exposure);

        let mut pixels = vec![background; pixel_count(width, height)];
        let row_len = width as usize;

        self.pool.install(|| {
            pixels
                .par_chunks_mut(row_len)
                .enumerate()
                .for_each(|(row, row_pixels)| {
                    let ndc_y = 1.0 - (row as f32 + 0.5) / height as f32 * 2.0;

                    for (column, pixel) in row_pixels.iter_mut().enumerate() {
                        let ndc_x = (column as f32 + 0.5) / width as f32 * 2.0 - 1.0;
                        let (origin, direction) =
                            self.camera.unproject_ray(&inv_view_proj, ndc_x, ndc_y);

                        let Some(hit) = intersect_sea_plane(origin, direction, far) else {
                            continue;
                        };

                        let rest = rest_position_under(&frame.waves, hit, frame.time_s);
                        let point = displacement::evaluate(&frame.waves, rest, frame.time_s);
                        let color = shader.shade(&point, eye, frame.time_s);
                        *pixel = encode_pixel(color, exposure);
                    }
                });
        });

        let mut image = RgbImage::new(width, height);
        for (dst, src) in image.pixels_mut().zip(pixels) {
            *dst = src;
        }

        debug!("Rendered {}x{} frame at t={:.3}s", width, height, frame.time_s);
        image
    }

    /// Render one frame and write it as PNG
    pub fn render_to_file(&self, frame: &Frame, path: &Path) -> Result<()> {
        let image = self.render(frame);
        image.save(path)?;
        info!("Saved {}", path.display());
        Ok(())
    }

    /// Render a numbered PNG sequence, snapshotting the ocean each frame
    ///
    /// # Returns
    /// Number of frames written
    pub fn record(&self, ocean: &OceanSystem, recording: &RecordingConfig) -> Result<usize> {
        fs::create_dir_all(&recording.output_dir)?;

        let total = recording.total_frames();
        info!(
            "Recording {} frames at {} fps into {}",
            total,
            recording.fps,
            recording.output_dir.display()
        );

        for frame_num in 0..total {
            let frame = ocean.frame(recording.frame_time(frame_num));
            self.render(&frame).save(recording.frame_path(frame_num))?;

            if frame_num % recording.fps.max(1) as usize == 0 {
                info!("Frame {}/{}", frame_num, total);
            }
        }

        Ok(total)
    }
}

/// Pixel buffer length, computed in `usize` so large frames cannot wrap
fn pixel_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

/// Distance-limited intersection of a ray with the plane y = 0
fn intersect_sea_plane(origin: Vec3, direction: Vec3, max_distance: f32) -> Option<Vec2> {
    if origin.y <= 0.0 || direction.y >= 0.0 {
        return None;
    }
    let t = -origin.y / direction.y;
    if !t.is_finite() || t > max_distance {
        return None;
    }
    let hit = origin + direction * t;
    Some(Vec2::new(hit.x, hit.z))
}

/// Rest position whose horizontally displaced point lands on `target`
fn rest_position_under(waves: &DerivedArrays, target: Vec2, time_s: f32) -> Vec2 {
    let mut rest = target;
    for _ in 0..REST_SEARCH_ITERATIONS {
        let offset = displacement::displacement(waves, rest, time_s);
        rest = target - Vec2::new(offset.x, offset.z);
    }
    rest
}

/// ACES filmic curve (Narkowicz fit)
pub fn aces_filmic(x: f32) -> f32 {
    let x = x.max(0.0);
    ((x * (2.51 * x + 0.03)) / (x * (2.43 * x + 0.59) + 0.14)).clamp(0.0, 1.0)
}

/// Linear scene color to an 8-bit sRGB pixel
pub fn encode_pixel(color: Vec3, exposure: f32) -> Rgb<u8> {
    let encode = |c: f32| {
        let mapped = aces_filmic(c * exposure);
        (linear_to_srgb(mapped) * 255.0 + 0.5).clamp(0.0, 255.0) as u8
    };
    Rgb([encode(color.x), encode(color.y), encode(color.z)])
}
