//! Core path tracing integrator and render drivers.
//!
//! The integrator is plain tree recursion capped by the camera's bounce
//! budget. The drivers hand every finished pixel to a caller-supplied sink
//! in linear light; gamma correction is the display's business (helpers at
//! the bottom for hosts that want it).

use lumen_math::{Interval, Ray};
use rand::RngCore;
use rayon::prelude::*;
use std::ops::Range;

use crate::camera::Camera;
use crate::material::Color;
use crate::sampler::{Sampler, SamplerKind};
use crate::scene::Scene;

/// Mixer applied to the row index so neighbouring rows get decorrelated
/// sampler streams from one base seed.
const ROW_SEED_MULT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Render configuration: which generator drives the sampling and the base
/// seed. The same configuration renders the same image, pixel for pixel.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RenderConfig {
    pub sampler: SamplerKind,
    pub seed: u64,
}

impl RenderConfig {
    /// The sampler that renders `row`: deterministic per row, so any row
    /// range reproduces exactly the pixels a full render would produce.
    fn row_sampler(&self, row: u32) -> Sampler {
        Sampler::new(
            self.sampler,
            self.seed ^ (row as u64).wrapping_mul(ROW_SEED_MULT),
        )
    }
}

/// Compute the colour seen by a ray.
///
/// This is the core path tracing function: bounce off surfaces folding in
/// each material's attenuation until the ray escapes to the background or
/// the bounce budget runs out. The budget is a hard cap, not roulette.
pub fn ray_color(ray: &Ray, scene: &Scene, depth: u32, rng: &mut dyn RngCore) -> Color {
    // Bounce budget exhausted: no more light is gathered
    if depth == 0 {
        return Color::ZERO;
    }

    // The lower bound keeps a scattered ray from re-hitting the surface it
    // just left ("shadow acne")
    let Some(hit) = scene.hit(ray, Interval::new(1e-3, f64::INFINITY)) else {
        return background(ray);
    };

    let scatter = scene
        .get(hit.index)
        .material()
        .scatter(ray, &hit.record, rng);
    let scattered = Ray::new(hit.record.p, scatter.direction);

    scatter.attenuation * ray_color(&scattered, scene, depth - 1, rng)
}

/// Background gradient for rays that escape the scene.
///
/// Vertical blend keyed on the unit direction's Y: white at the horizon up
/// to sky blue at the zenith.
pub fn background(ray: &Ray) -> Color {
    let unit_direction = ray.direction.normalize();
    let a = 0.5 * (unit_direction.y + 1.0);

    let horizon = Color::new(1.0, 1.0, 1.0);
    let zenith = Color::new(0.5, 0.7, 1.0);
    horizon * (1.0 - a) + zenith * a
}

/// Render a single pixel with multi-sampling.
///
/// Averages `samples_per_pixel` jittered samples. The result is always
/// finite; a sample that degenerates to a non-finite value is dropped to
/// black rather than poisoning the sink.
pub fn render_pixel(
    camera: &Camera,
    scene: &Scene,
    col: u32,
    row: u32,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;

    for _ in 0..camera.samples_per_pixel {
        let ray = camera.get_ray(col, row, rng);
        let sample = ray_color(&ray, scene, camera.max_depth, rng);
        if sample.is_finite() {
            pixel_color += sample;
        }
    }

    pixel_color / camera.samples_per_pixel as f64
}

/// Render one row into a buffer, left to right, with the row's own sampler.
fn render_row(camera: &Camera, scene: &Scene, config: &RenderConfig, row: u32) -> Vec<Color> {
    let mut rng = config.row_sampler(row);
    (0..camera.image_width)
        .map(|col| render_pixel(camera, scene, col, row, &mut rng))
        .collect()
}

/// Render rows `rows.start..rows.end` sequentially, invoking `set_pixel`
/// once per pixel with the sample-averaged linear colour.
///
/// Hosts drive this for incremental rendering: every row draws from its
/// own deterministic sampler stream, so ranges can be rendered in any
/// order, split, or re-rendered without changing the image.
pub fn render_row_range<F>(
    camera: &Camera,
    scene: &Scene,
    config: &RenderConfig,
    rows: Range<u32>,
    mut set_pixel: F,
) where
    F: FnMut(u32, u32, Color),
{
    for row in rows {
        let colors = render_row(camera, scene, config, row);
        for (col, color) in colors.into_iter().enumerate() {
            set_pixel(col as u32, row, color);
        }
        log::debug!("rendered row {row}");
    }
}

/// Render the full image, parallelized across rows.
///
/// Rows are distributed over the rayon thread pool, each worker owning the
/// private sampler stream for its row; the scene is shared read-only. The
/// output is identical to a sequential [`render_row_range`] over all rows.
/// `set_pixel` is invoked in scan order once the rows complete.
pub fn render_full<F>(camera: &Camera, scene: &Scene, config: &RenderConfig, mut set_pixel: F)
where
    F: FnMut(u32, u32, Color),
{
    log::info!(
        "rendering {}x{} at {} spp, {} primitives, {} threads",
        camera.image_width,
        camera.image_height,
        camera.samples_per_pixel,
        scene.len(),
        rayon::current_num_threads()
    );

    let rows: Vec<Vec<Color>> = (0..camera.image_height)
        .into_par_iter()
        .map(|row| render_row(camera, scene, config, row))
        .collect();

    for (row, colors) in rows.into_iter().enumerate() {
        for (col, color) in colors.into_iter().enumerate() {
            set_pixel(col as u32, row as u32, color);
        }
    }
}

/// Apply gamma correction (gamma = 2.0). Render output is linear light;
/// hosts convert for display.
#[inline]
pub fn linear_to_gamma(linear: f64) -> f64 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a linear colour to gamma-corrected 8-bit RGB for display.
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    let r = (255.0 * linear_to_gamma(color.x).clamp(0.0, 1.0)).round() as u8;
    let g = (255.0 * linear_to_gamma(color.y).clamp(0.0, 1.0)).round() as u8;
    let b = (255.0 * linear_to_gamma(color.z).clamp(0.0, 1.0)).round() as u8;
    [r, g, b]
}
