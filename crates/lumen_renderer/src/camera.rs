//! Camera for ray generation.

use lumen_math::{Ray, Vec3};
use rand::RngCore;

use crate::sampler::{random_f64, random_in_unit_disk};

/// Camera for generating rays into the scene.
///
/// Configure through the `with_*` builders (or the public fields) and call
/// [`Camera::initialize`] before generating rays. `initialize` is
/// idempotent and recomputes the derived basis after any pose or intrinsic
/// change.
#[derive(Debug, Clone)]
pub struct Camera {
    // Image settings
    pub image_width: u32,
    pub image_height: u32,
    pub samples_per_pixel: u32,
    pub max_depth: u32,

    // Camera positioning
    look_from: Vec3,
    look_at: Vec3,
    vup: Vec3,

    // Lens settings
    vfov: f64,          // Vertical field of view in degrees
    defocus_angle: f64, // Variation angle of rays through each pixel, degrees
    focus_dist: f64,    // Distance from camera to plane of perfect focus

    // Cached computed values (set by initialize())
    center: Vec3,
    pixel00_loc: Vec3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    defocus_disk_u: Vec3,
    defocus_disk_v: Vec3,
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self {
            image_width: 800,
            image_height: 450,
            samples_per_pixel: 10,
            max_depth: 50,
            look_from: Vec3::new(0.0, 0.0, 0.0),
            look_at: Vec3::new(0.0, 0.0, -1.0),
            vup: Vec3::new(0.0, 1.0, 0.0),
            vfov: 90.0,
            defocus_angle: 0.0,
            focus_dist: 1.0,
            // Cached values (recomputed by initialize())
            center: Vec3::ZERO,
            pixel00_loc: Vec3::ZERO,
            pixel_delta_u: Vec3::ZERO,
            pixel_delta_v: Vec3::ZERO,
            u: Vec3::X,
            v: Vec3::Y,
            w: Vec3::Z,
            defocus_disk_u: Vec3::ZERO,
            defocus_disk_v: Vec3::ZERO,
        }
    }

    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self
    }

    /// Set quality settings.
    pub fn with_quality(mut self, samples_per_pixel: u32, max_depth: u32) -> Self {
        self.samples_per_pixel = samples_per_pixel;
        self.max_depth = max_depth;
        self
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f64, defocus_angle: f64, focus_dist: f64) -> Self {
        self.vfov = vfov;
        self.defocus_angle = defocus_angle;
        self.focus_dist = focus_dist;
        self
    }

    /// Recompute the derived basis and viewport geometry.
    ///
    /// Must be called before generating rays and again after mutating pose
    /// or intrinsics; calling it twice in a row is a no-op.
    pub fn initialize(&mut self) {
        self.center = self.look_from;

        // Viewport dimensions follow from the field of view and focus distance
        let theta = self.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h * self.focus_dist;
        let viewport_width =
            viewport_height * (self.image_width as f64 / self.image_height as f64);

        // Orthonormal camera basis
        self.w = (self.look_from - self.look_at).normalize();
        self.u = self.vup.cross(self.w).normalize();
        self.v = self.w.cross(self.u);

        // Vectors along the viewport edges, top-left origin
        let viewport_u = viewport_width * self.u;
        let viewport_v = -viewport_height * self.v;

        // Pixel-to-pixel deltas
        self.pixel_delta_u = viewport_u / self.image_width as f64;
        self.pixel_delta_v = viewport_v / self.image_height as f64;

        // Location of the upper left pixel sample
        let viewport_upper_left =
            self.center - self.focus_dist * self.w - viewport_u / 2.0 - viewport_v / 2.0;
        self.pixel00_loc = viewport_upper_left + 0.5 * (self.pixel_delta_u + self.pixel_delta_v);

        // Defocus disk basis vectors
        let defocus_radius = self.focus_dist * (self.defocus_angle / 2.0).to_radians().tan();
        self.defocus_disk_u = self.u * defocus_radius;
        self.defocus_disk_v = self.v * defocus_radius;
    }

    /// Generate a jittered ray through pixel (col, row).
    ///
    /// The sample point jitters uniformly inside the pixel square for
    /// box-filter antialiasing. With a positive defocus angle the origin is
    /// sampled from the lens disk (thin-lens depth of field); otherwise the
    /// camera is a pinhole.
    pub fn get_ray(&self, col: u32, row: u32, rng: &mut dyn RngCore) -> Ray {
        let offset = sample_square(rng);

        let pixel_sample = self.pixel00_loc
            + (col as f64 + offset.x) * self.pixel_delta_u
            + (row as f64 + offset.y) * self.pixel_delta_v;

        let ray_origin = if self.defocus_angle <= 0.0 {
            self.center
        } else {
            self.defocus_disk_sample(rng)
        };

        Ray::new(ray_origin, pixel_sample - ray_origin)
    }

    /// Sample a point on the defocus disk.
    fn defocus_disk_sample(&self, rng: &mut dyn RngCore) -> Vec3 {
        let p = random_in_unit_disk(rng);
        self.center + p.x * self.defocus_disk_u + p.y * self.defocus_disk_v
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

/// Sample a random point in the unit square [-0.5, 0.5] x [-0.5, 0.5].
fn sample_square(rng: &mut dyn RngCore) -> Vec3 {
    Vec3::new(random_f64(rng) - 0.5, random_f64(rng) - 0.5, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_camera_initialize_builds_orthonormal_basis() {
        let mut camera = Camera::new()
            .with_resolution(800, 600)
            .with_position(
                Vec3::new(3.0, 2.0, 1.0),
                Vec3::new(0.0, 0.0, -1.0),
                Vec3::new(0.0, 1.0, 0.0),
            )
            .with_lens(60.0, 0.0, 1.0);
        camera.initialize();

        for basis in [camera.u, camera.v, camera.w] {
            assert!((basis.length() - 1.0).abs() < 1e-12);
        }
        assert!(camera.u.dot(camera.v).abs() < 1e-12);
        assert!(camera.u.dot(camera.w).abs() < 1e-12);
        assert!(camera.v.dot(camera.w).abs() < 1e-12);
    }

    #[test]
    fn test_camera_initialize_is_idempotent() {
        let mut camera = Camera::new().with_resolution(320, 180);
        camera.initialize();
        let first = (camera.pixel00_loc, camera.pixel_delta_u, camera.pixel_delta_v);

        camera.initialize();
        let second = (camera.pixel00_loc, camera.pixel_delta_u, camera.pixel_delta_v);
        assert_eq!(first, second);
    }

    #[test]
    fn test_camera_center_ray_points_at_target() {
        let mut camera = Camera::new()
            .with_resolution(101, 101)
            .with_position(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
            .with_lens(90.0, 0.0, 1.0);
        camera.initialize();

        let mut rng = StdRng::seed_from_u64(42);
        let ray = camera.get_ray(50, 50, &mut rng);

        // Within half a pixel of straight down -Z
        assert!(ray.direction.z < 0.0);
        let unit = ray.direction.normalize();
        assert!(unit.x.abs() < 0.02);
        assert!(unit.y.abs() < 0.02);
    }

    #[test]
    fn test_pinhole_rays_share_the_camera_origin() {
        let mut camera = Camera::new().with_resolution(64, 64).with_lens(90.0, 0.0, 1.0);
        camera.initialize();

        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..32 {
            let ray = camera.get_ray(10, 20, &mut rng);
            assert_eq!(ray.origin, Vec3::ZERO);
        }
    }

    #[test]
    fn test_defocus_rays_sample_the_lens_disk() {
        let mut camera = Camera::new()
            .with_resolution(64, 64)
            .with_lens(90.0, 10.0, 3.0);
        camera.initialize();

        let defocus_radius = 3.0 * (5.0f64).to_radians().tan();
        let mut rng = StdRng::seed_from_u64(42);
        let mut saw_offset = false;
        for _ in 0..32 {
            let ray = camera.get_ray(32, 32, &mut rng);
            let offset = ray.origin.length();
            assert!(offset <= defocus_radius + 1e-9);
            saw_offset |= offset > 0.0;
        }
        assert!(saw_offset);
    }
}
