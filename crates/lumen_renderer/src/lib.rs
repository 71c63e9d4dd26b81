//! Lumen - CPU path tracing.
//!
//! A Monte Carlo path tracer for physically-based rendering: seeded
//! deterministic sampling, sphere and triangle primitives behind flat AABB
//! culling, diffuse/metallic/dielectric scattering, and a recursive
//! integrator driven row-by-row or fully in parallel.
//!
//! The window surface, scene-description front end, and event loop are the
//! host's concern; the renderer hands finished pixels to a callback in
//! linear light.

mod camera;
mod hittable;
mod material;
mod mesh;
mod renderer;
mod sampler;
mod scene;
mod sphere;
mod triangle;

pub use camera::Camera;
pub use hittable::{HitRecord, Primitive};
pub use material::{Color, Material, Scatter};
pub use mesh::{Mesh, MeshError};
pub use renderer::{
    background, color_to_rgb8, linear_to_gamma, ray_color, render_full, render_pixel,
    render_row_range, RenderConfig,
};
pub use sampler::{
    random_f64, random_in_unit_disk, random_range, random_unit_vector, Sampler, SamplerError,
    SamplerKind,
};
pub use scene::{Scene, SceneHit};
pub use sphere::Sphere;
pub use triangle::Triangle;

/// Re-export the math types from lumen_math
pub use lumen_math::{Aabb, Interval, Ray, Vec3};
