// Re-export glam for convenience
pub use glam;

/// The renderer works in double precision throughout; `Vec3` is `glam::DVec3`.
pub type Vec3 = glam::DVec3;

mod aabb;
mod interval;
mod ray;

pub use aabb::Aabb;
pub use interval::Interval;
pub use ray::Ray;
