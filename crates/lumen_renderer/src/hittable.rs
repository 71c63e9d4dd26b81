//! Hit records and the closed set of primitives.

use lumen_math::{Aabb, Interval, Ray, Vec3};

use crate::material::{Color, Material};
use crate::sphere::Sphere;
use crate::triangle::Triangle;

/// Record of a ray-primitive intersection.
///
/// Transient value type: produced by a hit test, consumed by the
/// integrator, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Point of intersection
    pub p: Vec3,
    /// Surface normal at intersection (always points against the ray)
    pub normal: Vec3,
    /// Parameter t where the intersection occurs
    pub t: f64,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
    /// Base colour of the surface at the hit point
    pub attenuation: Color,
}

impl HitRecord {
    /// Set the face normal based on ray direction and outward normal.
    ///
    /// The normal is always stored pointing against the ray direction,
    /// so we need to track whether we hit the front or back face.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3) {
        // If the ray and normal point in the same direction, we're inside
        self.front_face = ray.direction.dot(outward_normal) < 0.0;

        // Normal always points against the ray
        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// The closed set of geometric primitives.
///
/// The kind set is fixed and small, so primitives are an enum dispatched
/// once per hit test rather than trait objects behind a vtable.
#[derive(Debug, Clone)]
pub enum Primitive {
    Sphere(Sphere),
    Triangle(Triangle),
}

impl Primitive {
    /// Test if a ray hits this primitive within the given interval.
    ///
    /// The bounding box runs first as a cheap rejection filter. It narrows
    /// a private copy of the interval, so a rejection here never disturbs
    /// the interval the caller carries to the remaining primitives.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let mut clipped = ray_t;
        if !self.bounding_box().hit(ray, &mut clipped) {
            return None;
        }

        match self {
            Primitive::Sphere(sphere) => sphere.hit(ray, clipped),
            Primitive::Triangle(triangle) => triangle.hit(ray, clipped),
        }
    }

    /// The material of this primitive.
    pub fn material(&self) -> &Material {
        match self {
            Primitive::Sphere(sphere) => sphere.material(),
            Primitive::Triangle(triangle) => triangle.material(),
        }
    }

    /// The axis-aligned bounding box, computed once at construction.
    pub fn bounding_box(&self) -> &Aabb {
        match self {
            Primitive::Sphere(sphere) => sphere.bounding_box(),
            Primitive::Triangle(triangle) => triangle.bounding_box(),
        }
    }
}

impl From<Sphere> for Primitive {
    fn from(sphere: Sphere) -> Self {
        Primitive::Sphere(sphere)
    }
}

impl From<Triangle> for Primitive {
    fn from(triangle: Triangle) -> Self {
        Primitive::Triangle(triangle)
    }
}
