//! Triangle primitive with per-vertex shading normals.
//!
//! The intersection test is the signed-determinant barycentric form of
//! Möller-Trumbore, with back faces culled.

use lumen_math::{Aabb, Interval, Ray, Vec3};

use crate::hittable::HitRecord;
use crate::material::Material;

/// Determinants at or below this reject the ray as parallel. Negative
/// determinants are back faces and are culled.
const DET_EPSILON: f64 = 1e-12;

/// A triangle with counter-clockwise winding and per-vertex normals for
/// interpolated (Phong-style) shading.
#[derive(Debug, Clone)]
pub struct Triangle {
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
    n0: Vec3,
    n1: Vec3,
    n2: Vec3,
    material: Material,
    bbox: Aabb,
}

impl Triangle {
    /// Create a new triangle from three vertices and their normals.
    pub fn new(
        v0: Vec3,
        v1: Vec3,
        v2: Vec3,
        n0: Vec3,
        n1: Vec3,
        n2: Vec3,
        material: Material,
    ) -> Self {
        // The Aabb constructor pads axis-aligned (flat) triangles
        let bbox = Aabb::from_points(v0.min(v1).min(v2), v0.max(v1).max(v2));

        Self {
            v0,
            v1,
            v2,
            n0,
            n1,
            n2,
            material,
            bbox,
        }
    }

    /// Create a triangle that shares the geometric face normal at every
    /// vertex (flat shading).
    pub fn with_face_normal(v0: Vec3, v1: Vec3, v2: Vec3, material: Material) -> Self {
        let normal = (v1 - v0).cross(v2 - v0).normalize();
        Self::new(v0, v1, v2, normal, normal, normal, material)
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn bounding_box(&self) -> &Aabb {
        &self.bbox
    }

    /// Barycentric intersection test.
    ///
    /// Rejects parallel rays and back faces via the signed determinant,
    /// then any hit with a negative distance or barycentric coordinate.
    /// The shading normal interpolates the vertex normals with the
    /// barycentric weights.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let ab = self.v1 - self.v0;
        let ac = self.v2 - self.v0;
        let n = ab.cross(ac);

        let det = -ray.direction.dot(n);
        if det < DET_EPSILON {
            return None;
        }
        let inv_det = 1.0 / det;

        let ao = ray.origin - self.v0;
        let dao = ao.cross(ray.direction);

        let t = ao.dot(n) * inv_det;
        let u = ac.dot(dao) * inv_det;
        let v = -ab.dot(dao) * inv_det;
        let w = 1.0 - u - v;

        if t < 0.0 || u < 0.0 || v < 0.0 || w < 0.0 || !ray_t.surrounds(t) {
            return None;
        }

        let shading_normal = (self.n0 * w + self.n1 * u + self.n2 * v).normalize();
        let mut rec = HitRecord {
            p: ray.at(t),
            normal: shading_normal,
            t,
            front_face: true,
            attenuation: self.material.albedo(),
        };
        rec.set_face_normal(ray, shading_normal);

        Some(rec)
    }
}
