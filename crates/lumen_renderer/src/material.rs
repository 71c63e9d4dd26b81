//! Material scattering.

use lumen_math::{Ray, Vec3};
use rand::RngCore;

use crate::hittable::HitRecord;
use crate::sampler::{random_f64, random_unit_vector};

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// How a surface responds to an incoming ray.
///
/// The kind set is fixed and small, so materials are a closed enum owned by
/// value inside each primitive rather than trait objects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    /// Lambertian diffuse: scatters around the surface normal.
    Diffuse { albedo: Color },
    /// Perfect mirror reflection.
    Metallic { albedo: Color },
    /// Glass-like: reflects or refracts depending on angle, refractive
    /// index, and a fresh random draw against the Schlick reflectance.
    Dielectric { albedo: Color, refractive_index: f64 },
}

/// A scattered direction plus the attenuation to fold into the running
/// radiance. The caller builds the outgoing ray from the hit point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scatter {
    pub direction: Vec3,
    pub attenuation: Color,
}

impl Material {
    /// The material's base reflective colour.
    pub fn albedo(&self) -> Color {
        match *self {
            Material::Diffuse { albedo }
            | Material::Metallic { albedo }
            | Material::Dielectric { albedo, .. } => albedo,
        }
    }

    /// Scatter an incoming ray at a hit point.
    ///
    /// Scattering never fails and never produces an exact zero direction;
    /// degenerate cases fall back to the surface normal.
    pub fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Scatter {
        match *self {
            Material::Diffuse { albedo } => {
                let mut direction = rec.normal + random_unit_vector(rng);

                // Catch degenerate scatter direction
                if near_zero(direction) {
                    direction = rec.normal;
                }

                Scatter {
                    direction,
                    attenuation: albedo,
                }
            }
            Material::Metallic { albedo } => Scatter {
                direction: reflect(ray_in.direction, rec.normal),
                attenuation: albedo,
            },
            Material::Dielectric {
                albedo,
                refractive_index,
            } => {
                // Entering the surface sees 1/eta, exiting sees eta
                let ratio = if rec.front_face {
                    1.0 / refractive_index
                } else {
                    refractive_index
                };

                let unit_direction = ray_in.direction.normalize();
                let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
                let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

                // Total internal reflection leaves no choice; otherwise the
                // Schlick reflectance decides against a fresh uniform draw.
                let cannot_refract = ratio * sin_theta > 1.0;
                let direction = if cannot_refract || reflectance(cos_theta, ratio) > random_f64(rng)
                {
                    reflect(unit_direction, rec.normal)
                } else {
                    refract(unit_direction, rec.normal, ratio)
                };

                Scatter {
                    direction,
                    attenuation: albedo,
                }
            }
        }
    }
}

/// Schlick's approximation for reflectance.
fn reflectance(cosine: f64, ratio: f64) -> f64 {
    let r0 = ((1.0 - ratio) / (1.0 + ratio)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

/// Reflect a vector about a normal.
#[inline]
fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a vector through a surface.
#[inline]
fn refract(uv: Vec3, n: Vec3, etai_over_etat: f64) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

fn near_zero(v: Vec3) -> bool {
    const EPS: f64 = 1e-8;
    v.x.abs() < EPS && v.y.abs() < EPS && v.z.abs() < EPS
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn front_hit(normal: Vec3) -> HitRecord {
        HitRecord {
            p: Vec3::ZERO,
            normal,
            t: 1.0,
            front_face: true,
            attenuation: Color::ONE,
        }
    }

    #[test]
    fn test_diffuse_never_scatters_zero_direction() {
        let material = Material::Diffuse {
            albedo: Color::new(0.8, 0.2, 0.2),
        };
        let rec = front_hit(Vec3::Y);
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, -1.0, 0.0));

        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..5_000 {
            let scatter = material.scatter(&ray, &rec, &mut rng);
            assert!(scatter.direction != Vec3::ZERO);
            assert_eq!(scatter.attenuation, Color::new(0.8, 0.2, 0.2));
        }
    }

    #[test]
    fn test_metallic_mirror_reflection() {
        let material = Material::Metallic { albedo: Color::ONE };
        let rec = front_hit(Vec3::Y);
        let ray = Ray::new(Vec3::new(-1.0, 1.0, 0.0), Vec3::new(1.0, -1.0, 0.0));

        let mut rng = StdRng::seed_from_u64(3);
        let scatter = material.scatter(&ray, &rec, &mut rng);
        assert_eq!(scatter.direction, Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_dielectric_index_one_passes_straight_through() {
        // With no index mismatch a head-on ray refracts into the incoming
        // direction unchanged (head-on, so the Schlick term is zero).
        let material = Material::Dielectric {
            albedo: Color::ONE,
            refractive_index: 1.0,
        };
        let rec = front_hit(Vec3::Y);
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, -2.0, 0.0));

        let mut rng = StdRng::seed_from_u64(3);
        let scatter = material.scatter(&ray, &rec, &mut rng);
        let expected = ray.direction.normalize();
        assert!((scatter.direction - expected).length() < 1e-12);
    }

    #[test]
    fn test_dielectric_total_internal_reflection() {
        // Exiting glass at a glancing angle: ratio * sin(theta) > 1, so the
        // ray must reflect regardless of the random draw.
        let material = Material::Dielectric {
            albedo: Color::ONE,
            refractive_index: 1.5,
        };
        let mut rec = front_hit(Vec3::Y);
        rec.front_face = false;

        // ~20 degrees from grazing: sin(theta) well above 1/1.5
        let incoming = Vec3::new(0.9, -0.436, 0.0).normalize();
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), incoming);

        let mut rng = StdRng::seed_from_u64(3);
        let scatter = material.scatter(&ray, &rec, &mut rng);
        let expected = reflect(incoming, rec.normal);
        assert!((scatter.direction - expected).length() < 1e-12);
    }

    #[test]
    fn test_refract_bends_toward_surface_entering_glass() {
        let incoming = Vec3::new(1.0, -1.0, 0.0).normalize();
        let refracted = refract(incoming, Vec3::Y, 1.0 / 1.5);

        // Snell: sin(theta') = sin(theta) / 1.5
        let sin_in = incoming.x;
        let sin_out = refracted.normalize().x;
        assert!((sin_out - sin_in / 1.5).abs() < 1e-12);
    }
}
