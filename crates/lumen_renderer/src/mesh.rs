//! Mesh intake: triangle soup handed over by an external importer.
//!
//! The scene-description / OBJ front end is a collaborator, not part of the
//! renderer. It delivers plain vertex, normal, and face arrays; this module
//! validates them and turns each face into a triangle primitive. Face
//! indices are 1-based, as in OBJ-style formats.

use lumen_math::Vec3;
use thiserror::Error;

use crate::hittable::Primitive;
use crate::material::Material;
use crate::triangle::Triangle;

/// Errors produced while validating imported mesh data.
///
/// Malformed face data is a fatal input error at import time; geometry
/// that validates never fails later in the render.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    #[error("face {face} references vertex {index}, but indices are 1-based and the mesh has {len} vertices")]
    IndexOutOfRange { face: usize, index: u32, len: usize },

    #[error("mesh has {normals} normals for {positions} positions")]
    NormalCountMismatch { normals: usize, positions: usize },
}

/// Triangle mesh data as delivered by an importer.
///
/// `faces` holds 1-based index triples into `positions` (and into
/// `normals`, when present).
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    /// Vertex positions (one per vertex)
    pub positions: Vec<Vec3>,
    /// Per-vertex normals; computed from the faces when absent
    pub normals: Option<Vec<Vec3>>,
    /// Triangular faces as 1-based vertex index triples
    pub faces: Vec<[u32; 3]>,
}

impl Mesh {
    /// Validate the face indices and build one triangle primitive per
    /// face, all sharing `material`.
    pub fn into_triangles(self, material: Material) -> Result<Vec<Primitive>, MeshError> {
        let Mesh {
            positions,
            normals,
            faces,
        } = self;

        validate(&positions, normals.as_deref(), &faces)?;

        let normals = match normals {
            Some(normals) => normals,
            None => smooth_normals(&positions, &faces),
        };

        let triangles = faces
            .iter()
            .map(|face| {
                let [a, b, c] = face.map(|index| (index - 1) as usize);
                Primitive::Triangle(Triangle::new(
                    positions[a],
                    positions[b],
                    positions[c],
                    normals[a],
                    normals[b],
                    normals[c],
                    material,
                ))
            })
            .collect();

        log::info!(
            "meshed {} faces over {} vertices",
            faces.len(),
            positions.len()
        );

        Ok(triangles)
    }
}

fn validate(
    positions: &[Vec3],
    normals: Option<&[Vec3]>,
    faces: &[[u32; 3]],
) -> Result<(), MeshError> {
    if let Some(normals) = normals {
        if normals.len() != positions.len() {
            return Err(MeshError::NormalCountMismatch {
                normals: normals.len(),
                positions: positions.len(),
            });
        }
    }

    for (face, indices) in faces.iter().enumerate() {
        for &index in indices {
            if index == 0 || index as usize > positions.len() {
                return Err(MeshError::IndexOutOfRange {
                    face,
                    index,
                    len: positions.len(),
                });
            }
        }
    }

    Ok(())
}

/// Smooth per-vertex normals: the normalized, area-weighted accumulation
/// of the face normals around each vertex.
fn smooth_normals(positions: &[Vec3], faces: &[[u32; 3]]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];

    for face in faces {
        let [a, b, c] = face.map(|index| (index - 1) as usize);
        // Cross product of the CCW edges: length is twice the face area,
        // so larger faces weigh more
        let face_normal = (positions[b] - positions[a]).cross(positions[c] - positions[a]);

        normals[a] += face_normal;
        normals[b] += face_normal;
        normals[c] += face_normal;
    }

    for normal in &mut normals {
        // Vertices referenced by no face keep a zero normal; no triangle
        // will ever read it
        *normal = normal.normalize_or_zero();
    }

    normals
}
