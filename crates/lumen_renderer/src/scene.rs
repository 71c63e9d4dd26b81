//! Scene aggregate: an append-only list of primitives with a linear
//! nearest-hit query.

use lumen_math::{Aabb, Interval, Ray};

use crate::hittable::{HitRecord, Primitive};

/// A hit returned by [`Scene::hit`]: the record plus the index of the
/// primitive it belongs to, for looking up its material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneHit {
    pub index: usize,
    pub record: HitRecord,
}

/// Collection of primitives forming a scene.
///
/// Primitives are append-only, so indices stay stable for the lifetime of
/// the scene, and the whole structure is immutable during rendering and
/// safe to share across worker threads.
#[derive(Debug)]
pub struct Scene {
    primitives: Vec<Primitive>,
    bbox: Aabb,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self {
            primitives: Vec::new(),
            bbox: Aabb::EMPTY,
        }
    }

    /// Add a primitive to the scene.
    pub fn add(&mut self, primitive: impl Into<Primitive>) {
        let primitive = primitive.into();
        self.bbox = Aabb::surrounding(&self.bbox, primitive.bounding_box());
        self.primitives.push(primitive);
    }

    /// Add a batch of primitives, e.g. the triangles of an imported mesh.
    pub fn add_all(&mut self, primitives: impl IntoIterator<Item = Primitive>) {
        let before = self.primitives.len();
        for primitive in primitives {
            self.add(primitive);
        }
        log::debug!("scene grew by {} primitives", self.primitives.len() - before);
    }

    /// Get the number of primitives.
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    /// Check if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// The primitive at `index`, as reported in a [`SceneHit`].
    pub fn get(&self, index: usize) -> &Primitive {
        &self.primitives[index]
    }

    /// Bounding box of everything added so far.
    pub fn bounding_box(&self) -> &Aabb {
        &self.bbox
    }

    /// Find the nearest hit along `ray` within `ray_t`.
    ///
    /// Linear scan with a shrinking interval: every accepted hit lowers the
    /// upper bound, so anything farther gets pruned by its bounding-box test
    /// without sorting. Insertion order does not affect the result.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<SceneHit> {
        let mut closest = ray_t;
        let mut best = None;

        for (index, primitive) in self.primitives.iter().enumerate() {
            if let Some(record) = primitive.hit(ray, closest) {
                if closest.surrounds(record.t) {
                    closest.max = record.t;
                    best = Some(SceneHit { index, record });
                }
            }
        }

        best
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
