use crate::{Interval, Ray, Vec3};

/// Minimum width of each axis interval. Axis-aligned geometry (a flat
/// triangle, an axis-aligned edge) would otherwise produce zero-thickness
/// slabs that the hit test cannot handle.
const MIN_AXIS_WIDTH: f64 = 2e-8;

/// Axis-aligned bounding box used to cheaply reject primitives before the
/// precise intersection tests run.
///
/// An AABB is defined by three intervals (one per axis) that bound a 3D
/// volume. Every constructor pads degenerate axes to `MIN_AXIS_WIDTH`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Aabb {
    /// Create a new AABB from three intervals.
    pub fn new(x: Interval, y: Interval, z: Interval) -> Self {
        let mut aabb = Self { x, y, z };
        aabb.pad_to_minimums();
        aabb
    }

    /// Create an AABB from two opposing corner points.
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        let x = Interval::new(a.x.min(b.x), a.x.max(b.x));
        let y = Interval::new(a.y.min(b.y), a.y.max(b.y));
        let z = Interval::new(a.z.min(b.z), a.z.max(b.z));

        let mut aabb = Self { x, y, z };
        aabb.pad_to_minimums();
        aabb
    }

    /// Create an AABB that surrounds two other AABBs.
    pub fn surrounding(box0: &Aabb, box1: &Aabb) -> Self {
        Self {
            x: Interval::surrounding(&box0.x, &box1.x),
            y: Interval::surrounding(&box0.y, &box1.y),
            z: Interval::surrounding(&box0.z, &box1.z),
        }
    }

    /// Get the interval for a specific axis (0=X, 1=Y, 2=Z).
    ///
    /// Any other index is a programming error and panics.
    pub fn axis_interval(&self, n: usize) -> Interval {
        match n {
            0 => self.x,
            1 => self.y,
            2 => self.z,
            _ => panic!("AABB axis index out of range: {n}"),
        }
    }

    /// Test if a ray intersects this AABB, narrowing `ray_t` in place.
    ///
    /// Slab method: each axis clips the interval to the parameter range in
    /// which the ray is between the two axis planes, bailing out as soon as
    /// the interval empties. Zero direction components divide to ±infinity,
    /// which the min/max comparisons handle per IEEE-754.
    ///
    /// On success the caller may reuse the narrowed interval to prune the
    /// precise test; callers testing several boxes against one interval must
    /// pass a copy.
    pub fn hit(&self, r: &Ray, ray_t: &mut Interval) -> bool {
        for axis in 0..3 {
            let ax = self.axis_interval(axis);
            let adinv = 1.0 / r.direction[axis];

            let t0 = (ax.min - r.origin[axis]) * adinv;
            let t1 = (ax.max - r.origin[axis]) * adinv;

            let (near, far) = if t0 < t1 { (t0, t1) } else { (t1, t0) };
            ray_t.min = near.max(ray_t.min);
            ray_t.max = far.min(ray_t.max);

            if ray_t.max <= ray_t.min {
                return false;
            }
        }

        true
    }

    /// Pad intervals to avoid zero-width AABBs (degenerate cases).
    fn pad_to_minimums(&mut self) {
        if self.x.size() < MIN_AXIS_WIDTH {
            self.x = self.x.expand(MIN_AXIS_WIDTH);
        }
        if self.y.size() < MIN_AXIS_WIDTH {
            self.y = self.y.expand(MIN_AXIS_WIDTH);
        }
        if self.z.size() < MIN_AXIS_WIDTH {
            self.z = self.z.expand(MIN_AXIS_WIDTH);
        }
    }

    /// An AABB containing nothing; identity for [`Aabb::surrounding`].
    pub const EMPTY: Aabb = Aabb {
        x: Interval::EMPTY,
        y: Interval::EMPTY,
        z: Interval::EMPTY,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_from_points() {
        let a = Vec3::new(10.0, 0.0, 3.0);
        let b = Vec3::new(0.0, 10.0, 7.0);
        let aabb = Aabb::from_points(a, b);

        assert_eq!(aabb.x.min, 0.0);
        assert_eq!(aabb.x.max, 10.0);
        assert_eq!(aabb.y.min, 0.0);
        assert_eq!(aabb.y.max, 10.0);
        assert_eq!(aabb.z.min, 3.0);
        assert_eq!(aabb.z.max, 7.0);
    }

    #[test]
    fn test_aabb_surrounding_contains_both() {
        let box1 = Aabb::from_points(Vec3::ZERO, Vec3::new(5.0, 5.0, 5.0));
        let box2 = Aabb::from_points(Vec3::new(3.0, -2.0, 3.0), Vec3::new(10.0, 10.0, 10.0));
        let surrounding = Aabb::surrounding(&box1, &box2);

        for b in [&box1, &box2] {
            assert!(surrounding.x.contains(b.x.min) && surrounding.x.contains(b.x.max));
            assert!(surrounding.y.contains(b.y.min) && surrounding.y.contains(b.y.max));
            assert!(surrounding.z.contains(b.z.min) && surrounding.z.contains(b.z.max));
        }
    }

    #[test]
    fn test_aabb_hit() {
        let aabb = Aabb::from_points(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));

        // Ray pointing at center
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 1.0));
        let mut t = Interval::new(0.0, 100.0);
        assert!(aabb.hit(&ray, &mut t));
        // The interval narrowed to the slab crossings
        assert!((t.min - 4.0).abs() < 1e-9);
        assert!((t.max - 6.0).abs() < 1e-9);

        // Ray pointing away
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(!aabb.hit(&ray, &mut Interval::new(0.0, 100.0)));

        // Ray missing the box
        let ray = Ray::new(Vec3::new(10.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(!aabb.hit(&ray, &mut Interval::new(0.0, 100.0)));
    }

    #[test]
    fn test_aabb_hit_through_interior_point() {
        // A ray aimed from outside at any point strictly inside the box
        // must not be rejected.
        let aabb = Aabb::from_points(Vec3::new(-2.0, -1.0, 0.5), Vec3::new(1.0, 3.0, 4.0));
        let inside = Vec3::new(-0.5, 1.0, 2.0);

        for origin in [
            Vec3::new(-10.0, 1.0, 2.0),
            Vec3::new(5.0, 5.0, 5.0),
            Vec3::new(0.0, -8.0, 1.0),
        ] {
            let ray = Ray::new(origin, inside - origin);
            let mut t = Interval::new(0.0, f64::INFINITY);
            assert!(aabb.hit(&ray, &mut t), "rejected ray from {origin:?}");
        }
    }

    #[test]
    fn test_aabb_hit_zero_direction_component() {
        let aabb = Aabb::from_points(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));

        // Direction has a zero Y component; the division produces ±infinity
        // and the comparisons still resolve correctly.
        let ray = Ray::new(Vec3::new(-5.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        assert!(aabb.hit(&ray, &mut Interval::new(0.0, 100.0)));

        // Same direction but origin outside the Y slab: never intersects.
        let ray = Ray::new(Vec3::new(-5.0, 2.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        assert!(!aabb.hit(&ray, &mut Interval::new(0.0, 100.0)));
    }

    #[test]
    fn test_aabb_pads_degenerate_axis() {
        // Flat in Z (an axis-aligned triangle would produce this)
        let aabb = Aabb::from_points(Vec3::new(0.0, 0.0, 1.0), Vec3::new(2.0, 2.0, 1.0));
        assert!(aabb.z.size() >= 2e-8);

        let ray = Ray::new(Vec3::new(1.0, 1.0, -1.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(aabb.hit(&ray, &mut Interval::new(0.0, 100.0)));
    }

    #[test]
    #[should_panic]
    fn test_aabb_axis_interval_out_of_range() {
        let aabb = Aabb::from_points(Vec3::ZERO, Vec3::ONE);
        let _ = aabb.axis_interval(3);
    }
}
