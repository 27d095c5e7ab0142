//! Axis-aligned bounding box.

use nalgebra::{Point3, Vector3};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Ray;

/// Axis-aligned bounding box described by its minimum and maximum corners.
///
/// The constructor normalizes swapped corners so `min <= max` holds
/// component-wise for every box built through it. Octree nodes treat their
/// boxes as immutable once built.
///
/// # Example
///
/// ```
/// use canopy_types::{Aabb, Point3};
///
/// let aabb = Aabb::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(10.0, 10.0, 10.0),
/// );
///
/// assert_eq!(aabb.size(), Point3::new(10.0, 10.0, 10.0).coords);
/// assert!(aabb.contains(&Point3::new(5.0, 5.0, 5.0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aabb {
    /// Minimum corner (smallest x, y, z values).
    pub min: Point3<f64>,
    /// Maximum corner (largest x, y, z values).
    pub max: Point3<f64>,
}

impl Aabb {
    /// Create a bounding box from two opposite corners.
    ///
    /// The corners may be given in any order; each axis is normalized so
    /// that `min <= max`.
    #[must_use]
    pub fn new(a: Point3<f64>, b: Point3<f64>) -> Self {
        Self {
            min: Point3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Point3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// Create an empty bounding box that contains no points.
    ///
    /// Useful as the identity for [`union`](Self::union) folds: the union of
    /// an empty box with any box is that box.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Compute the bounding box of a set of points.
    ///
    /// Returns [`empty`](Self::empty) when the iterator yields no points.
    #[must_use]
    pub fn from_points<'a>(points: impl Iterator<Item = &'a Point3<f64>>) -> Self {
        let mut bounds = Self::empty();
        for point in points {
            bounds.min = Point3::new(
                bounds.min.x.min(point.x),
                bounds.min.y.min(point.y),
                bounds.min.z.min(point.z),
            );
            bounds.max = Point3::new(
                bounds.max.x.max(point.x),
                bounds.max.y.max(point.y),
                bounds.max.z.max(point.z),
            );
        }
        bounds
    }

    /// Center of the box.
    #[must_use]
    pub fn center(&self) -> Point3<f64> {
        Point3::from((self.min.coords + self.max.coords) * 0.5)
    }

    /// Half the edge length along each axis.
    #[must_use]
    pub fn half_extents(&self) -> Vector3<f64> {
        (self.max - self.min) * 0.5
    }

    /// Edge length along each axis.
    #[must_use]
    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    /// Volume of the box. Degenerate and empty boxes report zero.
    #[must_use]
    pub fn volume(&self) -> f64 {
        (self.max.x - self.min.x).max(0.0)
            * (self.max.y - self.min.y).max(0.0)
            * (self.max.z - self.min.z).max(0.0)
    }

    /// Whether some axis has no positive extent.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y || self.min.z >= self.max.z
    }

    /// Whether the point lies inside the box. Boundary points count.
    #[must_use]
    pub fn contains(&self, point: &Point3<f64>) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Whether two boxes overlap. Touching faces count as overlap.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Smallest box containing both boxes.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: Point3::new(
                self.min.x.min(other.min.x),
                self.min.y.min(other.min.y),
                self.min.z.min(other.min.z),
            ),
            max: Point3::new(
                self.max.x.max(other.max.x),
                self.max.y.max(other.max.y),
                self.max.z.max(other.max.z),
            ),
        }
    }

    /// Grow the box by `margin` on every side.
    #[must_use]
    pub fn expanded(&self, margin: f64) -> Self {
        let m = Vector3::new(margin, margin, margin);
        Self {
            min: self.min - m,
            max: self.max + m,
        }
    }

    /// The eight corner points of the box.
    #[must_use]
    pub fn corners(&self) -> [Point3<f64>; 8] {
        [
            Point3::new(self.min.x, self.min.y, self.min.z),
            Point3::new(self.max.x, self.min.y, self.min.z),
            Point3::new(self.min.x, self.max.y, self.min.z),
            Point3::new(self.max.x, self.max.y, self.min.z),
            Point3::new(self.min.x, self.min.y, self.max.z),
            Point3::new(self.max.x, self.min.y, self.max.z),
            Point3::new(self.min.x, self.max.y, self.max.z),
            Point3::new(self.max.x, self.max.y, self.max.z),
        ]
    }

    /// Intersect a ray with the box using the slab method.
    ///
    /// Returns the raw entry and exit parameters `(t_near, t_far)`, or `None`
    /// when the ray misses the box or the box lies entirely behind an origin
    /// outside it. `t_near` is negative exactly when the origin is inside the
    /// box.
    ///
    /// # Example
    ///
    /// ```
    /// use canopy_types::{Aabb, Point3, Ray, Vector3};
    ///
    /// let aabb = Aabb::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0));
    /// let ray = Ray::new(Point3::new(-5.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0));
    ///
    /// let (t_near, t_far) = aabb.intersect_ray(&ray).expect("the ray crosses the box");
    /// assert!((t_near - 4.0).abs() < 1e-12);
    /// assert!((t_far - 6.0).abs() < 1e-12);
    /// ```
    #[must_use]
    pub fn intersect_ray(&self, ray: &Ray) -> Option<(f64, f64)> {
        let mut t_near = f64::NEG_INFINITY;
        let mut t_far = f64::INFINITY;

        for axis in 0..3 {
            // IEEE 754: a zero direction component yields infinite slab
            // distances. The min/max folds then leave the axis unconstrained
            // when the origin lies between the slab planes and force a miss
            // when it does not. An origin exactly on a slab plane with a
            // parallel direction produces NaN, which the folds resolve
            // toward a miss.
            let inv = 1.0 / ray.direction[axis];
            let t1 = (self.min[axis] - ray.origin[axis]) * inv;
            let t2 = (self.max[axis] - ray.origin[axis]) * inv;
            t_near = t_near.max(t1.min(t2));
            t_far = t_far.min(t1.max(t2));
        }

        if t_near.is_nan() || t_far.is_nan() {
            return None;
        }
        if t_far < t_near || t_far < 0.0 {
            return None;
        }
        Some((t_near, t_far))
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    // =========================================================================
    // Construction and queries
    // =========================================================================

    #[test]
    fn test_new_normalizes_swapped_corners() {
        let aabb = Aabb::new(Point3::new(5.0, -1.0, 3.0), Point3::new(1.0, 2.0, -3.0));
        assert_eq!(aabb.min, Point3::new(1.0, -1.0, -3.0));
        assert_eq!(aabb.max, Point3::new(5.0, 2.0, 3.0));
    }

    #[test]
    fn test_contains_includes_boundary() {
        let aabb = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
        assert!(aabb.contains(&Point3::new(0.0, 0.5, 1.0)));
        assert!(aabb.contains(&Point3::new(1.0, 1.0, 1.0)));
        assert!(!aabb.contains(&Point3::new(1.0, 1.0, 1.0001)));
    }

    #[test]
    fn test_intersects_touching_faces() {
        let a = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
        let b = Aabb::new(Point3::new(1.0, 0.0, 0.0), Point3::new(2.0, 1.0, 1.0));
        let c = Aabb::new(Point3::new(1.1, 0.0, 0.0), Point3::new(2.0, 1.0, 1.0));
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_union_covers_both() {
        let a = Aabb::new(Point3::new(-1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 1.0));
        let b = Aabb::new(Point3::new(2.0, -1.0, 0.5), Point3::new(3.0, 0.5, 2.0));
        let u = a.union(&b);
        assert_eq!(u.min, Point3::new(-1.0, -1.0, 0.0));
        assert_eq!(u.max, Point3::new(3.0, 1.0, 2.0));
    }

    #[test]
    fn test_union_with_empty_is_identity() {
        let a = Aabb::new(Point3::new(-1.0, -2.0, -3.0), Point3::new(1.0, 2.0, 3.0));
        assert_eq!(Aabb::empty().union(&a), a);
    }

    #[test]
    fn test_from_points() {
        let points = [
            Point3::new(1.0, 5.0, -2.0),
            Point3::new(-3.0, 0.0, 4.0),
            Point3::new(2.0, 1.0, 1.0),
        ];
        let aabb = Aabb::from_points(points.iter());
        assert_eq!(aabb.min, Point3::new(-3.0, 0.0, -2.0));
        assert_eq!(aabb.max, Point3::new(2.0, 5.0, 4.0));
    }

    #[test]
    fn test_expanded_grows_every_side() {
        let aabb = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
        let grown = aabb.expanded(0.5);
        assert_eq!(grown.min, Point3::new(-0.5, -0.5, -0.5));
        assert_eq!(grown.max, Point3::new(1.5, 1.5, 1.5));
    }

    #[test]
    fn test_volume_and_degeneracy() {
        let aabb = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 3.0, 4.0));
        assert_eq!(aabb.volume(), 24.0);
        assert!(!aabb.is_degenerate());

        let flat = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 0.0, 4.0));
        assert_eq!(flat.volume(), 0.0);
        assert!(flat.is_degenerate());
        assert!(Aabb::empty().is_degenerate());
    }

    // =========================================================================
    // Slab ray test
    // =========================================================================

    #[test]
    fn test_ray_hits_box_from_outside() {
        let aabb = Aabb::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0));
        let ray = Ray::new(Point3::new(0.0, 5.0, 0.0), Vector3::new(0.0, -1.0, 0.0));
        let (t_near, t_far) = aabb.intersect_ray(&ray).unwrap();
        assert_eq!(t_near, 4.0);
        assert_eq!(t_far, 6.0);
    }

    #[test]
    fn test_ray_misses_box() {
        let aabb = Aabb::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0));
        let ray = Ray::new(Point3::new(0.0, 5.0, 0.0), Vector3::new(1.0, 0.0, 0.0));
        assert!(aabb.intersect_ray(&ray).is_none());
    }

    #[test]
    fn test_box_behind_origin_misses() {
        let aabb = Aabb::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0));
        let ray = Ray::new(Point3::new(3.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0));
        assert!(aabb.intersect_ray(&ray).is_none());
    }

    #[test]
    fn test_origin_inside_reports_negative_entry() {
        let aabb = Aabb::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0));
        let ray = Ray::new(Point3::new(0.5, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0));
        let (t_near, t_far) = aabb.intersect_ray(&ray).unwrap();
        assert_eq!(t_near, -1.5);
        assert_eq!(t_far, 0.5);
    }

    #[test]
    fn test_parallel_ray_inside_slab_hits() {
        let aabb = Aabb::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0));
        let ray = Ray::new(Point3::new(-5.0, 0.5, -0.5), Vector3::new(1.0, 0.0, 0.0));
        let (t_near, t_far) = aabb.intersect_ray(&ray).unwrap();
        assert_eq!(t_near, 4.0);
        assert_eq!(t_far, 6.0);
    }

    #[test]
    fn test_parallel_ray_outside_slab_misses() {
        let aabb = Aabb::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0));
        let ray = Ray::new(Point3::new(-5.0, 2.0, 0.0), Vector3::new(1.0, 0.0, 0.0));
        assert!(aabb.intersect_ray(&ray).is_none());
    }

    #[test]
    fn test_parallel_ray_on_face_misses() {
        // Origin exactly on a slab plane with a parallel direction: the NaN
        // from 0 * inf resolves to a miss rather than corrupting the result.
        let aabb = Aabb::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0));
        let ray = Ray::new(Point3::new(-5.0, 1.0, 0.0), Vector3::new(1.0, 0.0, 0.0));
        assert!(aabb.intersect_ray(&ray).is_none());
    }

    #[test]
    fn test_grazing_corner_entry_equals_exit() {
        let aabb = Aabb::new(Point3::new(0.0, 0.0, -1.0), Point3::new(1.0, 1.0, 1.0));
        let ray = Ray::new(Point3::new(-1.0, 1.0, 0.0), Vector3::new(1.0, -1.0, 0.0));
        // The ray clips the box edge at (0, 0, 0), a single-point overlap.
        let hit = aabb.intersect_ray(&ray);
        assert!(hit.is_some());
        let (t_near, t_far) = hit.unwrap();
        assert_eq!(t_near, 1.0);
        assert_eq!(t_far, 1.0);
    }
}
