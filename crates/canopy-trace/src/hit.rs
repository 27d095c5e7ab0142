//! Hit record returned by traversal queries.

use canopy_types::{Point3, Vector3};

/// A ray/triangle intersection found by walking an octree.
///
/// `t` is the ray parameter at the intersection, so it equals the world
/// distance only when the ray direction is unit length.
#[derive(Debug, Clone, Copy)]
pub struct TraceHit {
    /// Ray parameter at the intersection.
    pub t: f64,
    /// Index of the hit triangle in the octree's soup.
    pub triangle: usize,
    /// Intersection point in world coordinates.
    pub point: Point3<f64>,
    /// Unit normal of the hit triangle.
    pub normal: Vector3<f64>,
}

impl TraceHit {
    /// Creates a new hit record.
    #[must_use]
    pub const fn new(t: f64, triangle: usize, point: Point3<f64>, normal: Vector3<f64>) -> Self {
        Self {
            t,
            triangle,
            point,
            normal,
        }
    }
}
