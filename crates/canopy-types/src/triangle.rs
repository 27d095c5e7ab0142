//! Triangle primitive with a cached unit normal.

use nalgebra::{Point3, Vector3};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Aabb;

/// A triangle in 3D space.
///
/// The unit normal is computed once at construction from the winding order
/// `(v1 - v0) x (v2 - v0)` and cached. Degenerate triangles (collinear or
/// coincident vertices) carry a zero normal and never intersect rays; they
/// are representable so that malformed soups degrade to misses instead of
/// breaking queries.
///
/// # Example
///
/// ```
/// use canopy_types::{Point3, Triangle, Vector3};
///
/// let triangle = Triangle::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// );
///
/// assert_eq!(triangle.normal(), Vector3::new(0.0, 0.0, 1.0));
/// assert!((triangle.area() - 0.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(from = "[Point3<f64>; 3]", into = "[Point3<f64>; 3]")
)]
pub struct Triangle {
    v0: Point3<f64>,
    v1: Point3<f64>,
    v2: Point3<f64>,
    normal: Vector3<f64>,
}

impl Triangle {
    /// Create a triangle from three vertices.
    ///
    /// The normal follows the right-hand rule over `(v0, v1, v2)`. Degenerate
    /// input yields a zero normal.
    #[must_use]
    pub fn new(v0: Point3<f64>, v1: Point3<f64>, v2: Point3<f64>) -> Self {
        let cross = (v1 - v0).cross(&(v2 - v0));
        let len_sq = cross.norm_squared();
        let normal = if len_sq.is_finite() && len_sq > f64::EPSILON {
            cross / len_sq.sqrt()
        } else {
            Vector3::zeros()
        };
        Self { v0, v1, v2, normal }
    }

    /// First vertex.
    #[must_use]
    pub const fn v0(&self) -> Point3<f64> {
        self.v0
    }

    /// Second vertex.
    #[must_use]
    pub const fn v1(&self) -> Point3<f64> {
        self.v1
    }

    /// Third vertex.
    #[must_use]
    pub const fn v2(&self) -> Point3<f64> {
        self.v2
    }

    /// Cached unit normal, or zero for a degenerate triangle.
    #[must_use]
    pub const fn normal(&self) -> Vector3<f64> {
        self.normal
    }

    /// Arithmetic mean of the three vertices.
    #[must_use]
    pub fn centroid(&self) -> Point3<f64> {
        Point3::from((self.v0.coords + self.v1.coords + self.v2.coords) / 3.0)
    }

    /// Surface area.
    #[must_use]
    pub fn area(&self) -> f64 {
        (self.v1 - self.v0).cross(&(self.v2 - self.v0)).norm() * 0.5
    }

    /// Tight bounding box of the three vertices.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points([self.v0, self.v1, self.v2].iter())
    }

    /// Whether the vertices fail to span a plane.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.normal == Vector3::zeros()
    }
}

impl From<[Point3<f64>; 3]> for Triangle {
    fn from(vertices: [Point3<f64>; 3]) -> Self {
        Self::new(vertices[0], vertices[1], vertices[2])
    }
}

impl From<Triangle> for [Point3<f64>; 3] {
    fn from(triangle: Triangle) -> Self {
        [triangle.v0, triangle.v1, triangle.v2]
    }
}
