//! Ray type for light transport queries.

use nalgebra::{Point3, Vector3};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A ray in 3D space: an origin and a travel direction.
///
/// The point at parameter `t` is `origin + t * direction`. The direction does
/// not need to be normalized; `t` is then expressed in units of the
/// direction's length. Forward traversal uses `t >= 0`; a negative entry
/// parameter from [`Aabb::intersect_ray`](crate::Aabb::intersect_ray) means
/// the origin already sits inside the box.
///
/// # Example
///
/// ```
/// use canopy_types::{Point3, Ray, Vector3};
///
/// let ray = Ray::new(Point3::new(0.0, 1.0, 0.0), Vector3::new(0.0, 0.0, 2.0));
/// assert_eq!(ray.point_at(1.5), Point3::new(0.0, 1.0, 3.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ray {
    /// Starting point of the ray.
    pub origin: Point3<f64>,
    /// Travel direction (not necessarily normalized).
    pub direction: Vector3<f64>,
}

impl Ray {
    /// Create a ray from an origin and a direction.
    #[must_use]
    pub const fn new(origin: Point3<f64>, direction: Vector3<f64>) -> Self {
        Self { origin, direction }
    }

    /// Evaluate the ray at parameter `t`.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point3<f64> {
        self.origin + self.direction * t
    }

    /// Return a copy of this ray with a unit-length direction.
    ///
    /// A zero-length direction is returned unchanged since it has no
    /// meaningful normalization.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let norm = self.direction.norm();
        if norm < f64::EPSILON {
            return *self;
        }
        Self {
            origin: self.origin,
            direction: self.direction / norm,
        }
    }
}
