//! Ray/triangle intersection queries.
//!
//! Single triangles are tested with the Moller-Trumbore algorithm. The test
//! is two-sided: a triangle blocks rays arriving from either side of its
//! plane, so winding order never decides visibility. Degenerate input
//! (zero-area triangles, rays parallel to the plane) reports a miss.

use crate::{Ray, Triangle};

/// Determinants smaller than this are treated as ray-parallel-to-plane.
const EPSILON: f64 = 1e-10;

/// Intersect a ray with a single triangle.
///
/// Returns the ray parameter `t >= 0` of the intersection point, or `None`
/// when the ray misses. Hits behind the origin are misses. Points exactly on
/// a triangle edge or vertex count as hits.
///
/// # Example
///
/// ```
/// use canopy_types::{intersect, Point3, Ray, Triangle, Vector3};
///
/// let triangle = Triangle::new(
///     Point3::new(-1.0, -1.0, 0.0),
///     Point3::new(1.0, -1.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// );
/// let ray = Ray::new(Point3::new(0.0, 0.0, 5.0), Vector3::new(0.0, 0.0, -1.0));
///
/// assert_eq!(intersect::ray_triangle(&ray, &triangle), Some(5.0));
/// ```
#[must_use]
pub fn ray_triangle(ray: &Ray, triangle: &Triangle) -> Option<f64> {
    let edge1 = triangle.v1() - triangle.v0();
    let edge2 = triangle.v2() - triangle.v0();

    let h = ray.direction.cross(&edge2);
    let det = edge1.dot(&h);
    // Two-sided: only the magnitude of the determinant matters. Near-zero
    // covers both parallel rays and degenerate triangles.
    if det.abs() < EPSILON {
        return None;
    }
    let inv_det = 1.0 / det;

    let s = ray.origin - triangle.v0();
    let u = s.dot(&h) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(&edge1);
    let v = ray.direction.dot(&q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = edge2.dot(&q) * inv_det;
    if t < 0.0 {
        return None;
    }
    Some(t)
}

/// Find the closest hit among a slice of triangles.
///
/// Returns `(t, index)` for the triangle with the smallest ray parameter, or
/// `None` when every triangle misses. `excluded` skips one triangle by index,
/// letting rays that start on a surface ignore that surface; an index outside
/// the slice excludes nothing.
#[must_use]
pub fn closest_hit(
    ray: &Ray,
    triangles: &[Triangle],
    excluded: Option<usize>,
) -> Option<(f64, usize)> {
    let mut best: Option<(f64, usize)> = None;
    for (index, triangle) in triangles.iter().enumerate() {
        if excluded == Some(index) {
            continue;
        }
        let Some(t) = ray_triangle(ray, triangle) else {
            continue;
        };
        let better = match best {
            Some((best_t, _)) => t < best_t,
            None => true,
        };
        if better {
            best = Some((t, index));
        }
    }
    best
}
