//! Specular reflection of rays off triangle surfaces.

use canopy_types::{Ray, Triangle};

/// Reflect a ray off the triangle it hit at parameter `t_hit`.
///
/// The returned ray starts at the hit point and travels in the incident
/// direction mirrored about the triangle's unit normal, `d - 2 (d . n) n`.
/// The triangle is two-sided, so either winding produces the same mirror. A
/// degenerate triangle carries a zero normal and leaves the direction
/// unchanged. Callers exclude the hit triangle on the next cast so the
/// reflected ray cannot re-hit the surface it starts on.
///
/// # Example
///
/// ```
/// use canopy_trace::reflect;
/// use canopy_types::{Point3, Ray, Triangle, Vector3};
///
/// let floor = Triangle::new(
///     Point3::new(-1.0, -1.0, 0.0),
///     Point3::new(1.0, -1.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// );
/// let ray = Ray::new(Point3::new(0.0, 0.0, 1.0), Vector3::new(0.0, 0.0, -1.0));
/// let bounced = reflect(&ray, 1.0, &floor);
///
/// assert_eq!(bounced.origin, Point3::new(0.0, 0.0, 0.0));
/// assert_eq!(bounced.direction, Vector3::new(0.0, 0.0, 1.0));
/// ```
#[must_use]
pub fn reflect(ray: &Ray, t_hit: f64, triangle: &Triangle) -> Ray {
    let normal = triangle.normal();
    let direction = ray.direction - normal * (2.0 * ray.direction.dot(&normal));
    Ray::new(ray.point_at(t_hit), direction)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use canopy_types::{Point3, Vector3};

    fn xy_floor() -> Triangle {
        Triangle::new(
            Point3::new(-10.0, -10.0, 0.0),
            Point3::new(10.0, -10.0, 0.0),
            Point3::new(0.0, 10.0, 0.0),
        )
    }

    #[test]
    fn test_normal_incidence_reverses_direction() {
        let ray = Ray::new(Point3::new(0.0, 0.0, 3.0), Vector3::new(0.0, 0.0, -1.0));
        let bounced = reflect(&ray, 3.0, &xy_floor());
        assert_eq!(bounced.direction, Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(bounced.origin, Point3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_oblique_incidence_mirrors_normal_component() {
        let ray = Ray::new(Point3::new(-1.0, 0.0, 1.0), Vector3::new(1.0, 0.0, -1.0));
        let bounced = reflect(&ray, 1.0, &xy_floor());
        assert_relative_eq!(bounced.direction.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(bounced.direction.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(bounced.direction.z, 1.0, epsilon = 1e-12);
        assert_eq!(bounced.origin, Point3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_reflection_is_an_involution_on_direction() {
        let floor = xy_floor();
        let ray = Ray::new(Point3::new(0.3, -0.2, 2.0), Vector3::new(0.4, 0.1, -1.0));
        let once = reflect(&ray, 2.0, &floor);
        let twice = reflect(&once, 0.0, &floor);
        assert_relative_eq!(twice.direction.x, ray.direction.x, epsilon = 1e-12);
        assert_relative_eq!(twice.direction.y, ray.direction.y, epsilon = 1e-12);
        assert_relative_eq!(twice.direction.z, ray.direction.z, epsilon = 1e-12);
    }

    #[test]
    fn test_opposite_winding_gives_same_mirror() {
        let flipped = Triangle::new(
            Point3::new(-10.0, -10.0, 0.0),
            Point3::new(0.0, 10.0, 0.0),
            Point3::new(10.0, -10.0, 0.0),
        );
        let ray = Ray::new(Point3::new(0.0, 0.0, 1.0), Vector3::new(0.2, -0.3, -1.0));
        let a = reflect(&ray, 1.0, &xy_floor());
        let b = reflect(&ray, 1.0, &flipped);
        assert_relative_eq!(a.direction.x, b.direction.x, epsilon = 1e-12);
        assert_relative_eq!(a.direction.y, b.direction.y, epsilon = 1e-12);
        assert_relative_eq!(a.direction.z, b.direction.z, epsilon = 1e-12);
    }

    #[test]
    fn test_degenerate_triangle_leaves_direction_unchanged() {
        let p = Point3::new(1.0, 1.0, 1.0);
        let degenerate = Triangle::new(p, p, p);
        let ray = Ray::new(Point3::origin(), Vector3::new(0.0, 1.0, 0.0));
        let bounced = reflect(&ray, 2.0, &degenerate);
        assert_eq!(bounced.direction, ray.direction);
        assert_eq!(bounced.origin, Point3::new(0.0, 2.0, 0.0));
    }

    #[test]
    fn test_reflection_preserves_direction_length() {
        let ray = Ray::new(Point3::origin(), Vector3::new(3.0, -2.0, -6.0));
        let bounced = reflect(&ray, 0.5, &xy_floor());
        assert_relative_eq!(bounced.direction.norm(), ray.direction.norm(), epsilon = 1e-12);
    }
}
