//! A light ray stepped through the scene one interaction at a time.

use canopy_octree::Octree;
use canopy_types::{Point3, Ray, Vector3};

use crate::hit::TraceHit;
use crate::reflect::reflect;
use crate::tracer::first_hit_excluding;

/// A ray of light that remembers its last interaction.
///
/// Each [`cast`](Light::cast) excludes the triangle recorded by the previous
/// cast, so a light sitting exactly on a surface never reports a
/// zero-distance self-hit. [`reflect_off_last_hit`](Light::reflect_off_last_hit)
/// re-aims the ray off the recorded surface and casts again, which steps the
/// light bounce by bounce through the canopy.
#[derive(Debug, Clone)]
pub struct Light {
    ray: Ray,
    last_hit: Option<TraceHit>,
}

impl Light {
    /// Create a light at `origin` travelling along `direction`.
    #[must_use]
    pub const fn new(origin: Point3<f64>, direction: Vector3<f64>) -> Self {
        Self {
            ray: Ray::new(origin, direction),
            last_hit: None,
        }
    }

    /// Current ray of the light.
    #[must_use]
    pub const fn ray(&self) -> &Ray {
        &self.ray
    }

    /// Hit recorded by the most recent cast, or `None` after a miss.
    #[must_use]
    pub const fn last_hit(&self) -> Option<&TraceHit> {
        self.last_hit.as_ref()
    }

    /// Cast the current ray into the octree and record the outcome.
    ///
    /// The triangle hit by the previous cast is excluded from this one. A
    /// miss clears the record, so the hit state always describes the latest
    /// cast. Returns whether a triangle was hit.
    pub fn cast(&mut self, octree: &Octree) -> bool {
        let excluded = self.last_hit.map(|hit| hit.triangle);
        self.last_hit = first_hit_excluding(octree, &self.ray, excluded);
        self.last_hit.is_some()
    }

    /// Bounce off the recorded hit and cast again.
    ///
    /// Moves the ray origin to the recorded hit point, mirrors the direction
    /// about the hit triangle's normal, and casts with that triangle
    /// excluded. Returns `false` without casting when no hit is recorded.
    pub fn reflect_off_last_hit(&mut self, octree: &Octree) -> bool {
        let Some(hit) = self.last_hit else {
            return false;
        };
        let Some(triangle) = octree.triangles().get(hit.triangle) else {
            return false;
        };
        self.ray = reflect(&self.ray, hit.t, triangle);
        self.cast(octree)
    }
}
