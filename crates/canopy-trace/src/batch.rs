//! Batch queries over a frozen octree.
//!
//! A built octree is immutable, so tracing shares it freely across threads.
//! These helpers fan independent casts out with rayon and collect the
//! per-input results in order.

use canopy_octree::Octree;
use canopy_types::{Point3, Ray, Vector3};
use rayon::prelude::*;
use tracing::info;

use crate::hit::TraceHit;
use crate::tracer::{first_hit, first_hit_excluding};

/// Cast a batch of rays in parallel.
///
/// The result vector is indexed like `rays`, with `None` for misses.
#[must_use]
pub fn first_hits_par(octree: &Octree, rays: &[Ray]) -> Vec<Option<TraceHit>> {
    rays.par_iter().map(|ray| first_hit(octree, ray)).collect()
}

/// Whether the segment from `from` to `to` is unobstructed.
///
/// `excluded` lets a receiving surface ignore itself. A triangle at or
/// beyond the destination does not obstruct the segment.
#[must_use]
pub fn line_of_sight(
    octree: &Octree,
    from: &Point3<f64>,
    to: &Point3<f64>,
    excluded: Option<usize>,
) -> bool {
    // With direction `to - from`, the destination sits at parameter 1.
    let ray = Ray::new(*from, to - from);
    match first_hit_excluding(octree, &ray, excluded) {
        Some(hit) => hit.t >= 1.0,
        None => true,
    }
}

/// Per-triangle shadow mask under a directional light.
///
/// `light_direction` is the direction the light travels. Each triangle casts
/// one ray from its centroid back toward the light with itself excluded; the
/// triangle is lit when that ray escapes unobstructed. Degenerate triangles
/// report unlit.
#[must_use]
pub fn illuminated_triangles(octree: &Octree, light_direction: &Vector3<f64>) -> Vec<bool> {
    let toward_light = -(*light_direction);
    let mask: Vec<bool> = octree
        .triangles()
        .par_iter()
        .enumerate()
        .map(|(index, triangle)| {
            if triangle.is_degenerate() {
                return false;
            }
            let ray = Ray::new(triangle.centroid(), toward_light);
            first_hit_excluding(octree, &ray, Some(index)).is_none()
        })
        .collect();

    let lit_count = mask.iter().filter(|&&lit| lit).count();
    info!(
        triangles = mask.len(),
        lit = lit_count,
        shadowed = mask.len() - lit_count,
        "Computed illumination mask"
    );
    mask
}
