//! Front-to-back ray traversal of an octree.
//!
//! A cast seeks the ray's entry into the root cell, then repeatedly locates
//! the leaf containing the current point, tests that leaf's triangles, and
//! advances just past the leaf's exit. Each descent after the first is told
//! which leaf the ray just left, so classification ties on splitting planes
//! resolve away from it instead of revisiting it.

use canopy_octree::{NodePath, Octree, OctreeNode};
use canopy_types::{ray_triangle, Ray};

use crate::hit::TraceHit;

/// Relative step past a leaf's exit parameter.
///
/// Scaled by the exit magnitude so the nudge stays meaningful far from the
/// origin, with an absolute floor near zero.
const ADVANCE_EPSILON: f64 = 1e-5;

fn advance(exit: f64) -> f64 {
    exit + ADVANCE_EPSILON * exit.abs().max(1.0)
}

/// Whether the ray hits any triangle in the octree.
#[must_use]
pub fn hit_test(octree: &Octree, ray: &Ray) -> bool {
    first_hit(octree, ray).is_some()
}

/// The closest triangle intersection along the ray, if any.
///
/// Only forward intersections (`t >= 0`) count. Degenerate triangles and
/// rays that never enter the root bounds report no hit.
#[must_use]
pub fn first_hit(octree: &Octree, ray: &Ray) -> Option<TraceHit> {
    first_hit_excluding(octree, ray, None)
}

/// The closest intersection along the ray, ignoring one triangle.
///
/// `excluded` names a soup index to skip, typically the triangle the ray
/// originates on. A ray starting exactly on its excluded triangle therefore
/// never reports a zero-distance hit on it.
#[must_use]
pub fn first_hit_excluding(
    octree: &Octree,
    ray: &Ray,
    excluded: Option<usize>,
) -> Option<TraceHit> {
    for leaf in RayLeaves::new(octree, ray) {
        if let Some(hit) = closest_in_leaf(octree, ray, leaf, excluded) {
            return Some(hit);
        }
    }
    None
}

/// The leaves the ray passes through, in traversal order.
///
/// Front-to-back along the ray, starting at the origin when it lies inside
/// the root bounds. Empty when the ray misses the root entirely.
#[must_use]
pub fn visited_leaves<'a>(octree: &'a Octree, ray: &Ray) -> Vec<&'a OctreeNode> {
    RayLeaves::new(octree, ray).collect()
}

/// Closest accepted intersection among one leaf's triangles.
///
/// Straddling triangles are listed in every leaf they touch; crediting a hit
/// only to the leaf containing the hit point keeps the walk front-to-back
/// and counts each intersection once.
fn closest_in_leaf(
    octree: &Octree,
    ray: &Ray,
    leaf: &OctreeNode,
    excluded: Option<usize>,
) -> Option<TraceHit> {
    let mut best: Option<TraceHit> = None;
    for &index in leaf.triangle_indices() {
        if excluded == Some(index as usize) {
            continue;
        }
        let Some(triangle) = octree.triangle(index) else {
            continue;
        };
        let Some(t) = ray_triangle(ray, triangle) else {
            continue;
        };
        let point = ray.point_at(t);
        if !leaf.bounds().contains(&point) {
            continue;
        }
        let better = match best {
            Some(current) => t < current.t,
            None => true,
        };
        if better {
            best = Some(TraceHit::new(t, index as usize, point, triangle.normal()));
        }
    }
    best
}

/// Iterator over the leaves a ray passes through, front to back.
struct RayLeaves<'a> {
    octree: &'a Octree,
    ray: Ray,
    t: f64,
    root_exit: f64,
    exited: Option<NodePath>,
    done: bool,
}

impl<'a> RayLeaves<'a> {
    fn new(octree: &'a Octree, ray: &Ray) -> Self {
        let slab = octree.bounds().intersect_ray(ray);
        let (entry, root_exit) = slab.unwrap_or((0.0, 0.0));
        Self {
            octree,
            ray: *ray,
            // A negative entry parameter means the origin is already inside.
            t: entry.max(0.0),
            root_exit,
            exited: None,
            done: slab.is_none(),
        }
    }
}

impl<'a> Iterator for RayLeaves<'a> {
    type Item = &'a OctreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let point = self.ray.point_at(self.t);
        let Some(leaf) = self.octree.leaf_containing(&point, self.exited.as_ref()) else {
            self.done = true;
            return None;
        };
        // Stage the next parameter before yielding. The walk ends once it
        // cannot advance strictly forward or would leave the root.
        match leaf.bounds().intersect_ray(&self.ray) {
            Some((_, exit)) if exit.is_finite() => {
                let next = advance(exit);
                if next <= self.t || next > self.root_exit {
                    self.done = true;
                } else {
                    self.t = next;
                    self.exited = Some(leaf.path().clone());
                }
            }
            _ => self.done = true,
        }
        Some(leaf)
    }
}

// ============================================================
// Tests
// ============================================================
