//! Ray and light traversal over canopy octrees.
//!
//! This crate walks rays through a built [`Octree`](canopy_octree::Octree)
//! front to back, visiting only the leaves along each ray:
//!
//! - [`first_hit`] / [`first_hit_excluding`] / [`hit_test`] - Closest-hit
//!   queries with optional self-exclusion
//! - [`visited_leaves`] - The leaves a ray passes through, in order
//! - [`reflect`] - Specular bounce of a ray off a triangle
//! - [`Light`] - A ray that remembers its last hit and steps bounce by bounce
//! - [`first_hits_par`] / [`line_of_sight`] / [`illuminated_triangles`] -
//!   Batch queries parallelized with rayon
//!
//! # Layer 2 Crate
//!
//! Depends on `canopy-types` (Layer 0) and `canopy-octree` (Layer 1). The
//! octree is immutable once built, so every query here takes `&Octree` and
//! batches fan out across threads without locking.
//!
//! # Exclusion
//!
//! Rays in a light simulation usually start on a surface: a reflected ray
//! begins at its hit point, and a shadow feeler begins at a triangle's
//! centroid. Passing that triangle's soup index as the excluded triangle
//! keeps such rays from reporting a zero-distance hit on the surface they
//! start on.
//!
//! # Example
//!
//! ```
//! use canopy_octree::{Octree, OctreeParams};
//! use canopy_trace::first_hit;
//! use canopy_types::{Point3, Ray, Triangle, Vector3};
//!
//! let leaf = Triangle::new(
//!     Point3::new(-1.0, 1.0, -1.0),
//!     Point3::new(1.0, 1.0, -1.0),
//!     Point3::new(0.0, 1.0, 1.0),
//! );
//! let octree = Octree::from_triangles(vec![leaf], &OctreeParams::default())?;
//!
//! let sun = Ray::new(Point3::new(0.0, 3.0, 0.0), Vector3::new(0.0, -1.0, 0.0));
//! let hit = first_hit(&octree, &sun).expect("the ray points at the leaf");
//!
//! assert!((hit.t - 2.0).abs() < 1e-9);
//! assert_eq!(hit.triangle, 0);
//! # Ok::<(), canopy_octree::OctreeError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod batch;
mod hit;
mod light;
mod reflect;
mod tracer;

pub use batch::{first_hits_par, illuminated_triangles, line_of_sight};
pub use hit::TraceHit;
pub use light::Light;
pub use reflect::reflect;
pub use tracer::{first_hit, first_hit_excluding, hit_test, visited_leaves};
