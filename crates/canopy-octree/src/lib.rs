//! Octree spatial index for canopy light transport.
//!
//! Builds a bounded octree over a triangle soup: the root box is split into
//! eight octants per node until the configured policy stops subdivision, and
//! each leaf lists the triangles overlapping its box. Nodes are addressed by
//! [`NodePath`], the sequence of octant indices from the root, so identity
//! and ancestry are plain slice comparisons. Once built the tree is
//! immutable and safe to share across threads.
//!
//! # Layer 1 Crate
//!
//! Depends only on `canopy-types`. Consumed by `canopy-trace`, which walks
//! the leaves along a ray.
//!
//! # Example
//!
//! ```
//! use canopy_octree::{NodePath, Octree, OctreeParams};
//! use canopy_types::{Aabb, Point3, Triangle};
//!
//! let root = Aabb::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0));
//! let soup = vec![Triangle::new(
//!     Point3::new(0.2, 0.2, 0.2),
//!     Point3::new(0.8, 0.2, 0.2),
//!     Point3::new(0.5, 0.8, 0.8),
//! )];
//! let params = OctreeParams::default().max_depth(1).max_leaf_triangles(0);
//! let octree = Octree::build(root, soup, &params)?;
//!
//! // The triangle sits above the root center on every axis: octant 1.
//! let leaf = octree
//!     .leaf_containing(&Point3::new(0.5, 0.5, 0.5), None)
//!     .expect("point is inside the root bounds");
//! assert_eq!(leaf.path(), &NodePath::from_octants([1]));
//! assert_eq!(leaf.triangle_indices(), &[0]);
//! # Ok::<(), canopy_octree::OctreeError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod octant;

mod error;
mod node;
mod params;
mod path;
mod stats;
mod tree;

pub use error::{OctreeError, OctreeResult};
pub use node::OctreeNode;
pub use params::OctreeParams;
pub use path::NodePath;
pub use stats::OctreeStats;
pub use tree::{Leaves, Octree};
