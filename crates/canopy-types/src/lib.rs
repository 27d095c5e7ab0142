//! Geometry primitives for canopy light transport.
//!
//! This crate provides the foundational types shared by the canopy octree and
//! ray tracer:
//!
//! - [`Ray`] - An origin and a travel direction, evaluated parametrically
//! - [`Aabb`] - Axis-aligned bounding box with a slab ray test
//! - [`Triangle`] - World-space triangle with a precomputed unit normal
//! - [`intersect`] - Ray-triangle tests and closest-hit scans
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with no dependencies beyond linear algebra. It can
//! be used in:
//! - CLI tools
//! - Web applications (WASM)
//! - Servers
//! - Simulation engines
//!
//! # Units
//!
//! This library is unit-agnostic. All coordinates are `f64`. Ray parameters
//! are expressed in units of the ray's direction length, so a unit-length
//! direction makes `t` a metric distance.
//!
//! # Coordinate System
//!
//! Uses a right-handed coordinate system with the canopy growing along Y:
//! - X: width (left/right)
//! - Y: height (up/down)
//! - Z: depth (front/back)
//!
//! Face winding is counter-clockwise when viewed from the side the normal
//! points toward, by the right-hand rule over `v0 -> v1 -> v2`.
//!
//! # Example
//!
//! ```
//! use canopy_types::{intersect, Point3, Ray, Triangle, Vector3};
//!
//! let leaf = Triangle::new(
//!     Point3::new(-1.0, 0.0, -1.0),
//!     Point3::new(1.0, 0.0, -1.0),
//!     Point3::new(0.0, 0.0, 1.0),
//! );
//! let ray = Ray::new(Point3::new(0.0, 2.0, 0.0), Vector3::new(0.0, -1.0, 0.0));
//!
//! let t = intersect::ray_triangle(&ray, &leaf).expect("the ray crosses the leaf");
//! assert!((t - 2.0).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod aabb;
pub mod intersect;
mod ray;
mod triangle;

pub use aabb::Aabb;
pub use intersect::{closest_hit, ray_triangle};
pub use ray::Ray;
pub use triangle::Triangle;

// Re-export the nalgebra types used throughout the public API.
pub use nalgebra::{Point3, Vector3};
