//! Parameters for octree construction.

use crate::error::{OctreeError, OctreeResult};

/// Parameters controlling when construction stops subdividing a node.
///
/// A node stays a leaf when any rule fires: its triangle count is already at
/// or below `max_leaf_triangles`, it sits at `max_depth`, or splitting it
/// would produce cells thinner than `min_cell_extent`.
///
/// # Example
///
/// ```
/// use canopy_octree::OctreeParams;
///
/// // Default parameters (depth 8, 16 triangles per leaf)
/// let params = OctreeParams::default();
/// assert_eq!(params.max_depth, 8);
/// assert_eq!(params.max_leaf_triangles, 16);
///
/// // Dense-canopy parameters subdivide further
/// let dense = OctreeParams::for_dense_canopy();
/// assert_eq!(dense.max_depth, 10);
/// assert_eq!(dense.max_leaf_triangles, 8);
/// ```
#[derive(Debug, Clone)]
pub struct OctreeParams {
    /// Nodes at this depth are never subdivided. The root is at depth 0.
    pub max_depth: u32,

    /// A node holding at most this many triangles stays a leaf.
    pub max_leaf_triangles: usize,

    /// Smallest allowed cell extent along any axis. Subdivision stops before
    /// producing thinner cells. Set to 0 to disable.
    pub min_cell_extent: f64,
}

impl Default for OctreeParams {
    fn default() -> Self {
        Self {
            max_depth: 8,
            max_leaf_triangles: 16,
            min_cell_extent: 0.0,
        }
    }
}

impl OctreeParams {
    /// Create params for dense, heavily overlapping canopies.
    ///
    /// Subdivides deeper with smaller leaves, trading build time for fewer
    /// triangle tests per ray.
    #[must_use]
    pub const fn for_dense_canopy() -> Self {
        Self {
            max_depth: 10,
            max_leaf_triangles: 8,
            min_cell_extent: 0.0,
        }
    }

    /// Set the maximum depth.
    #[must_use]
    pub const fn max_depth(mut self, depth: u32) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set the leaf triangle threshold.
    #[must_use]
    pub const fn max_leaf_triangles(mut self, count: usize) -> Self {
        self.max_leaf_triangles = count;
        self
    }

    /// Set the minimum cell extent.
    #[must_use]
    pub const fn min_cell_extent(mut self, extent: f64) -> Self {
        self.min_cell_extent = extent;
        self
    }

    pub(crate) fn validate(&self) -> OctreeResult<()> {
        if !self.min_cell_extent.is_finite() || self.min_cell_extent < 0.0 {
            return Err(OctreeError::invalid_params(format!(
                "min_cell_extent must be finite and non-negative, got {}",
                self.min_cell_extent
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = OctreeParams::default();
        assert_eq!(params.max_depth, 8);
        assert_eq!(params.max_leaf_triangles, 16);
        assert!(params.min_cell_extent.abs() < f64::EPSILON);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_dense_canopy_params() {
        let params = OctreeParams::for_dense_canopy();
        assert_eq!(params.max_depth, 10);
        assert_eq!(params.max_leaf_triangles, 8);
    }

    #[test]
    fn test_builder_pattern() {
        let params = OctreeParams::default()
            .max_depth(4)
            .max_leaf_triangles(2)
            .min_cell_extent(0.25);

        assert_eq!(params.max_depth, 4);
        assert_eq!(params.max_leaf_triangles, 2);
        assert!((params.min_cell_extent - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_validate_rejects_bad_extent() {
        assert!(OctreeParams::default().min_cell_extent(-1.0).validate().is_err());
        assert!(OctreeParams::default().min_cell_extent(f64::NAN).validate().is_err());
        assert!(OctreeParams::default()
            .min_cell_extent(f64::INFINITY)
            .validate()
            .is_err());
    }
}
