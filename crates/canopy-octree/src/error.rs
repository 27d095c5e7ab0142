//! Error types for octree construction and validation.

use thiserror::Error;

use crate::NodePath;

/// Result type alias for octree operations.
pub type OctreeResult<T> = Result<T, OctreeError>;

/// Errors reported while building or validating an octree.
///
/// Only construction can fail. Traversal queries are total and answer
/// "no hit" for degenerate input instead of erroring.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OctreeError {
    /// Root bounding box is unusable for subdivision.
    #[error("invalid root bounds: {0}")]
    InvalidBounds(String),

    /// Construction parameters fail validation.
    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    /// A node violates the partition or path invariants.
    #[error("node {path} violates the octree partition invariants")]
    InvalidPartition {
        /// Path of the offending node.
        path: NodePath,
    },
}

impl OctreeError {
    /// Create an invalid bounds error.
    #[must_use]
    pub fn invalid_bounds(details: impl Into<String>) -> Self {
        Self::InvalidBounds(details.into())
    }

    /// Create an invalid params error.
    #[must_use]
    pub fn invalid_params(details: impl Into<String>) -> Self {
        Self::InvalidParams(details.into())
    }

    /// Create an invalid partition error for the node at `path`.
    #[must_use]
    pub const fn invalid_partition(path: NodePath) -> Self {
        Self::InvalidPartition { path }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = OctreeError::invalid_bounds("zero volume along x");
        assert!(format!("{err}").contains("zero volume"));

        let err = OctreeError::invalid_params("negative extent");
        assert!(format!("{err}").contains("negative extent"));

        let err = OctreeError::invalid_partition(NodePath::from_octants([3, 1]));
        assert!(format!("{err}").contains("/3/1"));
    }
}
