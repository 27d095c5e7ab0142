//! Structure statistics for a built octree.

use std::fmt;

/// Shape summary of a built octree, from [`Octree::stats`](crate::Octree::stats).
#[derive(Debug, Default, Clone)]
pub struct OctreeStats {
    /// Number of internal nodes.
    pub branch_count: usize,
    /// Number of leaf nodes.
    pub leaf_count: usize,
    /// Depth of the deepest node. The root is at depth 0.
    pub max_depth: usize,
    /// Largest number of triangles listed in any one leaf.
    pub max_leaf_triangles: usize,
    /// Total triangle references across all leaves. Straddling triangles are
    /// listed in several sibling leaves, so this can exceed the soup size.
    pub total_triangle_refs: usize,
}

impl fmt::Display for OctreeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} branches, {} leaves, depth {}, largest leaf {}, {} triangle refs",
            self.branch_count,
            self.leaf_count,
            self.max_depth,
            self.max_leaf_triangles,
            self.total_triangle_refs
        )
    }
}
