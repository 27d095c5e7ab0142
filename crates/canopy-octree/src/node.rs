//! Octree node: a bounded region of space, subdivided or leaf.

use canopy_types::Aabb;
use smallvec::SmallVec;

use crate::NodePath;

/// One node of an octree.
///
/// A branch owns exactly eight children, one per octant of its box; a leaf
/// owns the indices of the triangles overlapping its box. Nodes never point
/// back at their parents. Lineage lives entirely in the [`NodePath`], and
/// node equality is path equality.
#[derive(Debug, Clone)]
pub struct OctreeNode {
    path: NodePath,
    bounds: Aabb,
    kind: NodeKind,
}

#[derive(Debug, Clone)]
enum NodeKind {
    Branch { children: Box<[OctreeNode; 8]> },
    Leaf { triangles: SmallVec<[u32; 8]> },
}

impl OctreeNode {
    pub(crate) fn branch(path: NodePath, bounds: Aabb, children: Box<[OctreeNode; 8]>) -> Self {
        Self {
            path,
            bounds,
            kind: NodeKind::Branch { children },
        }
    }

    pub(crate) fn leaf(path: NodePath, bounds: Aabb, triangles: SmallVec<[u32; 8]>) -> Self {
        Self {
            path,
            bounds,
            kind: NodeKind::Leaf { triangles },
        }
    }

    /// The region of space this node covers.
    #[must_use]
    pub const fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    /// The node's identity: octant steps from the root.
    #[must_use]
    pub const fn path(&self) -> &NodePath {
        &self.path
    }

    /// Distance from the root. The root has depth 0.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.path.depth()
    }

    /// Whether this node has no children.
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { .. })
    }

    /// The eight children of a branch, or `None` for a leaf.
    #[must_use]
    pub fn children(&self) -> Option<&[OctreeNode; 8]> {
        match &self.kind {
            NodeKind::Branch { children } => Some(children),
            NodeKind::Leaf { .. } => None,
        }
    }

    /// Indices into the octree's triangle soup. Empty for branches.
    #[must_use]
    pub fn triangle_indices(&self) -> &[u32] {
        match &self.kind {
            NodeKind::Branch { .. } => &[],
            NodeKind::Leaf { triangles } => triangles,
        }
    }
}

/// Nodes are equal when their paths are equal. Within one tree the path
/// determines the bounds and contents.
impl PartialEq for OctreeNode {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for OctreeNode {}
