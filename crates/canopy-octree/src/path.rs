//! Path-based node identity.

use smallvec::SmallVec;
use std::fmt;

/// Identity of an octree node: the octant indices walked from the root.
///
/// The root has the empty path. Two nodes are the same node exactly when
/// their paths are equal, and ancestry is a prefix relation on paths, so no
/// node ever needs a pointer to its parent.
///
/// # Example
///
/// ```
/// use canopy_octree::NodePath;
///
/// let leaf = NodePath::root().child(3).child(1);
/// assert_eq!(leaf.depth(), 2);
/// assert_eq!(leaf.octants(), &[3, 1]);
/// assert!(NodePath::root().is_ancestor_of(&leaf));
/// assert_eq!(leaf.to_string(), "/3/1");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodePath {
    octants: SmallVec<[u8; 16]>,
}

impl NodePath {
    /// The empty path of the root node.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Build a path from octant indices, root first.
    #[must_use]
    pub fn from_octants(octants: impl IntoIterator<Item = u8>) -> Self {
        let octants: SmallVec<[u8; 16]> = octants.into_iter().collect();
        debug_assert!(octants.iter().all(|&octant| octant < 8));
        Self { octants }
    }

    /// Number of steps from the root. The root has depth 0.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.octants.len()
    }

    /// Whether this is the root path.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.octants.is_empty()
    }

    /// The octant indices, root first.
    #[must_use]
    pub fn octants(&self) -> &[u8] {
        &self.octants
    }

    /// The final step, or `None` for the root.
    #[must_use]
    pub fn last(&self) -> Option<u8> {
        self.octants.last().copied()
    }

    /// The path of the given child octant.
    #[must_use]
    pub fn child(&self, octant: u8) -> Self {
        debug_assert!(octant < 8);
        let mut octants = self.octants.clone();
        octants.push(octant);
        Self { octants }
    }

    /// The parent path, or `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        let mut octants = self.octants.clone();
        octants.pop();
        Some(Self { octants })
    }

    /// Whether this path is a strict prefix of `other`.
    #[must_use]
    pub fn is_ancestor_of(&self, other: &Self) -> bool {
        other.depth() > self.depth() && other.octants.starts_with(&self.octants)
    }

    /// The child octant of this node on the way to `descendant`.
    ///
    /// `None` when `descendant` does not lie strictly below this path.
    #[must_use]
    pub fn step_toward(&self, descendant: &Self) -> Option<u8> {
        if !descendant.octants.starts_with(&self.octants) {
            return None;
        }
        descendant.octants.get(self.depth()).copied()
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return f.write_str("/");
        }
        for octant in &self.octants {
            write!(f, "/{octant}")?;
        }
        Ok(())
    }
}
