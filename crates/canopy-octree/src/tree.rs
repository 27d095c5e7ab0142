//! Octree construction and point queries over a triangle soup.

use canopy_types::{Aabb, Point3, Triangle};
use smallvec::SmallVec;
use tracing::{debug, info, warn};

use crate::node::OctreeNode;
use crate::octant::{self, OctantCandidates};
use crate::{NodePath, OctreeError, OctreeParams, OctreeResult, OctreeStats};

/// Spatial index over a triangle soup.
///
/// The root box is recursively split into eight octants until the
/// [`OctreeParams`](crate::OctreeParams) policy stops subdivision; each leaf
/// lists the triangles whose bounding boxes overlap it. The octree owns its
/// soup and is immutable once built, so any number of threads may traverse
/// it concurrently. Rebuild it when the geometry changes.
///
/// # Example
///
/// ```
/// use canopy_octree::{Octree, OctreeParams};
/// use canopy_types::{Point3, Triangle};
///
/// let soup = vec![Triangle::new(
///     Point3::new(0.2, 0.2, 0.2),
///     Point3::new(0.8, 0.2, 0.2),
///     Point3::new(0.5, 0.8, 0.8),
/// )];
/// let params = OctreeParams::default().max_depth(1).max_leaf_triangles(0);
/// let octree = Octree::from_triangles(soup, &params)?;
///
/// let stats = octree.stats();
/// assert_eq!(stats.branch_count, 1);
/// assert_eq!(stats.leaf_count, 8);
/// # Ok::<(), canopy_octree::OctreeError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Octree {
    root: OctreeNode,
    triangles: Vec<Triangle>,
    params: OctreeParams,
}

impl Octree {
    /// Build an octree over `triangles` inside the given root bounds.
    ///
    /// Triangles whose bounding boxes do not overlap the root bounds stay in
    /// the soup but are not indexed; they are logged and never reported by
    /// traversal.
    ///
    /// # Errors
    ///
    /// Returns [`OctreeError::InvalidParams`] for an unusable policy and
    /// [`OctreeError::InvalidBounds`] when the root box is non-finite or has
    /// no volume.
    pub fn build(
        bounds: Aabb,
        triangles: Vec<Triangle>,
        params: &OctreeParams,
    ) -> OctreeResult<Self> {
        params.validate()?;
        validate_root_bounds(&bounds)?;

        let mut indexed: Vec<u32> = Vec::with_capacity(triangles.len());
        let mut dropped = 0_usize;
        for (index, triangle) in triangles.iter().enumerate() {
            if triangle.bounds().intersects(&bounds) {
                indexed.push(index as u32);
            } else {
                dropped += 1;
            }
        }
        if dropped > 0 {
            warn!(
                count = dropped,
                total = triangles.len(),
                "Triangles outside the root bounds were not indexed"
            );
        }
        debug!(
            indexed = indexed.len(),
            max_depth = params.max_depth,
            max_leaf_triangles = params.max_leaf_triangles,
            "Subdividing root bounds"
        );

        let root = build_node(NodePath::root(), bounds, &triangles, indexed, params);
        let octree = Self {
            root,
            triangles,
            params: params.clone(),
        };
        debug_assert!(octree.validate().is_ok());

        let stats = octree.stats();
        info!(
            triangles = octree.triangles.len(),
            branches = stats.branch_count,
            leaves = stats.leaf_count,
            max_depth = stats.max_depth,
            "Octree built"
        );
        Ok(octree)
    }

    /// Build an octree with root bounds fitted to the soup.
    ///
    /// The root box is the union of the triangle bounds, with flat axes
    /// padded so planar geometry still yields a box with volume. An empty
    /// soup builds a single empty leaf that reports no hit for every query.
    ///
    /// # Errors
    ///
    /// Returns [`OctreeError::InvalidParams`] for an unusable policy and
    /// [`OctreeError::InvalidBounds`] when the soup contains non-finite
    /// coordinates.
    pub fn from_triangles(triangles: Vec<Triangle>, params: &OctreeParams) -> OctreeResult<Self> {
        let bounds = fitted_bounds(&triangles);
        Self::build(bounds, triangles, params)
    }

    /// The root node.
    #[must_use]
    pub const fn root(&self) -> &OctreeNode {
        &self.root
    }

    /// The root bounds.
    #[must_use]
    pub const fn bounds(&self) -> &Aabb {
        self.root.bounds()
    }

    /// The triangle soup, in the order it was supplied.
    #[must_use]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// A triangle by soup index.
    #[must_use]
    pub fn triangle(&self, index: u32) -> Option<&Triangle> {
        self.triangles.get(index as usize)
    }

    /// Number of triangles in the soup, indexed or not.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Whether the soup is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// The parameters the octree was built with.
    #[must_use]
    pub const fn params(&self) -> &OctreeParams {
        &self.params
    }

    /// The node addressed by `path`, or `None` when no such node exists.
    #[must_use]
    pub fn node_at(&self, path: &NodePath) -> Option<&OctreeNode> {
        let mut node = &self.root;
        for &octant in path.octants() {
            node = node.children()?.get(usize::from(octant))?;
        }
        Some(node)
    }

    /// Descend to the leaf whose box contains `point`.
    ///
    /// Returns `None` when the point lies outside the root bounds. Points on
    /// a Y splitting plane belong to two sibling boxes; the descent then
    /// avoids the child leading toward `excluded` (the leaf a traversal just
    /// left) and otherwise takes the lower-indexed child.
    #[must_use]
    pub fn leaf_containing(
        &self,
        point: &Point3<f64>,
        excluded: Option<&NodePath>,
    ) -> Option<&OctreeNode> {
        if !self.root.bounds().contains(point) {
            return None;
        }
        let mut node = &self.root;
        while let Some(children) = node.children() {
            let candidates = octant::candidates(&(*point - node.bounds().center()));
            let chosen = choose_candidate(node.path(), candidates, excluded);
            node = &children[usize::from(chosen)];
        }
        Some(node)
    }

    /// Iterate over all leaves, depth first in octant order.
    #[must_use]
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves {
            stack: vec![&self.root],
        }
    }

    /// Shape summary of the tree.
    #[must_use]
    pub fn stats(&self) -> OctreeStats {
        let mut stats = OctreeStats::default();
        collect_stats(&self.root, &mut stats);
        stats
    }

    /// Recheck the structural invariants of the built tree.
    ///
    /// Verifies that every branch's children carry consistent paths and tile
    /// the branch bounds exactly, and that every leaf lists only in-range
    /// triangle indices whose bounds overlap the leaf.
    ///
    /// # Errors
    ///
    /// Returns [`OctreeError::InvalidPartition`] naming the first offending
    /// node, or [`OctreeError::InvalidBounds`] when the root box itself is
    /// unusable.
    pub fn validate(&self) -> OctreeResult<()> {
        validate_root_bounds(self.root.bounds())?;
        if !self.root.path().is_root() {
            return Err(OctreeError::invalid_partition(self.root.path().clone()));
        }
        validate_node(&self.root, &self.triangles)
    }
}

/// Depth-first leaf iterator, from [`Octree::leaves`].
#[derive(Debug, Clone)]
pub struct Leaves<'a> {
    stack: Vec<&'a OctreeNode>,
}

impl<'a> Iterator for Leaves<'a> {
    type Item = &'a OctreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            match node.children() {
                Some(children) => self.stack.extend(children.iter().rev()),
                None => return Some(node),
            }
        }
        None
    }
}

fn build_node(
    path: NodePath,
    bounds: Aabb,
    triangles: &[Triangle],
    indices: Vec<u32>,
    params: &OctreeParams,
) -> OctreeNode {
    if stays_leaf(&path, &bounds, indices.len(), params) {
        return OctreeNode::leaf(path, bounds, SmallVec::from_vec(indices));
    }

    let child_bounds: [Aabb; 8] =
        std::array::from_fn(|octant| octant::child_bounds(&bounds, octant as u8));
    let mut per_child: [Vec<u32>; 8] = std::array::from_fn(|_| Vec::new());
    for &index in &indices {
        let triangle_bounds = triangles[index as usize].bounds();
        for (child, list) in child_bounds.iter().zip(&mut per_child) {
            if child.intersects(&triangle_bounds) {
                list.push(index);
            }
        }
    }

    let children = Box::new(std::array::from_fn(|octant| {
        build_node(
            path.child(octant as u8),
            child_bounds[octant],
            triangles,
            std::mem::take(&mut per_child[octant]),
            params,
        )
    }));
    OctreeNode::branch(path, bounds, children)
}

fn stays_leaf(path: &NodePath, bounds: &Aabb, triangle_count: usize, params: &OctreeParams) -> bool {
    if triangle_count <= params.max_leaf_triangles {
        return true;
    }
    if path.depth() >= params.max_depth as usize {
        return true;
    }
    if params.min_cell_extent > 0.0 {
        let size = bounds.size();
        let smallest = size.x.min(size.y).min(size.z);
        if smallest * 0.5 < params.min_cell_extent {
            return true;
        }
    }
    false
}

fn choose_candidate(
    path: &NodePath,
    candidates: OctantCandidates,
    excluded: Option<&NodePath>,
) -> u8 {
    let Some(second) = candidates.second() else {
        return candidates.first();
    };
    let toward = excluded.and_then(|target| path.step_toward(target));
    if toward == Some(candidates.first()) {
        second
    } else {
        candidates.first()
    }
}

fn fitted_bounds(triangles: &[Triangle]) -> Aabb {
    if triangles.is_empty() {
        return Aabb::new(Point3::new(-0.5, -0.5, -0.5), Point3::new(0.5, 0.5, 0.5));
    }

    let mut bounds = Aabb::empty();
    for triangle in triangles {
        bounds = bounds.union(&triangle.bounds());
    }

    let size = bounds.size();
    let largest = size.x.max(size.y).max(size.z);
    let pad = if largest.is_finite() && largest > 0.0 {
        largest * 0.5
    } else {
        0.5
    };
    for axis in 0..3 {
        if bounds.max[axis] - bounds.min[axis] <= 0.0 {
            bounds.min[axis] -= pad;
            bounds.max[axis] += pad;
        }
    }
    bounds
}

fn validate_root_bounds(bounds: &Aabb) -> OctreeResult<()> {
    let finite = bounds.min.coords.iter().all(|c| c.is_finite())
        && bounds.max.coords.iter().all(|c| c.is_finite());
    if !finite {
        return Err(OctreeError::invalid_bounds(format!(
            "non-finite corner: min {:?}, max {:?}",
            bounds.min, bounds.max
        )));
    }
    if bounds.is_degenerate() {
        return Err(OctreeError::invalid_bounds(
            "zero extent along at least one axis",
        ));
    }
    Ok(())
}

fn collect_stats(node: &OctreeNode, stats: &mut OctreeStats) {
    stats.max_depth = stats.max_depth.max(node.depth());
    match node.children() {
        Some(children) => {
            stats.branch_count += 1;
            for child in children {
                collect_stats(child, stats);
            }
        }
        None => {
            stats.leaf_count += 1;
            let count = node.triangle_indices().len();
            stats.total_triangle_refs += count;
            stats.max_leaf_triangles = stats.max_leaf_triangles.max(count);
        }
    }
}

fn validate_node(node: &OctreeNode, triangles: &[Triangle]) -> OctreeResult<()> {
    let invalid = || OctreeError::invalid_partition(node.path().clone());
    match node.children() {
        Some(children) => {
            let mut union = Aabb::empty();
            for (octant, child) in children.iter().enumerate() {
                if *child.path() != node.path().child(octant as u8) {
                    return Err(invalid());
                }
                if *child.bounds() != octant::child_bounds(node.bounds(), octant as u8) {
                    return Err(invalid());
                }
                union = union.union(child.bounds());
                validate_node(child, triangles)?;
            }
            if union != *node.bounds() {
                return Err(invalid());
            }
            Ok(())
        }
        None => {
            for &index in node.triangle_indices() {
                let Some(triangle) = triangles.get(index as usize) else {
                    return Err(invalid());
                };
                if !triangle.bounds().intersects(node.bounds()) {
                    return Err(invalid());
                }
            }
            Ok(())
        }
    }
}
