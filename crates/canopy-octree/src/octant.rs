//! Octant classification and child-box layout.
//!
//! An internal node splits its box at the center into eight octants, numbered
//! `0..8`. The number encodes the sign of each axis relative to the center:
//! `+4` when y is below, `+2` when x is below, `+1` when z is above. A point
//! on a splitting plane must still land in exactly one child box, so the
//! classification breaks Z and X ties deterministically (toward `z` below and
//! `x` above). A Y tie is the one deliberate ambiguity: it reports both the
//! upper and lower octant, and traversal picks between them (see
//! `Octree::leaf_containing`).

use canopy_types::{Aabb, Point3, Vector3};

/// Number of children of an internal node.
pub const OCTANT_COUNT: usize = 8;

/// Result of classifying a point against a node center.
///
/// Holds one octant, or two when the point sits exactly on the Y splitting
/// plane. The lower index always comes first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OctantCandidates {
    first: u8,
    second: Option<u8>,
}

impl OctantCandidates {
    const fn single(octant: u8) -> Self {
        Self {
            first: octant,
            second: None,
        }
    }

    const fn tie(first: u8, second: u8) -> Self {
        Self {
            first,
            second: Some(second),
        }
    }

    /// The lower-indexed candidate.
    #[must_use]
    pub const fn first(&self) -> u8 {
        self.first
    }

    /// The higher-indexed candidate, present only on a Y-plane tie.
    #[must_use]
    pub const fn second(&self) -> Option<u8> {
        self.second
    }

    /// Whether the point sat exactly on the Y splitting plane.
    #[must_use]
    pub const fn is_tie(&self) -> bool {
        self.second.is_some()
    }
}

impl IntoIterator for OctantCandidates {
    type Item = u8;
    type IntoIter = std::iter::Chain<std::iter::Once<u8>, std::option::IntoIter<u8>>;

    fn into_iter(self) -> Self::IntoIter {
        std::iter::once(self.first).chain(self.second)
    }
}

/// Classify an offset from a node center into octant candidates.
///
/// Sign tests run in Y, Z, X order: start from octant 3 (above center),
/// or 7 (below), or both on a Y tie; subtract 1 when `z <= 0`; subtract 2
/// when `x >= 0`. The Z and X rules are inclusive on one side so plane
/// points resolve to the child box that contains them. A NaN component
/// follows the same comparisons, so the result is never empty.
///
/// # Example
///
/// ```
/// use canopy_octree::octant;
/// use canopy_types::Vector3;
///
/// assert_eq!(octant::candidates(&Vector3::new(1.0, 1.0, 1.0)).first(), 1);
/// assert_eq!(octant::candidates(&Vector3::new(-1.0, -1.0, -1.0)).first(), 6);
///
/// let tie = octant::candidates(&Vector3::new(1.0, 0.0, 1.0));
/// assert_eq!((tie.first(), tie.second()), (1, Some(5)));
/// ```
#[must_use]
pub fn candidates(offset: &Vector3<f64>) -> OctantCandidates {
    let mut index: u8 = 3;
    if offset.z <= 0.0 {
        index -= 1;
    }
    if offset.x >= 0.0 {
        index -= 2;
    }

    if offset.y > 0.0 {
        OctantCandidates::single(index)
    } else if offset.y < 0.0 {
        OctantCandidates::single(index + 4)
    } else {
        OctantCandidates::tie(index, index + 4)
    }
}

/// The box of one octant of a parent box.
///
/// Children tile the parent exactly: each child shares the parent corner on
/// its side and the parent center on the other, so sibling boxes touch on
/// the splitting planes and their union reproduces the parent bit for bit.
#[must_use]
pub fn child_bounds(parent: &Aabb, octant: u8) -> Aabb {
    debug_assert!(usize::from(octant) < OCTANT_COUNT);
    let center = parent.center();

    let (x_min, x_max) = if octant & 0b010 == 0 {
        (center.x, parent.max.x)
    } else {
        (parent.min.x, center.x)
    };
    let (y_min, y_max) = if octant & 0b100 == 0 {
        (center.y, parent.max.y)
    } else {
        (parent.min.y, center.y)
    };
    let (z_min, z_max) = if octant & 0b001 == 0 {
        (parent.min.z, center.z)
    } else {
        (center.z, parent.max.z)
    };

    Aabb::new(
        Point3::new(x_min, y_min, z_min),
        Point3::new(x_max, y_max, z_max),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    // =========================================================================
    // Classification
    // =========================================================================

    #[test]
    fn test_all_eight_strict_octants() {
        // (offset, expected octant) for every sign combination off the planes.
        let cases = [
            (Vector3::new(1.0, 1.0, -1.0), 0),
            (Vector3::new(1.0, 1.0, 1.0), 1),
            (Vector3::new(-1.0, 1.0, -1.0), 2),
            (Vector3::new(-1.0, 1.0, 1.0), 3),
            (Vector3::new(1.0, -1.0, -1.0), 4),
            (Vector3::new(1.0, -1.0, 1.0), 5),
            (Vector3::new(-1.0, -1.0, -1.0), 6),
            (Vector3::new(-1.0, -1.0, 1.0), 7),
        ];
        for (offset, expected) in cases {
            let result = candidates(&offset);
            assert_eq!(result.first(), expected, "offset {offset:?}");
            assert!(!result.is_tie(), "offset {offset:?}");
        }
    }

    #[test]
    fn test_y_plane_tie_yields_both_octants() {
        let tie = candidates(&Vector3::new(1.0, 0.0, 1.0));
        assert_eq!(tie.first(), 1);
        assert_eq!(tie.second(), Some(5));
        assert!(tie.is_tie());
        assert_eq!(tie.into_iter().collect::<Vec<_>>(), vec![1, 5]);
    }

    #[test]
    fn test_z_plane_resolves_below() {
        let result = candidates(&Vector3::new(-1.0, 1.0, 0.0));
        assert_eq!(result.first(), 2);
        assert!(!result.is_tie());
    }

    #[test]
    fn test_x_plane_resolves_above() {
        let result = candidates(&Vector3::new(0.0, -1.0, 1.0));
        assert_eq!(result.first(), 5);
        assert!(!result.is_tie());
    }

    #[test]
    fn test_center_point_ties_on_y_only() {
        let result = candidates(&Vector3::zeros());
        assert_eq!((result.first(), result.second()), (0, Some(4)));
    }

    // =========================================================================
    // Child boxes
    // =========================================================================

    fn unit_parent() -> Aabb {
        Aabb::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn test_children_tile_parent_exactly() {
        let parent = unit_parent();
        let mut union = Aabb::empty();
        let mut volume = 0.0;
        for octant in 0..OCTANT_COUNT as u8 {
            let child = child_bounds(&parent, octant);
            union = union.union(&child);
            volume += child.volume();
        }
        assert_eq!(union, parent);
        assert_eq!(volume, parent.volume());
    }

    #[test]
    fn test_child_box_matches_classification() {
        // The child box of each octant contains its own center offset.
        let parent = unit_parent();
        let center = parent.center();
        for octant in 0..OCTANT_COUNT as u8 {
            let child = child_bounds(&parent, octant);
            let offset = child.center() - center;
            let result = candidates(&offset);
            assert_eq!(result.first(), octant);
            assert!(!result.is_tie());
        }
    }

    #[test]
    fn test_tie_candidates_both_contain_plane_point() {
        let parent = unit_parent();
        let point = Point3::new(0.5, 0.0, 0.5);
        let result = candidates(&(point - parent.center()));
        for octant in result {
            assert!(child_bounds(&parent, octant).contains(&point));
        }
    }

    #[test]
    fn test_deterministic_plane_sides_contain_point() {
        // Z and X plane points must land inside the single chosen child.
        let parent = unit_parent();
        for point in [
            Point3::new(0.5, 0.5, 0.0),
            Point3::new(0.0, 0.5, 0.5),
            Point3::new(0.0, -0.5, 0.0),
        ] {
            let result = candidates(&(point - parent.center()));
            assert!(!result.is_tie());
            assert!(child_bounds(&parent, result.first()).contains(&point));
        }
    }
}
