//! BSP tree node implementation.

use crate::float_types::Real;
use crate::plane::{Plane, PlaneSide};
use crate::polygon::Polygon;
use crate::vector::Point3;

/// A node in the BSP tree.
///
/// Each node partitions space using a splitting plane and stores polygons
/// that are coplanar with that plane. Polygons on the front or back of the
/// plane are stored in the respective child subtrees.
///
/// # Solid convention
///
/// The tree describes a solid. A missing back child means the back half-space
/// left at that node is entirely solid; a missing front child means the front
/// half-space left there is entirely empty. `split_polygons`, `raycast` and
/// `contains_point` rely on this.
///
/// # Coplanar Polygon Storage
///
/// Coplanar polygons are separated by their facing direction relative to
/// the splitting plane's normal:
/// - `coplanar_front`: polygons whose normal points the same direction as the plane normal
/// - `coplanar_back`: polygons whose normal points opposite to the plane normal
///
/// Nodes are only created by [`BspTree`](super::BspTree) construction and
/// are immutable afterwards.
#[derive(Debug, Clone)]
pub struct BspNode {
    /// The splitting plane for this node.
    plane: Plane,

    /// Tolerance used when classifying against `plane`.
    epsilon: Real,

    /// Polygons coplanar with the plane, facing the SAME direction as the plane normal.
    coplanar_front: Vec<Polygon>,

    /// Polygons coplanar with the plane, facing the OPPOSITE direction as the plane normal.
    coplanar_back: Vec<Polygon>,

    /// Subtree containing polygons in FRONT of the splitting plane.
    front: Option<Box<BspNode>>,

    /// Subtree containing polygons BEHIND the splitting plane.
    back: Option<Box<BspNode>>,
}

impl BspNode {
    pub(crate) fn from_parts(
        plane: Plane,
        epsilon: Real,
        coplanar_front: Vec<Polygon>,
        coplanar_back: Vec<Polygon>,
        front: Option<BspNode>,
        back: Option<BspNode>,
    ) -> Self {
        Self {
            plane,
            epsilon,
            coplanar_front,
            coplanar_back,
            front: front.map(Box::new),
            back: back.map(Box::new),
        }
    }

    /// Returns a reference to the splitting plane.
    #[inline]
    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// Returns the classification tolerance this node was built with.
    #[inline]
    pub fn epsilon(&self) -> Real {
        self.epsilon
    }

    /// Returns coplanar polygons facing the same direction as the plane normal.
    #[inline]
    pub fn coplanar_front(&self) -> &[Polygon] {
        &self.coplanar_front
    }

    /// Returns coplanar polygons facing opposite to the plane normal.
    #[inline]
    pub fn coplanar_back(&self) -> &[Polygon] {
        &self.coplanar_back
    }

    /// Returns all coplanar polygons at this node (both front and back facing).
    pub fn all_coplanar(&self) -> impl Iterator<Item = &Polygon> {
        self.coplanar_front.iter().chain(self.coplanar_back.iter())
    }

    /// Returns the number of coplanar polygons at this node.
    pub fn coplanar_count(&self) -> usize {
        self.coplanar_front.len() + self.coplanar_back.len()
    }

    /// Returns a reference to the front child subtree.
    #[inline]
    pub fn front(&self) -> Option<&BspNode> {
        self.front.as_deref()
    }

    /// Returns a reference to the back child subtree.
    #[inline]
    pub fn back(&self) -> Option<&BspNode> {
        self.back.as_deref()
    }

    /// Checks if this node has any children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.front.is_none() && self.back.is_none()
    }

    /// Returns the total number of polygons in this subtree (including all descendants).
    pub fn polygon_count(&self) -> usize {
        self.coplanar_count()
            + self.front().map_or(0, |n| n.polygon_count())
            + self.back().map_or(0, |n| n.polygon_count())
    }

    /// Returns the depth of this subtree (1 for a leaf node).
    pub fn depth(&self) -> usize {
        let front_depth = self.front().map_or(0, |n| n.depth());
        let back_depth = self.back().map_or(0, |n| n.depth());
        1 + front_depth.max(back_depth)
    }

    /// Classifies a point against this node's splitting plane only.
    ///
    /// For a whole-tree inside/outside test use
    /// [`contains_point`](BspNode::contains_point).
    #[inline]
    pub fn classify_point(&self, point: &Point3) -> PlaneSide {
        self.plane.classify_point_with_epsilon(point, self.epsilon)
    }
}

/// Determines if a polygon faces the same direction as a plane.
///
/// Compares the polygon's normal to the plane's normal using the dot product.
/// Returns `true` if the normals point in roughly the same direction (dot > 0).
/// A polygon with an invalid plane never faces the same direction.
#[inline]
pub fn faces_same_direction(polygon: &Polygon, plane: &Plane) -> bool {
    polygon.normal().dot(&plane.normal()) > 0.0
}
