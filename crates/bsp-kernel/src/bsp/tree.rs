//! BSP tree container and construction.

use log::{debug, trace, warn};

use crate::clip::{classify_polygon, split_polygon};
use crate::float_types::{PLANE_EPSILON, Real};
use crate::plane::{Classification, PlaneSide};
use crate::polygon::Polygon;
use crate::ray::Ray;
use crate::vector::Point3;

use super::node::{BspNode, faces_same_direction};
use super::query::PolygonSplit;
use super::selector::{FirstPolygon, PlaneSelector};

/// A solid described by a Binary Space Partitioning tree of polygons.
///
/// Each node stores the polygons coplanar with its splitting plane; the rest
/// are routed to the front or back subtree, splitting polygons that span the
/// plane. An empty input produces an empty tree, which encloses nothing.
///
/// ```
/// use bsp_kernel::{BspTree, PlaneSide, Point3, Polygon, Ray, Vector3};
///
/// // The y = 0 plane, normal +Y; everything below it is solid.
/// let floor = Polygon::new(vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(0.0, 0.0, 1.0),
///     Point3::new(1.0, 0.0, 0.0),
/// ]);
/// let tree = BspTree::from_polygons(vec![floor]);
///
/// assert_eq!(tree.classify_point(&Point3::new(0.0, -1.0, 0.0)), Some(PlaneSide::Back));
///
/// let ray = Ray::new(Point3::new(0.0, 1.0, 0.0), Vector3::new(0.0, -1.0, 0.0));
/// assert_eq!(tree.raycast(&ray), Some(Point3::new(0.0, 0.0, 0.0)));
/// ```
#[derive(Debug, Clone)]
pub struct BspTree {
    root: Option<BspNode>,
    epsilon: Real,
}

impl Default for BspTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Counters collected while building, reported through `log`.
#[derive(Debug, Default)]
struct BuildStats {
    nodes: usize,
    splits: usize,
    dropped_fragments: usize,
}

impl BspTree {
    /// Creates an empty BSP tree.
    pub fn new() -> Self {
        Self {
            root: None,
            epsilon: PLANE_EPSILON,
        }
    }

    /// Builds a BSP tree from a collection of polygons.
    ///
    /// Uses the provided [`PlaneSelector`] to choose splitting planes and the
    /// default `PLANE_EPSILON` tolerance.
    pub fn build<S: PlaneSelector>(polygons: Vec<Polygon>, selector: &S) -> Self {
        Self::build_with_epsilon(polygons, selector, PLANE_EPSILON)
    }

    /// Builds a BSP tree with a custom classification tolerance. The tree
    /// keeps using `epsilon` for every query.
    ///
    /// Polygons with fewer than three vertices or a degenerate plane are
    /// skipped with a warning.
    pub fn build_with_epsilon<S: PlaneSelector>(
        polygons: Vec<Polygon>,
        selector: &S,
        epsilon: Real,
    ) -> Self {
        let input = polygons.len();
        let polygons: Vec<Polygon> = polygons
            .into_iter()
            .filter(|p| {
                let valid = p.is_valid();
                if !valid {
                    warn!("skipping degenerate polygon with {} vertices", p.len());
                }
                valid
            })
            .collect();

        let mut stats = BuildStats::default();
        let root = build_node(polygons, selector, epsilon, &mut stats);
        let tree = Self { root, epsilon };

        debug!(
            "built BSP tree: {} input polygons, {} stored, {} nodes, {} splits, {} dropped fragments, depth {}",
            input,
            tree.polygon_count(),
            stats.nodes,
            stats.splits,
            stats.dropped_fragments,
            tree.depth()
        );
        tree
    }

    /// Builds a BSP tree using the default plane selector ([`FirstPolygon`]).
    pub fn from_polygons(polygons: Vec<Polygon>) -> Self {
        Self::build(polygons, &FirstPolygon)
    }

    /// Returns `true` if the tree contains no polygons.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns a reference to the root node, if any.
    #[inline]
    pub fn root(&self) -> Option<&BspNode> {
        self.root.as_ref()
    }

    /// Returns the classification tolerance the tree was built with.
    #[inline]
    pub fn epsilon(&self) -> Real {
        self.epsilon
    }

    /// Returns the total number of polygons in the tree.
    pub fn polygon_count(&self) -> usize {
        self.root.as_ref().map_or(0, |n| n.polygon_count())
    }

    /// Returns the maximum depth of the tree (0 for empty tree).
    pub fn depth(&self) -> usize {
        self.root.as_ref().map_or(0, |n| n.depth())
    }

    /// Collects all polygons in the tree into a vector.
    ///
    /// The order of polygons is not guaranteed.
    pub fn collect_polygons(&self) -> Vec<Polygon> {
        let mut result = Vec::with_capacity(self.polygon_count());
        collect_polygons_recursive(self.root.as_ref(), &mut result);
        result
    }

    /// Classifies a point against the root's splitting plane.
    ///
    /// Returns `None` for an empty tree.
    pub fn classify_point(&self, point: &Point3) -> Option<PlaneSide> {
        self.root.as_ref().map(|root| root.classify_point(point))
    }

    /// Splits polygons into the parts inside and outside the solid.
    ///
    /// An empty tree encloses nothing, so every usable polygon is outside.
    pub fn split_polygons(&self, polygons: &[Polygon]) -> PolygonSplit {
        match &self.root {
            Some(root) => root.split_polygons(polygons),
            None => PolygonSplit {
                inside: Vec::new(),
                outside: polygons.iter().filter(|p| p.is_valid()).cloned().collect(),
            },
        }
    }

    /// Returns the first point where the ray is inside the solid.
    pub fn raycast(&self, ray: &Ray) -> Option<Point3> {
        self.root.as_ref().and_then(|root| root.raycast(ray))
    }

    /// Returns true if the point lies in solid space.
    pub fn contains_point(&self, point: &Point3) -> bool {
        self.root.as_ref().is_some_and(|root| root.contains_point(point))
    }
}

/// Recursively builds a BSP node from a list of polygons.
fn build_node<S: PlaneSelector>(
    mut polygons: Vec<Polygon>,
    selector: &S,
    epsilon: Real,
    stats: &mut BuildStats,
) -> Option<BspNode> {
    let splitter_idx = selector.select(&polygons, epsilon)?;

    // `remove` keeps the input order, so `FirstPolygon` sees the same
    // sequence in the children.
    let splitter = polygons.remove(splitter_idx);
    let plane = splitter.plane().clone();

    let mut coplanar_front = vec![splitter];
    let mut coplanar_back = Vec::new();
    let mut front_list = Vec::new();
    let mut back_list = Vec::new();

    for polygon in polygons {
        match classify_polygon(&polygon, &plane, epsilon) {
            Classification::Front => front_list.push(polygon),
            Classification::Back => back_list.push(polygon),
            Classification::Coplanar => {
                if faces_same_direction(&polygon, &plane) {
                    coplanar_front.push(polygon);
                } else {
                    coplanar_back.push(polygon);
                }
            }
            Classification::Spanning => {
                stats.splits += 1;
                let (front_part, back_part) = split_polygon(&polygon, &plane, epsilon);
                match front_part {
                    Some(f) => front_list.push(f),
                    None => stats.dropped_fragments += 1,
                }
                match back_part {
                    Some(b) => back_list.push(b),
                    None => stats.dropped_fragments += 1,
                }
            }
        }
    }

    stats.nodes += 1;
    trace!(
        "node {}: {} coplanar, {} front, {} back",
        stats.nodes,
        coplanar_front.len() + coplanar_back.len(),
        front_list.len(),
        back_list.len()
    );

    let front = build_node(front_list, selector, epsilon, stats);
    let back = build_node(back_list, selector, epsilon, stats);

    Some(BspNode::from_parts(
        plane,
        epsilon,
        coplanar_front,
        coplanar_back,
        front,
        back,
    ))
}

/// Recursively collects all polygons from a node subtree.
fn collect_polygons_recursive(node: Option<&BspNode>, result: &mut Vec<Polygon>) {
    if let Some(n) = node {
        result.extend(n.all_coplanar().cloned());
        collect_polygons_recursive(n.front(), result);
        collect_polygons_recursive(n.back(), result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bsp::BalancedSelector;
    use crate::vector::Vector3;

    fn make_triangle(a: [Real; 3], b: [Real; 3], c: [Real; 3]) -> Polygon {
        Polygon::new(vec![Point3::from(a), Point3::from(b), Point3::from(c)])
    }

    #[test]
    fn empty_tree() {
        let tree = BspTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.polygon_count(), 0);
        assert_eq!(tree.depth(), 0);
        assert_eq!(tree.classify_point(&Point3::origin()), None);
        assert_eq!(tree.raycast(&Ray::new(Point3::origin(), Vector3::x())), None);
        assert!(!tree.contains_point(&Point3::origin()));
    }

    #[test]
    fn build_empty() {
        let tree = BspTree::from_polygons(vec![]);
        assert!(tree.is_empty());
    }

    #[test]
    fn empty_tree_puts_everything_outside() {
        let poly = make_triangle([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let split = BspTree::new().split_polygons(&[poly.clone()]);
        assert!(split.inside.is_empty());
        assert_eq!(split.outside, vec![poly]);
    }

    #[test]
    fn build_single_polygon() {
        let poly = make_triangle([0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]);
        let tree = BspTree::from_polygons(vec![poly]);

        assert!(!tree.is_empty());
        assert_eq!(tree.polygon_count(), 1);
        assert_eq!(tree.depth(), 1);
        assert_eq!(tree.classify_point(&Point3::new(123.0, 0.0, 456.0)), Some(PlaneSide::Coplanar));
        assert_eq!(tree.classify_point(&Point3::new(0.0, 1.0, 0.0)), Some(PlaneSide::Front));
        assert_eq!(tree.classify_point(&Point3::new(0.0, -1.0, 0.0)), Some(PlaneSide::Back));
    }

    #[test]
    fn degenerate_polygons_are_skipped() {
        let collinear = make_triangle([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]);
        let good = make_triangle([0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]);

        let tree = BspTree::from_polygons(vec![collinear.clone(), good.clone()]);
        assert_eq!(tree.polygon_count(), 1);
        assert_eq!(tree.root().unwrap().plane(), good.plane());

        assert!(BspTree::from_polygons(vec![collinear]).is_empty());
    }

    #[test]
    fn build_two_parallel_polygons() {
        let lower = make_triangle([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let upper = make_triangle([0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [0.0, 1.0, 1.0]);

        let tree = BspTree::from_polygons(vec![lower, upper.clone()]);
        let root = tree.root().unwrap();

        assert_eq!(tree.polygon_count(), 2);
        assert_eq!(tree.depth(), 2);
        // Normal is +Z, so the upper triangle is in front.
        assert_eq!(root.front().unwrap().coplanar_front(), &[upper]);
        assert!(root.back().is_none());
    }

    #[test]
    fn build_coplanar_groups_by_facing() {
        let poly1 = make_triangle([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let poly2 = make_triangle([1.0, 0.0, 0.0], [2.0, 0.0, 0.0], [1.0, 1.0, 0.0]);
        let opposite = poly2.flipped();

        let tree = BspTree::from_polygons(vec![poly1, poly2, opposite]);
        let root = tree.root().unwrap();

        assert_eq!(tree.depth(), 1);
        assert_eq!(root.coplanar_front().len(), 2);
        assert_eq!(root.coplanar_back().len(), 1);
    }

    #[test]
    fn build_spanning_polygon_gets_split() {
        // Splitter on Y=0, normal +Y
        let splitter = make_triangle([0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]);
        let spanning = make_triangle([-0.5, -1.0, 0.5], [0.5, 1.0, 0.5], [0.5, -1.0, 0.5]);

        let tree = BspTree::from_polygons(vec![splitter, spanning]);
        let root = tree.root().unwrap();

        assert_eq!(tree.polygon_count(), 3);
        for v in root.front().unwrap().coplanar_front()[0].vertices() {
            assert_ne!(root.classify_point(v), PlaneSide::Back);
        }
        for v in root.back().unwrap().all_coplanar().next().unwrap().vertices() {
            assert_ne!(root.classify_point(v), PlaneSide::Front);
        }
    }

    #[test]
    fn first_polygon_keeps_input_order_in_children() {
        let z = |d: Real| make_triangle([0.0, 0.0, d], [1.0, 0.0, d], [0.0, 1.0, d]);
        let tree = BspTree::from_polygons(vec![z(0.0), z(1.0), z(2.0), z(3.0)]);

        let child = tree.root().unwrap().front().unwrap();
        assert_eq!(child.plane().offset(), 1.0);
        assert_eq!(tree.depth(), 4);
    }

    #[test]
    fn balanced_selector_gives_shallower_tree() {
        let z = |d: Real| make_triangle([0.0, 0.0, d], [1.0, 0.0, d], [0.0, 1.0, d]);
        let polygons: Vec<Polygon> = (0..7).map(|i| z(i as Real)).collect();

        let first = BspTree::from_polygons(polygons.clone());
        let balanced = BspTree::build(polygons, &BalancedSelector::default());

        assert_eq!(first.depth(), 7);
        assert_eq!(balanced.depth(), 3);
        assert_eq!(balanced.polygon_count(), 7);
    }

    #[test]
    fn epsilon_is_kept_by_tree_and_nodes() {
        let poly = make_triangle([0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]);
        let tree = BspTree::build_with_epsilon(vec![poly], &FirstPolygon, 0.1);

        assert_eq!(tree.epsilon(), 0.1);
        assert_eq!(tree.root().unwrap().epsilon(), 0.1);
        assert_eq!(tree.classify_point(&Point3::new(0.0, 0.05, 0.0)), Some(PlaneSide::Coplanar));
    }

    #[test]
    fn collect_polygons() {
        let poly1 = make_triangle([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let poly2 = make_triangle([0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [0.0, 1.0, 1.0]);
        let poly3 = make_triangle([0.0, 0.0, 2.0], [1.0, 0.0, 2.0], [0.0, 1.0, 2.0]);

        let tree = BspTree::from_polygons(vec![poly1, poly2, poly3]);
        let collected = tree.collect_polygons();

        assert_eq!(collected.len(), 3);
    }
}
