//! Queries against a built tree: polygon splitting, ray casting and
//! point-in-solid tests.
//!
//! All three follow the solid convention documented on [`BspNode`]: running
//! off a missing back child lands in solid space, running off a missing
//! front child lands in empty space.

use log::{trace, warn};

use crate::clip::{classify_polygon, split_polygon};
use crate::float_types::{NORMAL_EPSILON, Real};
use crate::plane::{Classification, PlaneSide};
use crate::polygon::Polygon;
use crate::ray::Ray;
use crate::vector::Point3;

use super::node::{BspNode, faces_same_direction};

/// Polygons partitioned by a solid: the parts inside it and the parts
/// outside it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolygonSplit {
    pub inside: Vec<Polygon>,
    pub outside: Vec<Polygon>,
}

impl BspNode {
    /// Splits polygons against the whole subtree.
    ///
    /// Each polygon is classified at this node the same way construction
    /// does, clipping spanning polygons into two fragments. Coplanar polygons
    /// go front when they face the same way as the plane and back otherwise.
    /// Front parts continue into the front child or, if there is none, are
    /// outside; back parts continue into the back child or, if there is none,
    /// are inside.
    ///
    /// Polygons with fewer than three vertices or a degenerate plane are
    /// skipped with a warning.
    pub fn split_polygons(&self, polygons: &[Polygon]) -> PolygonSplit {
        let usable: Vec<Polygon> = polygons
            .iter()
            .filter(|p| {
                let valid = p.is_valid();
                if !valid {
                    warn!("skipping degenerate polygon with {} vertices", p.len());
                }
                valid
            })
            .cloned()
            .collect();

        let mut result = PolygonSplit::default();
        self.split_into(usable, &mut result);
        result
    }

    fn split_into(&self, polygons: Vec<Polygon>, result: &mut PolygonSplit) {
        let mut front_list = Vec::new();
        let mut back_list = Vec::new();

        for polygon in polygons {
            match classify_polygon(&polygon, self.plane(), self.epsilon()) {
                Classification::Front => front_list.push(polygon),
                Classification::Back => back_list.push(polygon),
                Classification::Coplanar => {
                    if faces_same_direction(&polygon, self.plane()) {
                        front_list.push(polygon);
                    } else {
                        back_list.push(polygon);
                    }
                }
                Classification::Spanning => {
                    let (front_part, back_part) = split_polygon(&polygon, self.plane(), self.epsilon());
                    front_list.extend(front_part);
                    back_list.extend(back_part);
                }
            }
        }

        trace!(
            "split at node: {} front, {} back",
            front_list.len(),
            back_list.len()
        );

        match self.front() {
            Some(front) if !front_list.is_empty() => front.split_into(front_list, result),
            _ => result.outside.extend(front_list),
        }
        match self.back() {
            Some(back) if !back_list.is_empty() => back.split_into(back_list, result),
            _ => result.inside.extend(back_list),
        }
    }

    /// Casts a ray into the subtree and returns the first point at which the
    /// ray is inside the solid.
    ///
    /// A ray whose origin is already in solid space hits at its origin. The
    /// side of each plane holding the ray's start is searched first, so the
    /// closest surface wins.
    pub fn raycast(&self, ray: &Ray) -> Option<Point3> {
        self.first_solid_hit(ray, 0.0, Real::INFINITY)
            .map(|t| ray.point_at(t))
    }

    /// Searches the part of the ray between `t_min` and `t_max` for solid
    /// space, returning the parameter where it is first reached.
    fn first_solid_hit(&self, ray: &Ray, t_min: Real, t_max: Real) -> Option<Real> {
        let side = self.classify_point(&ray.point_at(t_min));
        let heading = self.plane().normal().dot(&ray.direction());

        // Where the segment passes to the other side of this plane, if it
        // does before `t_max`.
        let crossing = match side {
            PlaneSide::Back if heading > NORMAL_EPSILON => ray.crossing_parameter(self.plane()),
            PlaneSide::Front | PlaneSide::Coplanar if heading < -NORMAL_EPSILON => {
                ray.crossing_parameter(self.plane())
            }
            _ => None,
        }
        .map(|t| t.max(t_min))
        .filter(|t| *t < t_max);

        let (near, far) = match side {
            PlaneSide::Back => (PlaneSide::Back, PlaneSide::Front),
            PlaneSide::Front | PlaneSide::Coplanar => (PlaneSide::Front, PlaneSide::Back),
        };

        match crossing {
            None => self
                .descend(near, ray, t_min, t_max)
                .or_else(|| self.surface_hit(side, ray, t_min, t_max)),
            Some(t) => {
                trace!("ray crosses node plane at t = {t}");
                self.descend(near, ray, t_min, t)
                    .or_else(|| self.descend(far, ray, t, t_max))
            }
        }
    }

    /// A segment that starts on this plane and leaves through the front
    /// still touches the surface where it meets the plane, provided that
    /// point is solid seen from behind.
    fn surface_hit(&self, side: PlaneSide, ray: &Ray, t_min: Real, t_max: Real) -> Option<Real> {
        if side != PlaneSide::Coplanar {
            return None;
        }
        let t = ray
            .crossing_parameter(self.plane())
            .filter(|t| (t_min..t_max).contains(t))?;
        let solid = self
            .back()
            .is_none_or(|back| back.contains_point(&ray.point_at(t)));
        solid.then_some(t)
    }

    fn descend(&self, side: PlaneSide, ray: &Ray, t_min: Real, t_max: Real) -> Option<Real> {
        let (child, solid) = match side {
            PlaneSide::Back => (self.back(), true),
            _ => (self.front(), false),
        };
        match child {
            Some(node) => node.first_solid_hit(ray, t_min, t_max),
            None => solid.then_some(t_min),
        }
    }

    /// Returns true if the point lies in solid space.
    ///
    /// Walks from this node to the region holding the point. Points within
    /// epsilon of a splitting plane follow the front side, so points on the
    /// boundary surface count as outside.
    pub fn contains_point(&self, point: &Point3) -> bool {
        match self.classify_point(point) {
            PlaneSide::Back => self.back().is_none_or(|back| back.contains_point(point)),
            PlaneSide::Front | PlaneSide::Coplanar => {
                self.front().is_some_and(|front| front.contains_point(point))
            }
        }
    }
}
