//! Polygon classification and clipping against a plane.

use crate::float_types::Real;
use crate::plane::{Classification, Plane, PlaneSide, side_of_distance};
use crate::polygon::Polygon;
use crate::vector::lerp;

/// Classifies a polygon against a plane from its per-vertex sides.
///
/// - `Coplanar` if every vertex is within `epsilon` of the plane
/// - `Front` if no vertex is behind the plane
/// - `Back` if no vertex is in front of the plane
/// - `Spanning` if vertices lie strictly on both sides
pub fn classify_polygon(polygon: &Polygon, plane: &Plane, epsilon: Real) -> Classification {
    let mut front = 0;
    let mut back = 0;

    for vertex in polygon.vertices() {
        match plane.classify_point_with_epsilon(vertex, epsilon) {
            PlaneSide::Front => front += 1,
            PlaneSide::Back => back += 1,
            PlaneSide::Coplanar => {}
        }
    }

    match (front, back) {
        (0, 0) => Classification::Coplanar,
        (_, 0) => Classification::Front,
        (0, _) => Classification::Back,
        _ => Classification::Spanning,
    }
}

/// Cuts a polygon by a plane.
///
/// Returns `(front, back)`:
///
/// - **Front**: `(Some(polygon), None)`
/// - **Back**: `(None, Some(polygon))`
/// - **Coplanar**: `(Some(polygon), None)`; callers that care about facing
///   route coplanar polygons before calling this
/// - **Spanning**: both fragments, each dropped if it ends up with fewer than
///   three vertices
///
/// Spanning polygons are walked edge by edge (Sutherland-Hodgman). Front and
/// coplanar vertices go to the front fragment, back and coplanar vertices to
/// the back fragment. Where an edge runs strictly from one side to the other,
/// the crossing point `v0 + (v1 - v0) * d0 / (d0 - d1)` is added to both.
/// Vertex order, and so winding, is preserved in both fragments, and both
/// keep the original polygon's plane.
pub fn split_polygon(
    polygon: &Polygon,
    plane: &Plane,
    epsilon: Real,
) -> (Option<Polygon>, Option<Polygon>) {
    let vertices = polygon.vertices();
    let n = vertices.len();

    let distances: Vec<Real> = vertices.iter().map(|v| plane.signed_distance_to(v)).collect();
    let sides: Vec<PlaneSide> = distances
        .iter()
        .map(|d| side_of_distance(*d, epsilon))
        .collect();

    let any_front = sides.contains(&PlaneSide::Front);
    let any_back = sides.contains(&PlaneSide::Back);
    match (any_front, any_back) {
        (false, true) => return (None, Some(polygon.clone())),
        (true, true) => {}
        _ => return (Some(polygon.clone()), None),
    }

    let mut front_verts = Vec::with_capacity(n + 1);
    let mut back_verts = Vec::with_capacity(n + 1);

    for i in 0..n {
        let j = (i + 1) % n;
        let current = vertices[i];

        match sides[i] {
            PlaneSide::Front => front_verts.push(current),
            PlaneSide::Back => back_verts.push(current),
            PlaneSide::Coplanar => {
                front_verts.push(current);
                back_verts.push(current);
            }
        }

        let crosses = matches!(
            (sides[i], sides[j]),
            (PlaneSide::Front, PlaneSide::Back) | (PlaneSide::Back, PlaneSide::Front)
        );

        if crosses {
            let t = distances[i] / (distances[i] - distances[j]);
            let intersection = lerp(&current, &vertices[j], t);
            front_verts.push(intersection);
            back_verts.push(intersection);
        }
    }

    // Never fires once both sides are occupied: each fragment keeps at least
    // one vertex of its own plus two crossing points.
    let fragment = |verts: Vec<_>| {
        (verts.len() >= 3).then(|| Polygon::with_plane(verts, polygon.plane().clone()))
    };

    (fragment(front_verts), fragment(back_verts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::float_types::PLANE_EPSILON;
    use crate::vector::{Point3, Vector3};

    fn make_triangle(a: [Real; 3], b: [Real; 3], c: [Real; 3]) -> Polygon {
        Polygon::new(vec![Point3::from(a), Point3::from(b), Point3::from(c)])
    }

    fn ground() -> Plane {
        Plane::new(Vector3::y(), 0.0)
    }

    #[test]
    fn classify_all_sides() {
        let plane = ground();
        let above = make_triangle([0.0, 1.0, 0.0], [1.0, 1.0, 0.0], [0.0, 2.0, 1.0]);
        let below = make_triangle([0.0, -1.0, 0.0], [1.0, -1.0, 0.0], [0.0, -2.0, 1.0]);
        let on = make_triangle([0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]);
        let spanning = make_triangle([0.0, 1.0, 0.0], [1.0, -1.0, 0.0], [-1.0, -1.0, 0.0]);

        assert_eq!(classify_polygon(&above, &plane, PLANE_EPSILON), Classification::Front);
        assert_eq!(classify_polygon(&below, &plane, PLANE_EPSILON), Classification::Back);
        assert_eq!(classify_polygon(&on, &plane, PLANE_EPSILON), Classification::Coplanar);
        assert_eq!(classify_polygon(&spanning, &plane, PLANE_EPSILON), Classification::Spanning);
    }

    #[test]
    fn touching_vertices_do_not_make_a_polygon_spanning() {
        // One vertex on the plane, the rest in front.
        let touching = make_triangle([0.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 1.0]);
        assert_eq!(classify_polygon(&touching, &ground(), PLANE_EPSILON), Classification::Front);
    }

    #[test]
    fn split_spanning_triangle() {
        let poly = make_triangle([0.0, 1.0, 0.0], [1.0, -1.0, 0.0], [-1.0, -1.0, 0.0]);
        let (front, back) = split_polygon(&poly, &ground(), PLANE_EPSILON);
        let front = front.unwrap();
        let back = back.unwrap();

        assert_eq!(
            front.vertices(),
            &[
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(0.5, 0.0, 0.0),
                Point3::new(-0.5, 0.0, 0.0),
            ]
        );
        assert_eq!(
            back.vertices(),
            &[
                Point3::new(0.5, 0.0, 0.0),
                Point3::new(1.0, -1.0, 0.0),
                Point3::new(-1.0, -1.0, 0.0),
                Point3::new(-0.5, 0.0, 0.0),
            ]
        );
        assert_eq!(front.plane(), poly.plane());
        assert_eq!(back.plane(), poly.plane());
    }

    #[test]
    fn split_through_a_vertex() {
        // Plane passes through vertex (0,0,0); only one edge crosses.
        let poly = make_triangle([0.0, 0.0, 0.0], [1.0, 1.0, 0.0], [1.0, -1.0, 0.0]);
        let (front, back) = split_polygon(&poly, &ground(), PLANE_EPSILON);
        let front = front.unwrap();
        let back = back.unwrap();

        assert_eq!(front.len(), 3);
        assert_eq!(back.len(), 3);
        assert_eq!(front.vertices()[0], Point3::origin());
        assert_eq!(back.vertices()[0], Point3::origin());
        assert_eq!(front.vertices()[2], Point3::new(1.0, 0.0, 0.0));
        assert_eq!(back.vertices()[1], Point3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn spanning_segment_still_yields_three_vertex_fragments() {
        let segment = Polygon::new(vec![Point3::new(0.0, 1.0, 0.0), Point3::new(0.0, -1.0, 0.0)]);
        let (front, back) = split_polygon(&segment, &ground(), PLANE_EPSILON);

        assert_eq!(
            front.unwrap().vertices(),
            &[Point3::new(0.0, 1.0, 0.0), Point3::origin(), Point3::origin()]
        );
        assert_eq!(
            back.unwrap().vertices(),
            &[Point3::origin(), Point3::new(0.0, -1.0, 0.0), Point3::origin()]
        );
    }

    #[test]
    fn split_non_spanning_returns_whole_polygon() {
        let below = make_triangle([0.0, -1.0, 0.0], [1.0, -1.0, 0.0], [0.0, -2.0, 1.0]);
        let (front, back) = split_polygon(&below, &ground(), PLANE_EPSILON);
        assert!(front.is_none());
        assert_eq!(back, Some(below));

        let on = make_triangle([0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]);
        let (front, back) = split_polygon(&on, &ground(), PLANE_EPSILON);
        assert_eq!(front, Some(on));
        assert!(back.is_none());
    }

    #[test]
    fn fragments_stay_on_their_side() {
        let quad = Polygon::new(vec![
            Point3::new(-1.0, -2.0, 0.0),
            Point3::new(1.0, -2.0, 0.0),
            Point3::new(1.0, 3.0, 0.0),
            Point3::new(-1.0, 3.0, 0.0),
        ]);
        let plane = ground();
        let (front, back) = quad.split(&plane);
        for v in front.unwrap().vertices() {
            assert!(plane.signed_distance_to(v) > -PLANE_EPSILON);
        }
        for v in back.unwrap().vertices() {
            assert!(plane.signed_distance_to(v) < PLANE_EPSILON);
        }
    }
}
