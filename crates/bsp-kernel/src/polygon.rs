//! Convex polygon representation for BSP trees.

use std::fmt;

use crate::clip::{classify_polygon, split_polygon};
use crate::error::GeometryError;
use crate::float_types::{PLANE_EPSILON, Real};
use crate::plane::{Classification, Plane};
use crate::vector::{Point3, Vector3};

/// A convex polygon in 3D space, defined by an ordered list of vertices.
///
/// Vertices should be coplanar and in counter-clockwise winding order
/// when viewed from the front (the direction the normal points).
///
/// The supporting plane is derived once, from the first three vertices. If
/// those are degenerate the polygon carries an invalid plane and
/// [`Polygon::is_valid`] returns false; BSP construction skips such polygons.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point3>,
    plane: Plane,
}

impl Polygon {
    /// Creates a new polygon from a list of vertices.
    ///
    /// Never fails. Fewer than three vertices, or a degenerate leading
    /// triple, produce a polygon with an invalid plane.
    pub fn new(vertices: Vec<Point3>) -> Self {
        let plane = match vertices.as_slice() {
            [a, b, c, ..] => Plane::from_points(a, b, c),
            _ => Plane::default(),
        };
        Self { vertices, plane }
    }

    /// Creates a new polygon, rejecting input BSP construction cannot use.
    pub fn try_new(vertices: Vec<Point3>) -> Result<Self, GeometryError> {
        if vertices.len() < 3 {
            return Err(GeometryError::TooFewVertices {
                count: vertices.len(),
            });
        }
        if !vertices.iter().all(crate::vector::is_finite) {
            return Err(GeometryError::NonFiniteCoordinate);
        }
        let polygon = Self::new(vertices);
        if polygon.plane.is_valid() {
            Ok(polygon)
        } else {
            Err(GeometryError::DegeneratePlane)
        }
    }

    /// Creates a polygon that keeps a known supporting plane.
    ///
    /// Used for clipped fragments, whose leading vertices may be closer to
    /// collinear than the original polygon's.
    pub(crate) fn with_plane(vertices: Vec<Point3>, plane: Plane) -> Self {
        Self { vertices, plane }
    }

    /// Returns the vertices of the polygon.
    #[inline]
    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns true if the polygon has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns the plane that this polygon lies on.
    #[inline]
    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// Returns the unit normal of the supporting plane.
    #[inline]
    pub fn normal(&self) -> Vector3 {
        self.plane.normal()
    }

    /// True if the polygon has at least three vertices and a valid plane.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.vertices.len() >= 3 && self.plane.is_valid()
    }

    /// Computes the centroid (average of the vertices) of the polygon.
    pub fn centroid(&self) -> Point3 {
        let sum: Vector3 = self.vertices.iter().map(|p| p.coords).sum();
        Point3::from(sum / self.vertices.len() as Real)
    }

    /// Returns the polygon with reversed winding and a flipped plane.
    pub fn flipped(&self) -> Self {
        let mut vertices = self.vertices.clone();
        vertices.reverse();
        Self {
            vertices,
            plane: self.plane.flipped(),
        }
    }

    /// Classifies this polygon relative to a plane using `PLANE_EPSILON`.
    pub fn classify(&self, plane: &Plane) -> Classification {
        classify_polygon(self, plane, PLANE_EPSILON)
    }

    /// Cuts the polygon by a plane using `PLANE_EPSILON`.
    ///
    /// Returns `(front, back)`; see [`split_polygon`] for how each
    /// classification maps to the two halves.
    pub fn split(&self, plane: &Plane) -> (Option<Polygon>, Option<Polygon>) {
        split_polygon(self, plane, PLANE_EPSILON)
    }
}

impl From<Polygon> for Plane {
    fn from(polygon: Polygon) -> Self {
        polygon.plane
    }
}

impl From<&Polygon> for Plane {
    fn from(polygon: &Polygon) -> Self {
        polygon.plane.clone()
    }
}

impl fmt::Display for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Polygon[")?;
        for (i, v) in self.vertices.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "({}, {}, {})", v.x, v.y, v.z)?;
        }
        write!(f, "]")
    }
}
