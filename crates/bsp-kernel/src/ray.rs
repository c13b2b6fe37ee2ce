//! Rays and ray/plane intersection.

use crate::float_types::{NORMAL_EPSILON, Real};
use crate::plane::Plane;
use crate::vector::{Point3, Vector3};

/// A half-line `origin + t * direction` for `t >= 0`.
///
/// The direction does not have to be normalised. Distances returned by the
/// ray are parameters `t`, so they are in units of `direction`'s length.
#[derive(Debug, Clone, PartialEq)]
pub struct Ray {
    origin: Point3,
    direction: Vector3,
}

impl Ray {
    pub fn new(origin: Point3, direction: Vector3) -> Self {
        Self { origin, direction }
    }

    #[inline]
    pub fn origin(&self) -> Point3 {
        self.origin
    }

    #[inline]
    pub fn direction(&self) -> Vector3 {
        self.direction
    }

    /// The point `origin + t * direction`.
    #[inline]
    pub fn point_at(&self, t: Real) -> Point3 {
        self.origin + self.direction * t
    }

    /// Parameter `t` at which the supporting line crosses the plane, which may
    /// be negative. Returns `None` when the ray is parallel to the plane.
    pub fn crossing_parameter(&self, plane: &Plane) -> Option<Real> {
        let denom = plane.normal().dot(&self.direction);
        if denom.abs() < NORMAL_EPSILON {
            return None;
        }
        Some((plane.offset() - plane.normal().dot(&self.origin.coords)) / denom)
    }

    /// Parametric distance along the ray to the plane.
    ///
    /// Returns `None` when the ray is parallel to the plane or the plane lies
    /// behind the origin. A ray starting on the plane has distance `0`.
    pub fn distance_to(&self, plane: &Plane) -> Option<Real> {
        self.crossing_parameter(plane).filter(|t| *t >= 0.0)
    }

    /// The point where the ray meets the plane, if it does.
    pub fn intersects(&self, plane: &Plane) -> Option<Point3> {
        self.distance_to(plane).map(|t| self.point_at(t))
    }
}
