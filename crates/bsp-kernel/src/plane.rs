//! Oriented planes and point classification.

use crate::error::GeometryError;
use crate::float_types::{NORMAL_EPSILON, PLANE_EPSILON, Real};
use crate::vector::{Point3, Vector3};

/// Which side of a plane a point lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneSide {
    /// Point is in front of the plane (positive side of normal)
    Front,
    /// Point is behind the plane (negative side of normal)
    Back,
    /// Point lies on the plane (within epsilon tolerance)
    Coplanar,
}

/// Classification of a polygon relative to a plane.
///
/// `Spanning` only exists while routing a polygon; nothing stores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// No vertex is behind the plane and at least one is in front
    Front,
    /// No vertex is in front of the plane and at least one is behind
    Back,
    /// All vertices are on the plane
    Coplanar,
    /// Vertices are strictly on both sides
    Spanning,
}

/// A plane in 3D space, represented as `normal · point = offset`.
///
/// A valid plane has a unit normal. Planes built from degenerate input
/// (zero normal, collinear points) keep a zero normal and report
/// `is_valid() == false` instead of panicking. Using the normal or offset of
/// an invalid plane is a caller error; check [`Plane::is_valid`] first.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    normal: Vector3,
    offset: Real,
}

impl Default for Plane {
    /// The invalid plane: zero normal, zero offset.
    fn default() -> Self {
        Self {
            normal: Vector3::zeros(),
            offset: 0.0,
        }
    }
}

impl Plane {
    /// Creates a new plane from a normal vector and offset.
    /// The normal and offset are scaled so the normal has unit length.
    ///
    /// A zero normal produces an invalid plane.
    pub fn new(normal: Vector3, offset: Real) -> Self {
        let norm = normal.norm();
        if norm <= NORMAL_EPSILON || !norm.is_finite() {
            return Self::default();
        }
        Self {
            normal: normal / norm,
            offset: offset / norm,
        }
    }

    /// Creates a plane from a point on the plane and a normal vector.
    ///
    /// A zero normal produces an invalid plane.
    pub fn from_point_and_normal(point: &Point3, normal: &Vector3) -> Self {
        match normal.try_normalize(NORMAL_EPSILON) {
            Some(unit_normal) => Self {
                offset: unit_normal.dot(&point.coords),
                normal: unit_normal,
            },
            None => Self::default(),
        }
    }

    /// Creates a plane through three points.
    /// The normal direction follows the right-hand rule: (b - a) × (c - a).
    ///
    /// Never fails: coincident or collinear points give an invalid plane.
    pub fn from_points(a: &Point3, b: &Point3, c: &Point3) -> Self {
        let normal = (b - a).cross(&(c - a));
        Self::from_point_and_normal(a, &normal)
    }

    /// Like [`Plane::from_points`], but reports degenerate input as an error.
    pub fn try_from_points(a: &Point3, b: &Point3, c: &Point3) -> Result<Self, GeometryError> {
        if ![a, b, c].iter().all(|p| crate::vector::is_finite(p)) {
            return Err(GeometryError::NonFiniteCoordinate);
        }
        let plane = Self::from_points(a, b, c);
        if plane.is_valid() {
            Ok(plane)
        } else {
            Err(GeometryError::DegeneratePlane)
        }
    }

    /// Returns true if the plane has a unit-length normal.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.offset.is_finite() && (self.normal.norm() - 1.0).abs() < PLANE_EPSILON
    }

    /// Returns the unit normal vector of the plane.
    #[inline]
    pub fn normal(&self) -> Vector3 {
        self.normal
    }

    /// Returns the offset `w`: the signed distance from the origin to the
    /// plane along the normal.
    #[inline]
    pub fn offset(&self) -> Real {
        self.offset
    }

    /// Computes the signed distance from a point to the plane.
    /// - Positive: point is in front (same side as normal)
    /// - Negative: point is behind (opposite side from normal)
    /// - Zero: point is on the plane
    #[inline]
    pub fn signed_distance_to(&self, point: &Point3) -> Real {
        self.normal.dot(&point.coords) - self.offset
    }

    /// Unsigned distance from a point to the plane.
    #[inline]
    pub fn distance_to(&self, point: &Point3) -> Real {
        self.signed_distance_to(point).abs()
    }

    /// Classifies which side of the plane a point lies on.
    /// Uses the default `PLANE_EPSILON` tolerance.
    #[inline]
    pub fn classify_point(&self, point: &Point3) -> PlaneSide {
        self.classify_point_with_epsilon(point, PLANE_EPSILON)
    }

    /// Classifies which side of the plane a point lies on, with a custom epsilon.
    #[inline]
    pub fn classify_point_with_epsilon(&self, point: &Point3, epsilon: Real) -> PlaneSide {
        side_of_distance(self.signed_distance_to(point), epsilon)
    }

    /// Returns a new plane with the normal flipped (facing the opposite direction).
    #[inline]
    pub fn flipped(&self) -> Self {
        Self {
            normal: -self.normal,
            offset: -self.offset,
        }
    }

    /// Projects a point onto the plane (finds the closest point on the plane).
    #[inline]
    pub fn project_point(&self, point: &Point3) -> Point3 {
        point - self.normal * self.signed_distance_to(point)
    }

    /// Computes the intersection of a line segment with the plane.
    ///
    /// Returns `Some((t, point))` where `t` is the interpolation parameter
    /// (0.0 = start, 1.0 = end). Returns `None` if the segment is parallel to
    /// the plane or doesn't reach it.
    pub fn intersect_segment(&self, start: &Point3, end: &Point3) -> Option<(Real, Point3)> {
        let d0 = self.signed_distance_to(start);
        let d1 = self.signed_distance_to(end);
        let denom = d0 - d1;

        if denom.abs() < NORMAL_EPSILON {
            return None;
        }

        let t = d0 / denom;
        if !(0.0..=1.0).contains(&t) {
            return None;
        }

        Some((t, crate::vector::lerp(start, end, t)))
    }
}

/// Maps a signed distance to a side: coplanar when `|d| < epsilon`,
/// otherwise the sign decides.
#[inline]
pub(crate) fn side_of_distance(distance: Real, epsilon: Real) -> PlaneSide {
    if distance.abs() < epsilon {
        PlaneSide::Coplanar
    } else if distance > 0.0 {
        PlaneSide::Front
    } else {
        PlaneSide::Back
    }
}
