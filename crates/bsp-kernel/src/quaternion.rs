//! Rotation quaternions.

use std::fmt;
use std::ops::Mul;

use nalgebra::UnitQuaternion;

use crate::float_types::Real;
use crate::vector::Vector3;

/// A quaternion `(x, y, z, w)` where `(x, y, z)` is the vector part and `w`
/// the scalar part. Represents a rotation when it has unit length.
///
/// Non-unit quaternions are allowed; [`Quaternion::apply_to`] then scales
/// the rotated vector by the squared length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion {
    inner: nalgebra::Quaternion<Real>,
}

impl Quaternion {
    /// Creates a quaternion from its components.
    #[inline]
    pub fn new(x: Real, y: Real, z: Real, w: Real) -> Self {
        Self {
            inner: nalgebra::Quaternion::new(w, x, y, z),
        }
    }

    /// The identity rotation `(0, 0, 0, 1)`.
    #[inline]
    pub fn identity() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    /// Creates the rotation of `angle` radians around `axis`.
    ///
    /// The axis is assumed to be unit length and is not renormalised:
    /// the result is `(axis * sin(angle / 2), cos(angle / 2))`.
    pub fn from_axis_angle(axis: &Vector3, angle: Real) -> Self {
        let (sin, cos) = (angle * 0.5).sin_cos();
        let v = axis.scale(sin);
        Self::new(v.x, v.y, v.z, cos)
    }

    #[inline]
    pub fn x(&self) -> Real {
        self.inner.i
    }

    #[inline]
    pub fn y(&self) -> Real {
        self.inner.j
    }

    #[inline]
    pub fn z(&self) -> Real {
        self.inner.k
    }

    #[inline]
    pub fn w(&self) -> Real {
        self.inner.w
    }

    /// Euclidean length of the four components.
    #[inline]
    pub fn length(&self) -> Real {
        self.inner.norm()
    }

    /// Returns a unit-length copy. The zero quaternion yields NaN components.
    #[inline]
    pub fn normalized(&self) -> Self {
        Self {
            inner: self.inner.normalize(),
        }
    }

    /// Returns the conjugate `(-x, -y, -z, w)`, the inverse rotation for unit
    /// quaternions.
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self {
            inner: self.inner.conjugate(),
        }
    }

    /// Rotates `v` with the sandwich product `q * (v, 0) * q̄`.
    pub fn apply_to(&self, v: &Vector3) -> Vector3 {
        let pure = nalgebra::Quaternion::from_imag(*v);
        (self.inner * pure * self.inner.conjugate()).imag()
    }

    /// Converts to a `nalgebra` unit quaternion, normalising on the way.
    #[inline]
    pub fn to_unit(&self) -> UnitQuaternion<Real> {
        UnitQuaternion::from_quaternion(self.inner)
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<UnitQuaternion<Real>> for Quaternion {
    fn from(unit: UnitQuaternion<Real>) -> Self {
        Self {
            inner: unit.into_inner(),
        }
    }
}

/// Composes two rotations: `(a * b).apply_to(v) == a.apply_to(&b.apply_to(v))`.
impl Mul for Quaternion {
    type Output = Quaternion;

    fn mul(self, rhs: Quaternion) -> Quaternion {
        Quaternion {
            inner: self.inner * rhs.inner,
        }
    }
}

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Quaternion({}, {}, {}, {})",
            self.x(),
            self.y(),
            self.z(),
            self.w()
        )
    }
}
