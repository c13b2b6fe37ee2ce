//! Points and directions.
//!
//! The kernel works on `nalgebra` vectors specialised to [`Real`]. Positions
//! are [`Point3`], directions and normals are [`Vector3`]. Equality is exact
//! component comparison and `norm()` is the Euclidean length.
//!
//! Normalising the zero vector with `normalize()` yields NaN components.
//! Callers that cannot rule this out should use `try_normalize`.

use crate::float_types::Real;

/// A direction or displacement in 3D space.
pub type Vector3 = nalgebra::Vector3<Real>;

/// A position in 3D space.
pub type Point3 = nalgebra::Point3<Real>;

/// Linearly interpolates between two points: `a + (b - a) * t`.
#[inline]
pub fn lerp(a: &Point3, b: &Point3, t: Real) -> Point3 {
    a + (b - a) * t
}

/// Returns true if every coordinate is finite.
#[inline]
pub fn is_finite(p: &Point3) -> bool {
    p.coords.iter().all(|c| c.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_exact() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        assert_eq!(a, a);
        assert_ne!(a, Vector3::new(1.0, 2.0, 3.0 + 1e-12));
    }

    #[test]
    fn length_of_three_four_five() {
        let b = Vector3::new(4.0, 3.0, 0.0);
        assert_eq!(b.norm(), 5.0);
    }

    #[test]
    fn zero_vector_has_zero_length() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        assert_eq!((a - a).norm(), 0.0);
        assert!((a - a).try_normalize(0.0).is_none());
    }

    #[test]
    fn lerp_hits_endpoints_and_midpoint() {
        let a = Point3::new(0.0, 1.0, 0.0);
        let b = Point3::new(1.0, -1.0, 0.0);
        assert_eq!(lerp(&a, &b, 0.0), a);
        assert_eq!(lerp(&a, &b, 1.0), b);
        assert_eq!(lerp(&a, &b, 0.5), Point3::new(0.5, 0.0, 0.0));
    }

    #[test]
    fn finite_check() {
        assert!(is_finite(&Point3::new(1.0, 2.0, 3.0)));
        assert!(!is_finite(&Point3::new(Real::NAN, 0.0, 0.0)));
        assert!(!is_finite(&Point3::new(0.0, Real::INFINITY, 0.0)));
    }
}
