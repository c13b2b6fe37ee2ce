//! Scalar type and tolerances shared by the whole kernel.

/// The scalar type used for every coordinate and distance.
pub type Real = f64;

/// Default epsilon for plane classification.
/// Points closer than this to a plane are considered coplanar with it.
pub const PLANE_EPSILON: Real = 1e-6;

/// Cross products shorter than this are treated as degenerate when deriving
/// a plane normal.
pub const NORMAL_EPSILON: Real = 1e-12;

/// Archimedes' constant (π)
pub const PI: Real = core::f64::consts::PI;

/// π/2
pub const FRAC_PI_2: Real = core::f64::consts::FRAC_PI_2;
