//! Errors returned by the fallible geometry constructors.

use thiserror::Error;

/// Reasons a plane or polygon could not be built from the given input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// A polygon needs at least three vertices.
    #[error("polygon needs at least 3 vertices, got {count}")]
    TooFewVertices { count: usize },

    /// The points are coincident or collinear, so no normal can be derived.
    #[error("points are collinear or coincident; plane normal is degenerate")]
    DegeneratePlane,

    /// A coordinate is NaN or infinite.
    #[error("coordinate is NaN or infinite")]
    NonFiniteCoordinate,
}
