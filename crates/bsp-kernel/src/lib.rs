//! A small 3D geometry kernel built around a solid BSP (Binary Space
//! Partitioning) tree.
//!
//! Primitives ([`Vector3`], [`Quaternion`], [`Plane`], [`Ray`], [`Polygon`])
//! feed a [`BspTree`] that supports point classification, polygon splitting
//! and ray casting.

pub mod bsp;
mod clip;
mod error;
pub mod float_types;
mod plane;
mod polygon;
mod quaternion;
mod ray;
mod vector;

pub use bsp::{
    BalancedSelector, BspNode, BspTree, FirstPolygon, PlaneSelector, PolygonSplit,
    faces_same_direction,
};
pub use clip::{classify_polygon, split_polygon};
pub use error::GeometryError;
pub use float_types::{PLANE_EPSILON, Real};
pub use plane::{Classification, Plane, PlaneSide};
pub use polygon::Polygon;
pub use quaternion::Quaternion;
pub use ray::Ray;
pub use vector::{Point3, Vector3, lerp};
