//! Binary Space Partitioning tree describing a solid.
//!
//! The tree recursively partitions 3D space using planes derived from the
//! input polygons. Read as a solid, the region behind every surface is inside
//! and the region in front of it is outside. The tree supports:
//!
//! - Classifying points against the root plane or the whole solid
//! - Splitting polygons into the parts inside and outside the solid
//! - Casting rays to find the closest point where they enter the solid
//!
//! # Example
//!
//! ```
//! use bsp_kernel::{BspTree, Point3, Polygon};
//!
//! let floor = Polygon::new(vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(0.0, 0.0, 1.0),
//!     Point3::new(1.0, 0.0, 0.0),
//! ]);
//! let tree = BspTree::from_polygons(vec![floor]);
//!
//! let spanning = Polygon::new(vec![
//!     Point3::new(0.0, 1.0, 0.0),
//!     Point3::new(1.0, -1.0, 0.0),
//!     Point3::new(-1.0, -1.0, 0.0),
//! ]);
//! let split = tree.split_polygons(&[spanning]);
//! assert_eq!(split.inside.len(), 1);
//! assert_eq!(split.outside.len(), 1);
//! ```
//!
//! # Architecture
//!
//! - [`BspTree`]: The main container holding the root node
//! - [`BspNode`]: Internal nodes storing a splitting plane and coplanar polygons
//! - [`PlaneSelector`]: Strategy trait for choosing splitting planes

mod node;
mod query;
mod selector;
mod tree;

pub use node::{BspNode, faces_same_direction};
pub use query::PolygonSplit;
pub use selector::{BalancedSelector, FirstPolygon, PlaneSelector};
pub use tree::BspTree;
