//! Binary Space Partitioning tree for 3D polygon management.
//!
//! The tree is grown one polygon at a time. Each insertion walks the tree
//! with a [`ConvexCell`](crate::ConvexCell) holding the polygon in its own
//! plane: node planes are pushed as half-planes, the back child receives the
//! clipped cell and the front child the flipped one. Wherever the walk falls
//! off the tree, a new node is grown holding what is left of the polygon.
//!
//! # Example
//!
//! ```
//! use bsp_cell::BspTree;
//! use bsp_cell::bsp::{CollectingVisitor, Order};
//! use nalgebra::Point3;
//!
//! // A tetrahedron, wound outward
//! let positions = [
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//!     Point3::new(0.0, 0.0, 1.0),
//! ];
//! let tree = BspTree::from_indexed_triangles(
//!     &positions,
//!     &[[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]],
//! )?;
//! assert!(tree.includes(Point3::new(0.1, 0.1, 0.1)));
//! assert!(!tree.includes(Point3::new(1.0, 1.0, 1.0)));
//!
//! // Traverse front-to-back for rendering
//! let eye = Point3::new(0.0, 0.0, 10.0); // The location of the viewer
//! let mut visitor = CollectingVisitor::new();
//! tree.traverse(eye, Order::FrontToBack, &mut visitor);
//! assert_eq!(visitor.polygons().len(), 4);
//! # Ok::<(), bsp_cell::BspError>(())
//! ```
//!
//! # Architecture
//!
//! - [`BspTree`]: The plane table and the root node
//! - [`BspNode`]: A plane id, two children and the faces lying on the plane
//! - [`Fragment`]: Where each piece of an inserted polygon ended up
//! - [`BspVisitor`]: Visitor trait for custom traversal behavior

mod insert;
mod node;
mod tree;
mod visitor;

// Re-export main types
pub use insert::{Fragment, Placement};
pub use node::{BspNode, Side};
pub use tree::BspTree;
pub use visitor::{BspVisitor, CollectingVisitor, FnVisitor, Order};
