//! Incremental 2D convex cells and a BSP tree built on top of them.
//!
//! [`ConvexCell`] maintains the convex polygon cut out of a bounding square by
//! a stack of half-planes, with exact `pop` and `flip`. [`BspTree`] uses it to
//! split polygons against the planes of a binary space partition as they are
//! inserted.

pub mod bsp;
pub mod cell;
mod config;
mod cuttable;
mod error;
mod face;
mod frame;
mod half_plane;
mod plane;
mod polygon;
mod triangle;

pub use bsp::{BspTree, Fragment, Placement, Side};
pub use cell::{BOUNDARY_PLANES, ConvexCell, PushGuard, polygon_area};
pub use config::{CellConfig, DEFAULT_HALF_EXTENT, RELATIVE_EPSILON};
pub use cuttable::Cuttable;
pub use error::{BspError, CellError};
pub use frame::{Trace, UvFrame};
pub use half_plane::{HalfPlane, PointClass};
pub use plane::{Classification, PLANE_EPSILON, Plane3D, PlaneSide};
pub use polygon::Polygon;
pub use triangle::Triangle;
