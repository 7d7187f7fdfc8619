//! Error types for the cell engine and the BSP partitioner.

use thiserror::Error;

/// Failures reported by [`ConvexCell`](crate::ConvexCell).
///
/// Clipping a cell down to nothing is not an error; check
/// [`ConvexCell::is_empty`](crate::ConvexCell::is_empty) instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CellError {
    /// The half-plane normal has (near) zero length.
    #[error("half-plane normal is degenerate")]
    DegenerateNormal,

    /// `pop` or `flip` was called with only the bounding planes on the stack.
    #[error("no half-plane has been pushed")]
    NothingPushed,

    /// The vertex classification against the new plane crosses the cell more
    /// than twice, which cannot happen for a convex cell outside of
    /// floating-point breakdown.
    #[error("cut by half-plane {index} is ambiguous")]
    AmbiguousCut { index: usize },

    /// A chain that must contain the top half-plane does not.
    #[error("active cycle lost half-plane {index}")]
    CorruptCycle { index: usize },
}

/// Failures reported by [`BspTree`](crate::BspTree) and polygon construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BspError {
    /// Fewer than three vertices were supplied.
    #[error("polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    /// The vertices are collinear (or nearly so) and span no plane.
    #[error("polygon has no well-defined plane")]
    DegeneratePolygon,

    /// A triangle refers to a vertex outside the position buffer.
    #[error("vertex index {index} out of range for {len} positions")]
    IndexOutOfRange { index: usize, len: usize },

    #[error(transparent)]
    Cell(#[from] CellError),
}
