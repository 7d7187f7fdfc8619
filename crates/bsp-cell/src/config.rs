//! Tolerance and bounding-box configuration for the cell engine.

/// Default half-extent of the bounding square a fresh cell starts from.
pub const DEFAULT_HALF_EXTENT: f32 = 1000.0;

/// Classification tolerance as a fraction of the half-extent.
///
/// `f32` carries about seven significant digits; intersections computed at
/// the scale of the bounding square are good to roughly `1e-6` of it, so the
/// tolerance sits an order of magnitude above that.
pub const RELATIVE_EPSILON: f32 = 1e-5;

/// Geometry configuration of a [`ConvexCell`](crate::ConvexCell).
///
/// The bounding square `|x| <= half_extent, |y| <= half_extent` is the finite
/// stand-in for the unbounded plane, and `epsilon` is the distance below which
/// a vertex counts as lying on a half-plane's boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellConfig {
    pub half_extent: f32,
    pub epsilon: f32,
}

impl Default for CellConfig {
    fn default() -> Self {
        Self::with_half_extent(DEFAULT_HALF_EXTENT)
    }
}

impl CellConfig {
    /// Bounding square of the given half-extent, with the tolerance scaled to it.
    ///
    /// # Panics
    /// Panics if `half_extent` is not a positive finite number.
    pub fn with_half_extent(half_extent: f32) -> Self {
        assert!(
            half_extent.is_finite() && half_extent > 0.0,
            "Cell half-extent must be positive and finite"
        );
        Self {
            half_extent,
            epsilon: half_extent * RELATIVE_EPSILON,
        }
    }

    /// Configuration whose bounding square comfortably encloses a disc of
    /// `radius` around the origin.
    pub fn enclosing(radius: f32) -> Self {
        Self::with_half_extent((radius * 2.0).max(1.0))
    }
}
