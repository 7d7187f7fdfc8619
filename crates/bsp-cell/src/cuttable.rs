//! Polygon cutting/splitting by a plane.

use crate::face::FaceCell;
use crate::frame::Trace;
use crate::{BspError, Classification, Plane3D, Polygon, Triangle};

/// Trait for geometry that can be cut by a plane.
pub trait Cuttable {
    /// Cuts the geometry by a plane.
    ///
    /// Returns `(front, back)` where:
    /// - `front`: `Some(polygon)` containing the part on the front side of the plane
    /// - `back`: `Some(polygon)` containing the part on the back side of the plane
    ///
    /// # Return values by classification
    ///
    /// - **Front**: `(Some(self), None)` - entire geometry is in front
    /// - **Back**: `(None, Some(self))` - entire geometry is behind
    /// - **Coplanar**: `(Some(self), None)` - treated as front
    /// - **Spanning**: `(Some(front_part), Some(back_part))` - split into two pieces
    fn cut(&self, plane: &Plane3D) -> Result<(Option<Polygon>, Option<Polygon>), BspError>;
}

impl Cuttable for Polygon {
    fn cut(&self, plane: &Plane3D) -> Result<(Option<Polygon>, Option<Polygon>), BspError> {
        match self.classify(plane) {
            Classification::Front | Classification::Coplanar => Ok((Some(self.clone()), None)),
            Classification::Back => Ok((None, Some(self.clone()))),
            Classification::Spanning => split_polygon(self, plane),
        }
    }
}

/// Splits a spanning polygon into front and back parts.
///
/// The polygon is loaded into a convex cell in its own plane and `plane` is
/// pushed as a half-plane: the clipped cell is the back part, the flipped
/// cell the front part.
fn split_polygon(
    polygon: &Polygon,
    plane: &Plane3D,
) -> Result<(Option<Polygon>, Option<Polygon>), BspError> {
    let FaceCell {
        frame,
        plane: own,
        mut cell,
    } = FaceCell::new(polygon)?;

    match frame.trace(plane) {
        Trace::Parallel(dist) if dist < 0.0 => Ok((None, Some(polygon.clone()))),
        Trace::Parallel(_) => Ok((Some(polygon.clone()), None)),
        Trace::Line(half_plane) => {
            let mut guard = cell.push_scoped(half_plane)?;
            let back = FaceCell::lift(&frame, &own, &guard);
            guard.flip()?;
            let front = FaceCell::lift(&frame, &own, &guard);
            Ok((front, back))
        }
    }
}

impl Cuttable for Triangle {
    fn cut(&self, plane: &Plane3D) -> Result<(Option<Polygon>, Option<Polygon>), BspError> {
        Polygon::try_from(self)?.cut(plane)
    }
}
