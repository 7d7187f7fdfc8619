//! A polygon loaded into a convex cell in its own plane.

use nalgebra::Point2;

use crate::{BspError, CellConfig, ConvexCell, HalfPlane, Plane3D, Polygon, UvFrame};

/// A polygon's plane, 2D frame, and a cell seeded with the polygon's edges.
///
/// Further pushes clip the polygon; [`FaceCell::lift`] turns whatever is left
/// back into a 3D polygon on the polygon's plane.
#[derive(Debug, Clone)]
pub(crate) struct FaceCell {
    pub(crate) frame: UvFrame,
    pub(crate) plane: Plane3D,
    pub(crate) cell: ConvexCell,
}

impl FaceCell {
    pub(crate) fn new(polygon: &Polygon) -> Result<Self, BspError> {
        let plane = polygon.plane().clone();
        let vertices = polygon.vertices();
        let frame = UvFrame::new(&plane, polygon.centroid(), vertices[1] - vertices[0]);

        let uv: Vec<Point2<f32>> = vertices.iter().map(|v| frame.to_uv(v)).collect();
        let mut cell = ConvexCell::with_config(CellConfig::enclosing(polygon.radius()));

        let n = uv.len();
        for i in 0..n {
            // Repeated vertices give zero-length edges with no direction.
            if let Ok(edge) = HalfPlane::left_of(uv[i], uv[(i + 1) % n]) {
                cell.push(edge)?;
            }
        }

        Ok(Self { frame, plane, cell })
    }

    /// The current contents of `cell` as a polygon on `plane`, or `None` when
    /// fewer than three corners are left.
    pub(crate) fn lift(frame: &UvFrame, plane: &Plane3D, cell: &ConvexCell) -> Option<Polygon> {
        let corners = cell.vertices();
        (corners.len() >= 3).then(|| {
            let world = corners.iter().map(|uv| frame.to_world(uv)).collect();
            Polygon::with_plane(world, plane.clone())
        })
    }
}
