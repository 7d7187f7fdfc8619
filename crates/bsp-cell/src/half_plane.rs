//! Oriented lines in 2D and point classification against them.

use nalgebra::{Point2, Vector2};

use crate::CellError;

/// Where a point lies relative to a half-plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointClass {
    /// Strictly inside (signed distance below `-epsilon`)
    In,
    /// Strictly outside (signed distance above `epsilon`)
    Out,
    /// On the boundary line, within tolerance
    On,
}

/// A closed half-plane `normal · x <= offset`, with a unit normal.
///
/// The normal points out of the half-plane, so negative signed distances are
/// inside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HalfPlane {
    normal: Vector2<f32>,
    offset: f32,
}

impl HalfPlane {
    /// Creates a half-plane from an outward normal and offset.
    /// The normal is normalized and the offset scaled with it.
    pub fn new(normal: Vector2<f32>, offset: f32) -> Result<Self, CellError> {
        let norm = normal.norm();
        if !(norm > f32::EPSILON) || !offset.is_finite() {
            return Err(CellError::DegenerateNormal);
        }
        Ok(Self {
            normal: normal / norm,
            offset: offset / norm,
        })
    }

    /// Builds from a normal already known to be unit length.
    pub(crate) fn from_unit(normal: Vector2<f32>, offset: f32) -> Self {
        debug_assert!((normal.norm() - 1.0).abs() < 1e-4);
        Self { normal, offset }
    }

    /// The half-plane to the left of the directed line `from -> to`.
    ///
    /// Walking a counter-clockwise polygon's edges this way yields half-planes
    /// whose intersection is the polygon.
    pub fn left_of(from: Point2<f32>, to: Point2<f32>) -> Result<Self, CellError> {
        let dir = to - from;
        let normal = Vector2::new(dir.y, -dir.x);
        Self::new(normal, normal.dot(&from.coords))
    }

    #[inline]
    pub fn normal(&self) -> Vector2<f32> {
        self.normal
    }

    #[inline]
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Signed distance from `point` to the boundary line, positive outside.
    #[inline]
    pub fn signed_distance(&self, point: Point2<f32>) -> f32 {
        self.normal.dot(&point.coords) - self.offset
    }

    pub fn classify(&self, point: Point2<f32>, epsilon: f32) -> PointClass {
        let dist = self.signed_distance(point);
        if dist > epsilon {
            PointClass::Out
        } else if dist < -epsilon {
            PointClass::In
        } else {
            PointClass::On
        }
    }

    /// The complementary half-plane, sharing the same boundary line.
    #[inline]
    pub fn flipped(&self) -> Self {
        Self {
            normal: -self.normal,
            offset: -self.offset,
        }
    }

    /// Intersection point of the two boundary lines, `None` when parallel.
    pub fn intersect(&self, other: &Self) -> Option<Point2<f32>> {
        let det = self.normal.perp(&other.normal);
        if det.abs() <= f32::EPSILON {
            return None;
        }
        let x = (self.offset * other.normal.y - other.offset * self.normal.y) / det;
        let y = (self.normal.x * other.offset - other.normal.x * self.offset) / det;
        Some(Point2::new(x, y))
    }
}
