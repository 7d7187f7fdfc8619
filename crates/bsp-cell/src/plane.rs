//! Planes in 3D, the splitting surfaces of the BSP tree.

use nalgebra::{Point3, Vector3};

/// Default epsilon for plane classification.
/// Points within this distance of the plane are considered "on" the plane.
pub const PLANE_EPSILON: f32 = 1e-5;

/// Which side of a plane a point lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneSide {
    /// Positive side of the normal
    Front,
    /// Negative side of the normal; the inside of a solid
    Back,
    /// Within epsilon of the plane
    OnPlane,
}

/// Classification of a whole polygon relative to a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Front,
    Back,
    Coplanar,
    Spanning,
}

/// A plane in 3D space, `normal · point = offset`, with a unit normal.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane3D {
    normal: Vector3<f32>,
    offset: f32,
}

impl Plane3D {
    /// Creates a plane from a normal and offset, normalizing both.
    /// Returns `None` if the normal has (near) zero length.
    pub fn try_new(normal: Vector3<f32>, offset: f32) -> Option<Self> {
        let norm = normal.norm();
        (norm > f32::EPSILON).then(|| Self {
            normal: normal / norm,
            offset: offset / norm,
        })
    }

    /// Creates a plane from a normal and offset, normalizing both.
    ///
    /// # Panics
    /// Panics if the normal vector has zero length.
    pub fn new(normal: Vector3<f32>, offset: f32) -> Self {
        Self::try_new(normal, offset).expect("Plane normal cannot be zero")
    }

    /// Creates a plane through `point` with the given normal direction.
    /// Returns `None` if the normal has (near) zero length.
    pub fn from_point_and_normal(point: Point3<f32>, normal: Vector3<f32>) -> Option<Self> {
        let norm = normal.norm();
        (norm > f32::EPSILON).then(|| {
            let normal = normal / norm;
            Self {
                offset: normal.dot(&point.coords),
                normal,
            }
        })
    }

    #[inline]
    pub fn normal(&self) -> Vector3<f32> {
        self.normal
    }

    #[inline]
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Signed distance from `point` to the plane, positive in front.
    #[inline]
    pub fn signed_distance(&self, point: Point3<f32>) -> f32 {
        self.normal.dot(&point.coords) - self.offset
    }

    /// Classifies a point using [`PLANE_EPSILON`].
    #[inline]
    pub fn classify_point(&self, point: Point3<f32>) -> PlaneSide {
        self.classify_point_with_epsilon(point, PLANE_EPSILON)
    }

    pub fn classify_point_with_epsilon(&self, point: Point3<f32>, epsilon: f32) -> PlaneSide {
        let dist = self.signed_distance(point);
        if dist > epsilon {
            PlaneSide::Front
        } else if dist < -epsilon {
            PlaneSide::Back
        } else {
            PlaneSide::OnPlane
        }
    }

    /// Classifies a set of points: all on one side, all on the plane, or both.
    pub fn classify_points<'a>(&self, points: impl IntoIterator<Item = &'a Point3<f32>>) -> Classification {
        let (mut front, mut back) = (false, false);
        for point in points {
            match self.classify_point(*point) {
                PlaneSide::Front => front = true,
                PlaneSide::Back => back = true,
                PlaneSide::OnPlane => {}
            }
        }
        match (front, back) {
            (false, false) => Classification::Coplanar,
            (true, false) => Classification::Front,
            (false, true) => Classification::Back,
            (true, true) => Classification::Spanning,
        }
    }

    /// The same plane with front and back exchanged.
    #[inline]
    pub fn flipped(&self) -> Self {
        Self {
            normal: -self.normal,
            offset: -self.offset,
        }
    }

    /// True if the normals point into the same half-space.
    #[inline]
    pub fn faces_same_direction(&self, other: &Plane3D) -> bool {
        self.normal.dot(&other.normal) > 0.0
    }
}
