//! Triangles, the input unit of indexed meshes.

use nalgebra::{Point3, Vector3};

use crate::{BspError, Plane3D};

/// A triangle in 3D space, defined by three vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    vertices: [Point3<f32>; 3],
}

impl Triangle {
    /// Creates a new triangle from three points.
    ///
    /// The winding order determines the normal direction via the right-hand rule:
    /// normal = (b - a) × (c - a)
    pub fn new(a: Point3<f32>, b: Point3<f32>, c: Point3<f32>) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }

    /// Looks up the corners of an index triple in a position buffer.
    pub fn from_indexed(positions: &[Point3<f32>], indices: [usize; 3]) -> Result<Self, BspError> {
        let corner = |index: usize| {
            positions.get(index).copied().ok_or(BspError::IndexOutOfRange {
                index,
                len: positions.len(),
            })
        };
        Ok(Self::new(
            corner(indices[0])?,
            corner(indices[1])?,
            corner(indices[2])?,
        ))
    }

    #[inline]
    pub fn vertices(&self) -> &[Point3<f32>; 3] {
        &self.vertices
    }

    /// The (unnormalized) normal, twice the area in length.
    pub fn normal(&self) -> Vector3<f32> {
        let [a, b, c] = &self.vertices;
        (b - a).cross(&(c - a))
    }

    /// The supporting plane, or `None` for a zero-area triangle.
    pub fn plane(&self) -> Option<Plane3D> {
        Plane3D::from_point_and_normal(self.vertices[0], self.normal())
    }
}
