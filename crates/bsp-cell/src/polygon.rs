//! Convex planar polygons, the faces stored in the BSP tree.

use nalgebra::{Point3, Vector3};

use crate::{BspError, Classification, Plane3D, Triangle};

/// A convex polygon in 3D space, defined by an ordered list of vertices.
///
/// Vertices should be coplanar and in counter-clockwise winding order
/// when viewed from the front (the direction the normal points). The
/// supporting plane is computed once, at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point3<f32>>,
    plane: Plane3D,
}

impl Polygon {
    /// Creates a polygon from its vertices.
    ///
    /// The plane normal is the area-weighted (Newell) normal, so it does not
    /// depend on which three vertices happen to come first.
    pub fn new(vertices: Vec<Point3<f32>>) -> Result<Self, BspError> {
        if vertices.len() < 3 {
            return Err(BspError::TooFewVertices(vertices.len()));
        }
        let normal = area_vector(&vertices);
        let plane = Plane3D::from_point_and_normal(centroid(&vertices), normal)
            .ok_or(BspError::DegeneratePolygon)?;
        Ok(Self { vertices, plane })
    }

    /// Builds a piece of a polygon that already knows its plane.
    pub(crate) fn with_plane(vertices: Vec<Point3<f32>>, plane: Plane3D) -> Self {
        debug_assert!(vertices.len() >= 3);
        Self { vertices, plane }
    }

    #[inline]
    pub fn vertices(&self) -> &[Point3<f32>] {
        &self.vertices
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Always false for a constructed polygon.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// The plane this polygon lies on, oriented by its winding.
    #[inline]
    pub fn plane(&self) -> &Plane3D {
        &self.plane
    }

    /// Unit normal of the polygon's plane.
    #[inline]
    pub fn normal(&self) -> Vector3<f32> {
        self.plane.normal()
    }

    pub fn centroid(&self) -> Point3<f32> {
        centroid(&self.vertices)
    }

    pub fn area(&self) -> f32 {
        area_vector(&self.vertices).norm() * 0.5
    }

    /// Largest distance from the centroid to a vertex.
    pub fn radius(&self) -> f32 {
        let center = self.centroid();
        self.vertices
            .iter()
            .map(|v| (v - center).norm())
            .fold(0.0, f32::max)
    }

    /// Classifies this polygon relative to a plane.
    pub fn classify(&self, plane: &Plane3D) -> Classification {
        plane.classify_points(&self.vertices)
    }

    /// True if the polygon's normal points the same way as `plane`'s.
    #[inline]
    pub fn faces_same_direction(&self, plane: &Plane3D) -> bool {
        self.plane.faces_same_direction(plane)
    }
}

fn centroid(vertices: &[Point3<f32>]) -> Point3<f32> {
    let sum: Vector3<f32> = vertices.iter().map(|p| p.coords).sum();
    Point3::from(sum / vertices.len() as f32)
}

/// Twice the vector area of a closed polygon.
fn area_vector(vertices: &[Point3<f32>]) -> Vector3<f32> {
    let first = vertices[0];
    vertices
        .windows(2)
        .skip(1)
        .map(|pair| (pair[0] - first).cross(&(pair[1] - first)))
        .sum()
}

impl TryFrom<&Triangle> for Polygon {
    type Error = BspError;

    fn try_from(triangle: &Triangle) -> Result<Self, BspError> {
        Polygon::new(triangle.vertices().to_vec())
    }
}

impl TryFrom<Triangle> for Polygon {
    type Error = BspError;

    fn try_from(triangle: Triangle) -> Result<Self, BspError> {
        Polygon::try_from(&triangle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square(z: f32) -> Polygon {
        Polygon::new(vec![
            Point3::new(0.0, 0.0, z),
            Point3::new(1.0, 0.0, z),
            Point3::new(1.0, 1.0, z),
            Point3::new(0.0, 1.0, z),
        ])
        .unwrap()
    }

    #[test]
    fn plane_follows_winding() {
        let square = unit_square(2.0);
        assert!((square.normal() - Vector3::z()).norm() < 1e-6);
        assert!((square.plane().offset() - 2.0).abs() < 1e-6);
        assert!((square.area() - 1.0).abs() < 1e-6);
        assert_eq!(square.centroid(), Point3::new(0.5, 0.5, 2.0));
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(
            Polygon::new(vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0)]),
            Err(BspError::TooFewVertices(2))
        );
        let collinear = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        ];
        assert_eq!(Polygon::new(collinear), Err(BspError::DegeneratePolygon));
    }

    #[test]
    fn normal_ignores_collinear_prefix() {
        // The first three vertices are collinear; the polygon is not.
        let polygon = Polygon::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
        ])
        .unwrap();
        assert!((polygon.normal() - Vector3::z()).norm() < 1e-6);
    }

    #[test]
    fn classify_against_planes() {
        let square = unit_square(0.0);
        assert_eq!(square.classify(&Plane3D::new(Vector3::z(), -1.0)), Classification::Front);
        assert_eq!(square.classify(&Plane3D::new(Vector3::z(), 0.0)), Classification::Coplanar);
        assert_eq!(square.classify(&Plane3D::new(Vector3::x(), 0.5)), Classification::Spanning);
        assert!(square.faces_same_direction(&Plane3D::new(Vector3::z(), 5.0)));
    }

    #[test]
    fn triangle_conversion() {
        let triangle = Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, 0.0),
        );
        let polygon = Polygon::try_from(&triangle).unwrap();
        assert_eq!(polygon.len(), 3);
        assert!(polygon.normal().y > 0.0);
        assert!((polygon.radius() - (5.0f32 / 9.0).sqrt()).abs() < 1e-5);
    }
}
