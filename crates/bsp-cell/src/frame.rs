//! 2D coordinates on a plane in 3D.
//!
//! The BSP inserts a polygon by clipping it in its own plane. A [`UvFrame`]
//! maps points of that plane to 2D and back, and turns other 3D planes into
//! the half-planes they cut out of it.

use nalgebra::{Point2, Point3, Vector2, Vector3};

use crate::{HalfPlane, PLANE_EPSILON, Plane3D};

/// How a 3D plane meets the frame's plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Trace {
    /// The planes intersect; the back side of the 3D plane is this half-plane.
    Line(HalfPlane),
    /// The planes are parallel. The value is the signed distance of the frame
    /// plane from the 3D plane, positive in front.
    Parallel(f32),
}

/// An orthonormal frame `origin + u·du + v·dv` spanning a plane.
///
/// `du × dv` equals the plane normal, so polygons wound counter-clockwise
/// around the normal stay counter-clockwise in `(u, v)`.
#[derive(Debug, Clone, PartialEq)]
pub struct UvFrame {
    origin: Point3<f32>,
    du: Vector3<f32>,
    dv: Vector3<f32>,
    normal: Vector3<f32>,
}

impl UvFrame {
    /// Builds a frame on `plane` centred at `origin` (projected onto the plane),
    /// with `du` along `toward` where possible.
    pub fn new(plane: &Plane3D, origin: Point3<f32>, toward: Vector3<f32>) -> Self {
        let normal = plane.normal();
        let origin = origin - normal * plane.signed_distance(origin);

        let tangent = toward - normal * normal.dot(&toward);
        let du = tangent
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(|| any_perpendicular(&normal));
        let dv = normal.cross(&du);

        Self {
            origin,
            du,
            dv,
            normal,
        }
    }

    #[inline]
    pub fn origin(&self) -> Point3<f32> {
        self.origin
    }

    /// Unit normal of the frame plane, `du × dv`.
    #[inline]
    pub fn normal(&self) -> Vector3<f32> {
        self.normal
    }

    /// Coordinates of the projection of `point` onto the plane.
    pub fn to_uv(&self, point: &Point3<f32>) -> Point2<f32> {
        let offset = point - self.origin;
        Point2::new(offset.dot(&self.du), offset.dot(&self.dv))
    }

    /// The 3D point at frame coordinates `uv`.
    pub fn to_world(&self, uv: &Point2<f32>) -> Point3<f32> {
        self.origin + self.du * uv.x + self.dv * uv.y
    }

    /// Intersects `plane` with the frame plane.
    ///
    /// A 3D plane meeting the frame plane at an angle whose sine is below
    /// [`PLANE_EPSILON`] is reported as parallel.
    pub fn trace(&self, plane: &Plane3D) -> Trace {
        let n = plane.normal();
        let normal = Vector2::new(n.dot(&self.du), n.dot(&self.dv));
        let offset = plane.offset() - n.dot(&self.origin.coords);
        if normal.norm() <= PLANE_EPSILON {
            return Trace::Parallel(-offset);
        }
        match HalfPlane::new(normal, offset) {
            Ok(half_plane) => Trace::Line(half_plane),
            Err(_) => Trace::Parallel(-offset),
        }
    }
}

/// Some unit vector perpendicular to the unit vector `n`.
fn any_perpendicular(n: &Vector3<f32>) -> Vector3<f32> {
    let axis = if n.x.abs() < 0.9 {
        Vector3::x()
    } else {
        Vector3::y()
    };
    n.cross(&axis).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PointClass;

    fn assert_close(a: Point3<f32>, b: Point3<f32>) {
        assert!((a - b).norm() < 1e-4, "{a:?} != {b:?}");
    }

    #[test]
    fn round_trip_points_on_plane() {
        let plane = Plane3D::new(Vector3::new(1.0, 2.0, 2.0), 3.0);
        let frame = UvFrame::new(&plane, Point3::new(1.0, 1.0, 0.0), Vector3::x());

        let on_plane = frame.to_world(&Point2::new(2.5, -1.0));
        assert!(plane.signed_distance(on_plane).abs() < 1e-5);
        assert_close(frame.to_world(&frame.to_uv(&on_plane)), on_plane);
    }

    #[test]
    fn frame_is_right_handed() {
        let plane = Plane3D::new(Vector3::z(), 0.0);
        let frame = UvFrame::new(&plane, Point3::origin(), Vector3::x());
        assert_eq!(frame.to_uv(&Point3::new(1.0, 0.0, 0.0)), Point2::new(1.0, 0.0));
        assert_eq!(frame.to_uv(&Point3::new(0.0, 1.0, 0.0)), Point2::new(0.0, 1.0));
    }

    #[test]
    fn degenerate_direction_falls_back() {
        let plane = Plane3D::new(Vector3::z(), 0.0);
        let frame = UvFrame::new(&plane, Point3::origin(), Vector3::z());
        let p = Point3::new(0.3, -0.7, 0.0);
        assert_close(frame.to_world(&frame.to_uv(&p)), p);
    }

    #[test]
    fn trace_of_crossing_plane() {
        let floor = Plane3D::new(Vector3::z(), 0.0);
        let frame = UvFrame::new(&floor, Point3::origin(), Vector3::x());

        // x = 2 in 3D is the line u = 2; its back side is u < 2.
        let wall = Plane3D::new(Vector3::x(), 2.0);
        let Trace::Line(line) = frame.trace(&wall) else {
            panic!("expected a line");
        };
        assert_eq!(line.classify(Point2::new(0.0, 5.0), 1e-6), PointClass::In);
        assert_eq!(line.classify(Point2::new(3.0, 5.0), 1e-6), PointClass::Out);
    }

    #[test]
    fn trace_of_parallel_plane() {
        let floor = Plane3D::new(Vector3::z(), 0.0);
        let frame = UvFrame::new(&floor, Point3::origin(), Vector3::x());

        // The floor lies 1 behind the plane z = 1.
        match frame.trace(&Plane3D::new(Vector3::z(), 1.0)) {
            Trace::Parallel(dist) => assert!((dist + 1.0).abs() < 1e-6),
            other => panic!("expected parallel, got {other:?}"),
        }

        let tilted = Plane3D::new(Vector3::new(1e-6, 0.0, 1.0), 0.0);
        assert!(matches!(frame.trace(&tilted), Trace::Parallel(dist) if dist.abs() < 1e-6));
    }
}
