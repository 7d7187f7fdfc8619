//! Callbacks for ordered tree traversal.

use crate::{Plane3D, Polygon};

use super::node::BspNode;

/// Order in which [`BspTree::traverse`](super::BspTree::traverse) visits
/// nodes relative to a viewpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    /// Nearest faces first
    FrontToBack,
    /// Farthest faces first
    BackToFront,
}

/// Visitor for processing nodes during BSP tree traversal.
///
/// Only nodes holding at least one face are visited.
pub trait BspVisitor {
    fn visit(&mut self, node: &BspNode, plane: &Plane3D);
}

/// A simple visitor that collects the faces of every visited node.
#[derive(Debug, Default)]
pub struct CollectingVisitor {
    faces: Vec<Polygon>,
}

impl CollectingVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_polygons(self) -> Vec<Polygon> {
        self.faces
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.faces
    }
}

impl BspVisitor for CollectingVisitor {
    fn visit(&mut self, node: &BspNode, _plane: &Plane3D) {
        self.faces.extend(node.all_faces().cloned());
    }
}

/// A visitor that calls a closure for each visited node.
pub struct FnVisitor<F>
where
    F: FnMut(&BspNode, &Plane3D),
{
    func: F,
}

impl<F> FnVisitor<F>
where
    F: FnMut(&BspNode, &Plane3D),
{
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> BspVisitor for FnVisitor<F>
where
    F: FnMut(&BspNode, &Plane3D),
{
    fn visit(&mut self, node: &BspNode, plane: &Plane3D) {
        (self.func)(node, plane);
    }
}
