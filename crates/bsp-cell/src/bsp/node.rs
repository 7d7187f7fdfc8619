//! BSP tree node implementation.

use crate::Polygon;

/// Which child of a node, or which side of its plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Positive side of the node plane
    Front,
    /// Negative side of the node plane, the inside of a solid
    Back,
}

/// A node in the BSP tree.
///
/// Each node refers to its splitting plane by id in the tree's plane table and
/// stores the faces (polygon fragments) lying on that plane.
///
/// # Face Storage
///
/// Faces are separated by their facing direction relative to the splitting
/// plane's normal:
/// - `faces_front`: faces whose normal points the same direction as the plane normal
/// - `faces_back`: faces whose normal points opposite to the plane normal
#[derive(Debug, Clone)]
pub struct BspNode {
    /// Index of the splitting plane in the owning tree's plane table.
    plane_id: usize,

    faces_front: Vec<Polygon>,

    faces_back: Vec<Polygon>,

    /// Subtree on the FRONT side of the splitting plane.
    front: Option<Box<BspNode>>,

    /// Subtree BEHIND the splitting plane.
    back: Option<Box<BspNode>>,
}

impl BspNode {
    /// Creates a childless node with no faces.
    pub fn new(plane_id: usize) -> Self {
        Self {
            plane_id,
            faces_front: Vec::new(),
            faces_back: Vec::new(),
            front: None,
            back: None,
        }
    }

    #[inline]
    pub fn plane_id(&self) -> usize {
        self.plane_id
    }

    /// Faces facing the same direction as the plane normal.
    #[inline]
    pub fn faces_front(&self) -> &[Polygon] {
        &self.faces_front
    }

    /// Faces facing opposite to the plane normal.
    #[inline]
    pub fn faces_back(&self) -> &[Polygon] {
        &self.faces_back
    }

    pub fn all_faces(&self) -> impl Iterator<Item = &Polygon> {
        self.faces_front.iter().chain(self.faces_back.iter())
    }

    pub fn face_count(&self) -> usize {
        self.faces_front.len() + self.faces_back.len()
    }

    /// Stores a face on this node's plane.
    pub fn add_face(&mut self, face: Polygon, same_direction: bool) {
        if same_direction {
            self.faces_front.push(face);
        } else {
            self.faces_back.push(face);
        }
    }

    #[inline]
    pub fn front(&self) -> Option<&BspNode> {
        self.front.as_deref()
    }

    #[inline]
    pub fn back(&self) -> Option<&BspNode> {
        self.back.as_deref()
    }

    #[inline]
    pub fn child(&self, side: Side) -> Option<&BspNode> {
        match side {
            Side::Front => self.front(),
            Side::Back => self.back(),
        }
    }

    /// The child slot on `side`, for growing the tree in place.
    pub(crate) fn child_slot_mut(&mut self, side: Side) -> &mut Option<Box<BspNode>> {
        match side {
            Side::Front => &mut self.front,
            Side::Back => &mut self.back,
        }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.front.is_none() && self.back.is_none()
    }

    /// Number of nodes in this subtree, this one included.
    pub fn node_count(&self) -> usize {
        1 + self.front.as_ref().map_or(0, |n| n.node_count())
            + self.back.as_ref().map_or(0, |n| n.node_count())
    }

    /// Total number of faces in this subtree.
    pub fn total_face_count(&self) -> usize {
        self.face_count()
            + self.front.as_ref().map_or(0, |n| n.total_face_count())
            + self.back.as_ref().map_or(0, |n| n.total_face_count())
    }

    /// Returns the depth of this subtree (1 for a leaf node).
    pub fn depth(&self) -> usize {
        let front_depth = self.front.as_ref().map_or(0, |n| n.depth());
        let back_depth = self.back.as_ref().map_or(0, |n| n.depth());
        1 + front_depth.max(back_depth)
    }
}
