//! Polygon insertion: walking the tree with a convex cell.
//!
//! The inserted polygon is loaded into a [`ConvexCell`] in its own plane.
//! Each visited node plane is traced onto that plane and pushed; the back
//! child sees the cell as clipped, the front child sees it flipped. Pushes are
//! scoped, so the cell is back to the bare polygon whenever the walk returns,
//! including on errors.
//!
//! The walk only reads the tree. It records where each fragment goes, and
//! `place` applies those records once the whole walk has succeeded.

use tracing::{debug, trace};

use crate::face::FaceCell;
use crate::frame::Trace;
use crate::{BspError, ConvexCell, PLANE_EPSILON, Plane3D, Polygon, UvFrame};

use super::node::{BspNode, Side};

/// Where an inserted fragment ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// A new node with the inserted polygon's plane was grown at the path.
    NewNode,
    /// The fragment lies on the plane of the existing node at the path.
    Coplanar,
}

/// A convex piece of an inserted polygon and the tree node that holds it.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    /// Sides taken from the root down to the holding node.
    pub path: Vec<Side>,
    pub polygon: Polygon,
    pub placement: Placement,
}

pub(super) struct Insertion<'a> {
    planes: &'a [Plane3D],
    frame: &'a UvFrame,
    plane: &'a Plane3D,
    path: Vec<Side>,
    fragments: Vec<Fragment>,
}

impl<'a> Insertion<'a> {
    pub(super) fn new(planes: &'a [Plane3D], frame: &'a UvFrame, plane: &'a Plane3D) -> Self {
        Self {
            planes,
            frame,
            plane,
            path: Vec::new(),
            fragments: Vec::new(),
        }
    }

    pub(super) fn into_fragments(self) -> Vec<Fragment> {
        self.fragments
    }

    /// Finds where the part of the polygon left in `cell` goes in the subtree
    /// rooted at `node`.
    pub(super) fn visit(&mut self, node: Option<&BspNode>, cell: &mut ConvexCell) -> Result<(), BspError> {
        match node {
            None => {
                if let Some(face) = FaceCell::lift(self.frame, self.plane, cell) {
                    self.record(face, Placement::NewNode);
                }
                Ok(())
            }
            Some(node) => self.split_at(node, cell),
        }
    }

    fn split_at(&mut self, node: &BspNode, cell: &mut ConvexCell) -> Result<(), BspError> {
        match self.frame.trace(&self.planes[node.plane_id()]) {
            Trace::Parallel(dist) if dist.abs() <= PLANE_EPSILON => {
                // Coincident with the node plane, which makes the inserted
                // plane redundant here.
                if let Some(face) = FaceCell::lift(self.frame, self.plane, cell) {
                    self.record(face, Placement::Coplanar);
                }
                Ok(())
            }
            Trace::Parallel(dist) => {
                let side = if dist < 0.0 { Side::Back } else { Side::Front };
                self.descend(node, side, cell)
            }
            Trace::Line(half_plane) => {
                let mut guard = cell.push_scoped(half_plane)?;
                if !guard.is_empty() {
                    self.descend(node, Side::Back, &mut guard)?;
                }
                guard.flip()?;
                if !guard.is_empty() {
                    self.descend(node, Side::Front, &mut guard)?;
                }
                Ok(())
            }
        }
    }

    fn descend(&mut self, node: &BspNode, side: Side, cell: &mut ConvexCell) -> Result<(), BspError> {
        self.path.push(side);
        let result = self.visit(node.child(side), cell);
        self.path.pop();
        result
    }

    fn record(&mut self, polygon: Polygon, placement: Placement) {
        self.fragments.push(Fragment {
            path: self.path.clone(),
            polygon,
            placement,
        });
    }
}

/// Stores `fragment` in the tree below `root`, growing a node with plane
/// `plane_id` for a [`Placement::NewNode`] fragment.
///
/// Returns `false` if the fragment's path does not lead to a slot of the
/// expected kind.
pub(super) fn place(
    root: &mut Option<Box<BspNode>>,
    planes: &[Plane3D],
    plane_id: usize,
    fragment: &Fragment,
) -> bool {
    let Some(slot) = slot_at(root, &fragment.path) else {
        return false;
    };
    match fragment.placement {
        Placement::NewNode if slot.is_none() => {
            debug!(depth = fragment.path.len(), corners = fragment.polygon.len(), "grew node");
            let mut node = BspNode::new(plane_id);
            node.add_face(fragment.polygon.clone(), true);
            *slot = Some(Box::new(node));
            true
        }
        Placement::Coplanar => match slot {
            Some(node) => {
                let same = fragment.polygon.faces_same_direction(&planes[node.plane_id()]);
                trace!(depth = fragment.path.len(), same, "coplanar fragment");
                node.add_face(fragment.polygon.clone(), same);
                true
            }
            None => false,
        },
        Placement::NewNode => false,
    }
}

fn slot_at<'t>(root: &'t mut Option<Box<BspNode>>, path: &[Side]) -> Option<&'t mut Option<Box<BspNode>>> {
    let mut slot = root;
    for &side in path {
        slot = slot.as_deref_mut()?.child_slot_mut(side);
    }
    Some(slot)
}
