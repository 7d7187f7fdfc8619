//! BSP tree container, insertion and queries.

use nalgebra::Point3;
use tracing::{debug, instrument};

use crate::face::FaceCell;
use crate::{BspError, Plane3D, PlaneSide, Polygon, Triangle};

use super::insert::{Fragment, Insertion, Placement, place};
use super::node::{BspNode, Side};
use super::visitor::{BspVisitor, CollectingVisitor, Order};

/// A Binary Space Partitioning tree for 3D polygons, grown by insertion.
///
/// Every inserted polygon contributes its plane to the tree's plane table.
/// Nodes refer to planes by index into that table, and store the polygon
/// fragments lying on their plane.
///
/// # Construction
///
/// Polygons are inserted one at a time. The first becomes the root; each later
/// polygon is pushed down the tree and split along the way by the planes it
/// straddles:
///
/// ```
/// use bsp_cell::{BspTree, Polygon};
/// use nalgebra::Point3;
///
/// let mut tree = BspTree::new();
/// let floor = Polygon::new(vec![
///     Point3::new(-1.0, 0.0, 1.0),
///     Point3::new(1.0, 0.0, 1.0),
///     Point3::new(1.0, 0.0, -1.0),
///     Point3::new(-1.0, 0.0, -1.0),
/// ])?;
/// tree.insert(floor)?;
///
/// let wall = Polygon::new(vec![
///     Point3::new(-1.0, -1.0, 0.0),
///     Point3::new(1.0, -1.0, 0.0),
///     Point3::new(1.0, 1.0, 0.0),
///     Point3::new(-1.0, 1.0, 0.0),
/// ])?;
/// let fragments = tree.insert(wall)?;
/// assert_eq!(fragments.len(), 2);
/// # Ok::<(), bsp_cell::BspError>(())
/// ```
///
/// # Traversal
///
/// The tree supports front-to-back and back-to-front traversal relative to
/// a viewpoint, useful for painter's algorithm rendering:
///
/// ```ignore
/// tree.traverse(eye_position, Order::BackToFront, &mut visitor);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BspTree {
    planes: Vec<Plane3D>,
    root: Option<Box<BspNode>>,
}

impl BspTree {
    /// Creates an empty BSP tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a tree by inserting each polygon in turn.
    pub fn from_polygons(polygons: impl IntoIterator<Item = Polygon>) -> Result<Self, BspError> {
        let mut tree = Self::new();
        for polygon in polygons {
            tree.insert(polygon)?;
        }
        Ok(tree)
    }

    /// Builds a tree from an indexed triangle list.
    ///
    /// Zero-area triangles have no plane and are skipped. An index outside
    /// `positions` is an error.
    pub fn from_indexed_triangles(
        positions: &[Point3<f32>],
        triangles: &[[usize; 3]],
    ) -> Result<Self, BspError> {
        let mut tree = Self::new();
        for (i, &indices) in triangles.iter().enumerate() {
            let triangle = Triangle::from_indexed(positions, indices)?;
            match Polygon::try_from(triangle) {
                Ok(polygon) => {
                    tree.insert(polygon)?;
                }
                Err(BspError::DegeneratePolygon) => {
                    debug!(triangle = i, ?indices, "skipping degenerate triangle");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(tree)
    }

    /// Inserts a convex polygon, splitting it by every node plane it straddles.
    ///
    /// Returns the fragments the polygon was split into, each with the path
    /// from the root to the node holding it. A fragment coplanar with an
    /// existing node is stored on that node instead of growing a new one.
    ///
    /// The polygon's plane is added to the plane table even if no node ends
    /// up using it. On error the tree is left unchanged.
    #[instrument(skip_all, fields(plane_id = self.planes.len(), corners = polygon.len()))]
    pub fn insert(&mut self, polygon: Polygon) -> Result<Vec<Fragment>, BspError> {
        let plane_id = self.planes.len();

        if self.root.is_none() {
            self.planes.push(polygon.plane().clone());
            let mut root = BspNode::new(plane_id);
            root.add_face(polygon.clone(), true);
            self.root = Some(Box::new(root));
            debug!("polygon became root");
            return Ok(vec![Fragment {
                path: Vec::new(),
                polygon,
                placement: Placement::NewNode,
            }]);
        }

        let face = FaceCell::new(&polygon)?;
        self.insert_face(face)
    }

    /// Walks `face` down the tree, then stores its fragments. Nothing is
    /// stored, and the plane table is left as it was, if the walk fails.
    fn insert_face(&mut self, face: FaceCell) -> Result<Vec<Fragment>, BspError> {
        let FaceCell {
            frame,
            plane,
            mut cell,
        } = face;
        let seeded = cell.plane_count();

        let mut insertion = Insertion::new(&self.planes, &frame, &plane);
        insertion.visit(self.root.as_deref(), &mut cell)?;
        debug_assert_eq!(cell.plane_count(), seeded);
        let fragments = insertion.into_fragments();

        let plane_id = self.planes.len();
        self.planes.push(plane);
        for fragment in &fragments {
            let placed = place(&mut self.root, &self.planes, plane_id, fragment);
            assert!(placed, "fragment path {:?} does not lead to a free slot", fragment.path);
        }

        debug!(
            fragments = fragments.len(),
            coplanar = fragments
                .iter()
                .filter(|f| f.placement == Placement::Coplanar)
                .count(),
            "inserted"
        );
        Ok(fragments)
    }

    /// Point-in-solid query.
    ///
    /// Walks from the root, taking the back child when `point` is strictly
    /// behind the node plane and the front child otherwise. The answer is
    /// whether the point was behind the last plane tested. An empty tree
    /// contains nothing.
    pub fn includes(&self, point: Point3<f32>) -> bool {
        let mut inside = false;
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            inside = self.planes[node.plane_id()].signed_distance(point) < 0.0;
            let side = if inside { Side::Back } else { Side::Front };
            current = node.child(side);
        }
        inside
    }

    /// The plane with the given id, if any.
    #[inline]
    pub fn plane(&self, id: usize) -> Option<&Plane3D> {
        self.planes.get(id)
    }

    /// Every plane inserted so far, indexed by plane id.
    #[inline]
    pub fn planes(&self) -> &[Plane3D] {
        &self.planes
    }

    /// Returns `true` if the tree contains no polygons.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns a reference to the root node, if any.
    #[inline]
    pub fn root(&self) -> Option<&BspNode> {
        self.root.as_deref()
    }

    #[inline]
    pub fn plane_count(&self) -> usize {
        self.planes.len()
    }

    pub fn node_count(&self) -> usize {
        self.root.as_ref().map_or(0, |n| n.node_count())
    }

    /// Returns the total number of stored faces.
    pub fn face_count(&self) -> usize {
        self.root.as_ref().map_or(0, |n| n.total_face_count())
    }

    /// Returns the maximum depth of the tree (0 for empty tree).
    pub fn depth(&self) -> usize {
        self.root.as_ref().map_or(0, |n| n.depth())
    }

    /// Visits every node holding faces, ordered relative to `eye`.
    ///
    /// For [`Order::FrontToBack`] the subtree on the eye's side of each plane
    /// comes first; for [`Order::BackToFront`] it comes last. An eye lying on
    /// a plane counts as in front of it.
    pub fn traverse<V: BspVisitor>(&self, eye: Point3<f32>, order: Order, visitor: &mut V) {
        if let Some(root) = self.root.as_deref() {
            self.traverse_node(root, eye, order, visitor);
        }
    }

    fn traverse_node<V: BspVisitor>(&self, node: &BspNode, eye: Point3<f32>, order: Order, visitor: &mut V) {
        let plane = &self.planes[node.plane_id()];
        let near = match plane.classify_point(eye) {
            PlaneSide::Front | PlaneSide::OnPlane => Side::Front,
            PlaneSide::Back => Side::Back,
        };
        let far = match near {
            Side::Front => Side::Back,
            Side::Back => Side::Front,
        };
        let (first, last) = match order {
            Order::FrontToBack => (near, far),
            Order::BackToFront => (far, near),
        };

        if let Some(child) = node.child(first) {
            self.traverse_node(child, eye, order, visitor);
        }
        if node.face_count() > 0 {
            visitor.visit(node, plane);
        }
        if let Some(child) = node.child(last) {
            self.traverse_node(child, eye, order, visitor);
        }
    }

    /// Collects every stored face into a vector.
    ///
    /// The order of polygons is not guaranteed.
    pub fn leaf_faces(&self) -> Vec<Polygon> {
        let mut visitor = CollectingVisitor::new();
        self.traverse(Point3::origin(), Order::FrontToBack, &mut visitor);
        visitor.into_polygons()
    }
}
