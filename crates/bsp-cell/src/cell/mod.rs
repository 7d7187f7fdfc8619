//! Incremental convex cell over a stack of half-planes.
//!
//! A [`ConvexCell`] keeps the convex polygon formed by intersecting a bounding
//! square with every half-plane pushed so far. The polygon is stored
//! combinatorially, as the cyclic list of half-plane indices whose adjacent
//! pairs meet at its corners (the *active cycle*). Every push records the arc
//! of the cycle it clipped away, which makes `pop` an exact splice and `flip`
//! a swap.
//!
//! # Example
//!
//! ```
//! use bsp_cell::{ConvexCell, HalfPlane};
//! use nalgebra::Vector2;
//!
//! let mut cell = ConvexCell::new();
//! cell.push(HalfPlane::new(Vector2::new(1.0, 0.0), 0.0)?)?;
//! assert_eq!(cell.vertices().len(), 4);
//!
//! cell.flip()?;
//! assert!(cell.vertices().iter().all(|p| p.x >= 0.0));
//!
//! cell.pop()?;
//! assert_eq!(cell.pushed_count(), 0);
//! # Ok::<(), bsp_cell::CellError>(())
//! ```

mod cut;
mod guard;

pub use guard::PushGuard;

use nalgebra::{Point2, Vector2};
use tracing::{trace, warn};

use crate::{CellConfig, CellError, HalfPlane, PointClass};

use self::cut::Cut;

/// Number of bounding half-planes every cell starts with.
pub const BOUNDARY_PLANES: usize = 4;

/// One entry of the half-plane stack.
#[derive(Debug, Clone, PartialEq)]
struct UndoFrame {
    plane: HalfPlane,
    /// Arc of the active cycle this plane clipped away, ending with the
    /// plane's own index when the cut was a proper split.
    exterior: Vec<usize>,
    /// First entry of the active cycle before this plane was pushed.
    lead: Option<usize>,
}

/// A convex polygon maintained as the intersection of a stack of half-planes.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvexCell {
    config: CellConfig,
    frames: Vec<UndoFrame>,
    active: Vec<usize>,
}

impl Default for ConvexCell {
    fn default() -> Self {
        Self::new()
    }
}

impl ConvexCell {
    /// Creates a cell covering the default bounding square.
    pub fn new() -> Self {
        Self::with_config(CellConfig::default())
    }

    /// Creates a cell covering the bounding square of `config`.
    ///
    /// The four boundary planes occupy indices `0..4` in the order right, top,
    /// left, bottom, so corners come out counter-clockwise starting at
    /// `(R, R)`.
    pub fn with_config(config: CellConfig) -> Self {
        let r = config.half_extent;
        let frames = [
            Vector2::new(1.0, 0.0),
            Vector2::new(0.0, 1.0),
            Vector2::new(-1.0, 0.0),
            Vector2::new(0.0, -1.0),
        ]
        .into_iter()
        .map(|normal| UndoFrame {
            plane: HalfPlane::from_unit(normal, r),
            exterior: Vec::new(),
            lead: None,
        })
        .collect();

        Self {
            config,
            frames,
            active: (0..BOUNDARY_PLANES).collect(),
        }
    }

    #[inline]
    pub fn config(&self) -> &CellConfig {
        &self.config
    }

    /// Total number of half-planes on the stack, boundary planes included.
    #[inline]
    pub fn plane_count(&self) -> usize {
        self.frames.len()
    }

    /// Number of half-planes pushed on top of the boundary.
    #[inline]
    pub fn pushed_count(&self) -> usize {
        self.frames.len() - BOUNDARY_PLANES
    }

    /// Returns the half-plane stored at `index`, if any.
    pub fn half_plane(&self, index: usize) -> Option<&HalfPlane> {
        self.frames.get(index).map(|frame| &frame.plane)
    }

    /// The active cycle: half-plane indices bounding the cell, counter-clockwise.
    #[inline]
    pub fn active(&self) -> &[usize] {
        &self.active
    }

    /// The chain of half-plane indices the push at `index` clipped away.
    pub fn undo_chain(&self, index: usize) -> Option<&[usize]> {
        self.frames.get(index).map(|frame| frame.exterior.as_slice())
    }

    /// True when the cell has been clipped to nothing.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Classifies the corner where the boundaries of half-planes `a` and `b`
    /// meet against `test`.
    ///
    /// Parallel boundaries have no corner and classify as [`PointClass::On`].
    ///
    /// # Panics
    /// Panics if `a` or `b` is not a valid half-plane index.
    pub fn classify_point(&self, test: &HalfPlane, a: usize, b: usize) -> PointClass {
        match self.corner(a, b) {
            Some(point) => test.classify(point, self.config.epsilon),
            None => PointClass::On,
        }
    }

    fn corner(&self, a: usize, b: usize) -> Option<Point2<f32>> {
        self.frames[a].plane.intersect(&self.frames[b].plane)
    }

    /// Clips the cell by `plane` and returns the plane's stack index.
    ///
    /// On error nothing is pushed and the cell is left untouched.
    pub fn push(&mut self, plane: HalfPlane) -> Result<usize, CellError> {
        let index = self.frames.len();
        let lead = self.active.first().copied();

        let exterior = if self.active.is_empty() {
            Vec::new()
        } else {
            let n = self.active.len();
            let codes: Vec<PointClass> = (0..n)
                .map(|i| self.classify_point(&plane, self.active[i], self.active[(i + 1) % n]))
                .collect();

            match cut::cut_cycle(&self.active, &codes, index) {
                Some(Cut::Keep) => Vec::new(),
                Some(Cut::Discard) => std::mem::take(&mut self.active),
                Some(Cut::Split { interior, exterior }) => {
                    trace!(index, kept = interior.len(), removed = exterior.len(), "split cell");
                    self.active = interior;
                    exterior
                }
                None => {
                    warn!(index, ?codes, "ambiguous cut");
                    return Err(CellError::AmbiguousCut { index });
                }
            }
        };

        self.frames.push(UndoFrame { plane, exterior, lead });
        Ok(index)
    }

    /// Pushes `plane` and returns a guard that pops it when dropped.
    pub fn push_scoped(&mut self, plane: HalfPlane) -> Result<PushGuard<'_>, CellError> {
        let index = self.push(plane)?;
        Ok(PushGuard::new(self, index))
    }

    /// Removes the most recently pushed half-plane, restoring the cell to its
    /// state before that push.
    ///
    /// The active cycle comes back exactly as it was, starting from the same
    /// half-plane.
    pub fn pop(&mut self) -> Result<HalfPlane, CellError> {
        if self.pushed_count() == 0 {
            return Err(CellError::NothingPushed);
        }
        let index = self.frames.len() - 1;
        let UndoFrame { exterior, lead, .. } = &self.frames[index];

        let mut restored = if self.active.is_empty() {
            exterior.clone()
        } else if exterior.is_empty() {
            self.active.clone()
        } else {
            let mut restored = rotate_past(&self.active, index)
                .ok_or(CellError::CorruptCycle { index })?;
            let removed =
                rotate_past(exterior, index).ok_or(CellError::CorruptCycle { index })?;

            // Crossing edges were kept on both sides of the cut.
            let start = usize::from(removed.first() == restored.last());
            let end = removed.len() - usize::from(removed.last() == restored.first());
            restored.extend_from_slice(&removed[start..end.max(start)]);
            restored
        };

        if let Some(lead) = *lead {
            let at = restored
                .iter()
                .position(|&h| h == lead)
                .ok_or(CellError::CorruptCycle { index })?;
            restored.rotate_left(at);
        }

        self.active = restored;
        let frame = self.frames.pop().ok_or(CellError::NothingPushed)?;
        trace!(index, remaining = self.active.len(), "popped half-plane");
        Ok(frame.plane)
    }

    /// Replaces the cell with its complement across the top half-plane.
    ///
    /// The top half-plane is negated in place and the active cycle swapped
    /// with the chain its push clipped away. Flipping twice is a no-op.
    pub fn flip(&mut self) -> Result<(), CellError> {
        if self.pushed_count() == 0 {
            return Err(CellError::NothingPushed);
        }
        let frame = self
            .frames
            .last_mut()
            .ok_or(CellError::NothingPushed)?;
        frame.plane = frame.plane.flipped();
        std::mem::swap(&mut self.active, &mut frame.exterior);
        Ok(())
    }

    /// Corners of the cell in counter-clockwise order, empty if the cell is.
    ///
    /// Corner `i` is the meeting point of `active()[i]` and `active()[i + 1]`.
    pub fn vertices(&self) -> Vec<Point2<f32>> {
        let n = self.active.len();
        (0..n)
            .filter_map(|i| self.corner(self.active[i], self.active[(i + 1) % n]))
            .collect()
    }

    /// Area of the cell (shoelace formula over [`vertices`](Self::vertices)).
    pub fn area(&self) -> f32 {
        polygon_area(&self.vertices())
    }

    /// Builds a cell with an arbitrary active cycle over `planes`, which
    /// need not describe a convex polygon.
    #[cfg(test)]
    pub(crate) fn from_cycle(planes: &[HalfPlane], active: Vec<usize>) -> Self {
        let frames = planes
            .iter()
            .map(|&plane| UndoFrame {
                plane,
                exterior: Vec::new(),
                lead: None,
            })
            .collect();
        Self {
            config: CellConfig::default(),
            frames,
            active,
        }
    }
}

/// Signed area of a closed 2D polygon, positive when counter-clockwise.
pub fn polygon_area(points: &[Point2<f32>]) -> f32 {
    let n = points.len();
    let twice: f32 = (0..n)
        .map(|i| points[i].coords.perp(&points[(i + 1) % n].coords))
        .sum();
    twice * 0.5
}

/// The elements following `index` in `chain`, read cyclically, without it.
fn rotate_past(chain: &[usize], index: usize) -> Option<Vec<usize>> {
    let at = chain.iter().position(|&h| h == index)?;
    Some(
        chain[at + 1..]
            .iter()
            .chain(&chain[..at])
            .copied()
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hp(nx: f32, ny: f32, d: f32) -> HalfPlane {
        HalfPlane::new(Vector2::new(nx, ny), d).unwrap()
    }

    fn same_cycle<T: PartialEq + std::fmt::Debug>(a: &[T], b: &[T]) -> bool {
        if a.len() != b.len() {
            return false;
        }
        a.is_empty() || (0..a.len()).any(|r| (0..a.len()).all(|i| a[(i + r) % a.len()] == b[i]))
    }

    fn corners(points: &[(f32, f32)]) -> Vec<Point2<f32>> {
        points.iter().map(|&(x, y)| Point2::new(x, y)).collect()
    }

    #[test]
    fn fresh_cell_is_bounding_square() {
        let cell = ConvexCell::new();
        assert!(!cell.is_empty());
        assert_eq!(cell.plane_count(), 4);
        assert_eq!(cell.pushed_count(), 0);
        assert_eq!(
            cell.vertices(),
            corners(&[(1000.0, 1000.0), (-1000.0, 1000.0), (-1000.0, -1000.0), (1000.0, -1000.0)])
        );
        assert_eq!(cell.vertices(), cell.vertices());
        assert!((cell.area() - 4.0e6).abs() < 1.0);
    }

    #[test]
    fn push_left_half() {
        let mut cell = ConvexCell::new();
        assert_eq!(cell.push(hp(1.0, 0.0, 0.0)), Ok(4));
        assert!(same_cycle(
            &cell.vertices(),
            &corners(&[(0.0, 1000.0), (-1000.0, 1000.0), (-1000.0, -1000.0), (0.0, -1000.0)])
        ));
        assert_eq!(cell.active(), &[1, 2, 3, 4]);
        assert_eq!(cell.undo_chain(4), Some(&[3, 0, 1, 4][..]));
    }

    #[test]
    fn pop_restores_square() {
        let mut cell = ConvexCell::new();
        let before = cell.clone();
        cell.push(hp(1.0, 0.0, 0.0)).unwrap();
        let popped = cell.pop().unwrap();
        assert_eq!(popped, hp(1.0, 0.0, 0.0));
        assert_eq!(cell.active(), &[0, 1, 2, 3]);
        assert_eq!(cell.vertices(), before.vertices());
        assert_eq!(cell, before);
    }

    #[test]
    fn disjoint_planes_empty_the_cell() {
        let mut cell = ConvexCell::new();
        cell.push(hp(1.0, 0.0, 0.0)).unwrap();
        let left = cell.vertices();
        cell.push(hp(-1.0, 0.0, -500.0)).unwrap();
        assert!(cell.is_empty());
        assert!(cell.vertices().is_empty());
        assert_eq!(cell.area(), 0.0);

        cell.pop().unwrap();
        assert_eq!(cell.vertices(), left);
    }

    #[test]
    fn redundant_plane_keeps_cell() {
        let mut cell = ConvexCell::new();
        cell.push(hp(1.0, 0.0, 0.0)).unwrap();
        let before = cell.active().to_vec();

        // Coincident with the cut just made.
        cell.push(hp(1.0, 0.0, 0.0)).unwrap();
        assert_eq!(cell.active(), &before[..]);
        assert_eq!(cell.undo_chain(5), Some(&[][..]));

        // Outside the cell entirely.
        cell.push(hp(1.0, 0.0, 2000.0)).unwrap();
        assert_eq!(cell.active(), &before[..]);
        assert_eq!(cell.pushed_count(), 3);
    }

    #[test]
    fn flip_gives_complement() {
        let mut cell = ConvexCell::new();
        cell.push(hp(1.0, 0.0, 0.0)).unwrap();
        let left = cell.active().to_vec();

        cell.flip().unwrap();
        assert!(cell.vertices().iter().all(|p| p.x >= -1e-3));
        assert!((cell.area() - 2.0e6).abs() < 1.0);
        assert_eq!(cell.half_plane(4), Some(&hp(-1.0, 0.0, 0.0)));

        cell.flip().unwrap();
        assert_eq!(cell.active(), &left[..]);
        assert_eq!(cell.half_plane(4), Some(&hp(1.0, 0.0, 0.0)));
    }

    #[test]
    fn pop_after_flip_restores_parent() {
        let mut cell = ConvexCell::new();
        cell.push(hp(1.0, 1.0, 100.0)).unwrap();
        let parent = cell.clone();
        cell.push(hp(-1.0, 0.5, 10.0)).unwrap();
        cell.flip().unwrap();
        cell.pop().unwrap();
        assert_eq!(cell, parent);
    }

    fn close(a: &[Point2<f32>], b: &[Point2<f32>]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(p, q)| (p - q).norm() < 1e-2)
    }

    #[test]
    fn cut_through_corners() {
        let mut cell = ConvexCell::new();
        let square = cell.clone();
        // The diagonal x + y <= 0 passes exactly through two corners.
        cell.push(hp(1.0, 1.0, 0.0)).unwrap();
        assert_eq!(cell.active(), &[2, 3, 4]);
        assert!(close(
            &cell.vertices(),
            &corners(&[(-1000.0, -1000.0), (1000.0, -1000.0), (-1000.0, 1000.0)])
        ));
        assert!((cell.area() - 2.0e6).abs() < 10.0);
        let lower = cell.clone();

        cell.flip().unwrap();
        assert_eq!(cell.active(), &[0, 1, 4]);
        assert!(close(
            &cell.vertices(),
            &corners(&[(1000.0, 1000.0), (-1000.0, 1000.0), (1000.0, -1000.0)])
        ));
        cell.flip().unwrap();
        assert_eq!(cell, lower);

        cell.pop().unwrap();
        assert_eq!(cell, square);

        cell.push(hp(1.0, 1.0, 0.0)).unwrap();
        cell.flip().unwrap();
        cell.pop().unwrap();
        assert_eq!(cell, square);
    }

    #[test]
    fn cut_through_corners_of_clipped_cell() {
        let mut cell = ConvexCell::new();
        cell.push(hp(1.0, 0.0, 0.0)).unwrap();
        let left = cell.clone();

        // 2x - y <= -1000 runs from (0, 1000) to (-1000, -1000).
        let slanted = HalfPlane::new(Vector2::new(2.0, -1.0), -1000.0).unwrap();
        cell.push(slanted).unwrap();
        assert!(close(
            &cell.vertices(),
            &corners(&[(-1000.0, 1000.0), (-1000.0, -1000.0), (0.0, 1000.0)])
        ));
        cell.flip().unwrap();
        assert!(close(
            &cell.vertices(),
            &corners(&[(0.0, -1000.0), (0.0, 1000.0), (-1000.0, -1000.0)])
        ));
        cell.pop().unwrap();
        assert_eq!(cell, left);

        cell.push(slanted).unwrap();
        cell.pop().unwrap();
        assert_eq!(cell, left);
    }

    #[test]
    fn coincident_cut_round_trips() {
        let mut cell = ConvexCell::new();
        let square = cell.clone();
        cell.push(hp(1.0, 0.0, 0.0)).unwrap();
        let left = cell.clone();

        // Same boundary, same side: nothing is clipped.
        cell.push(hp(1.0, 0.0, 0.0)).unwrap();
        assert_eq!(cell.active(), left.active());
        cell.flip().unwrap();
        assert!(cell.is_empty());
        cell.pop().unwrap();
        assert_eq!(cell, left);

        // Same boundary, other side: only the boundary edge is left.
        cell.push(hp(-1.0, 0.0, 0.0)).unwrap();
        assert!(cell.is_empty());
        cell.flip().unwrap();
        assert_eq!(cell.active(), left.active());
        cell.pop().unwrap();
        assert_eq!(cell, left);

        cell.pop().unwrap();
        assert_eq!(cell, square);
    }

    #[test]
    fn doubly_wound_cycle_is_ambiguous() {
        let planes = [hp(1.0, 0.0, 1.0), hp(0.0, 1.0, 1.0), hp(-1.0, 0.0, 1.0), hp(0.0, -1.0, 1.0)];
        let mut cell = ConvexCell::from_cycle(&planes, vec![0, 1, 2, 3, 0, 1, 2, 3]);
        let before = cell.clone();
        assert_eq!(cell.push(hp(0.0, 1.0, 0.0)), Err(CellError::AmbiguousCut { index: 4 }));
        assert_eq!(cell, before);
    }

    #[test]
    fn boundary_planes_cannot_be_removed() {
        let mut cell = ConvexCell::new();
        assert_eq!(cell.pop(), Err(CellError::NothingPushed));
        assert_eq!(cell.flip(), Err(CellError::NothingPushed));
    }

    #[test]
    fn push_into_empty_cell_stays_empty() {
        let mut cell = ConvexCell::new();
        cell.push(hp(1.0, 0.0, -2000.0)).unwrap();
        assert!(cell.is_empty());
        cell.push(hp(0.0, 1.0, 0.0)).unwrap();
        assert!(cell.is_empty());
        cell.pop().unwrap();
        cell.pop().unwrap();
        assert_eq!(cell.vertices().len(), 4);
    }

    #[test]
    fn classify_point_reads_corners() {
        let cell = ConvexCell::new();
        let test = hp(1.0, 0.0, 0.0);
        // Corner of right and top is (1000, 1000).
        assert_eq!(cell.classify_point(&test, 0, 1), PointClass::Out);
        // Corner of left and bottom is (-1000, -1000).
        assert_eq!(cell.classify_point(&test, 2, 3), PointClass::In);
        // Right and left never meet.
        assert_eq!(cell.classify_point(&test, 0, 2), PointClass::On);
    }

    #[test]
    fn custom_extent() {
        let cell = ConvexCell::with_config(CellConfig::with_half_extent(2.0));
        assert!((cell.area() - 16.0).abs() < 1e-4);
    }

    #[test]
    fn polygon_area_sign_follows_winding() {
        let ccw = corners(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
        let cw: Vec<_> = ccw.iter().rev().copied().collect();
        assert!((polygon_area(&ccw) - 0.5).abs() < 1e-6);
        assert!((polygon_area(&cw) + 0.5).abs() < 1e-6);
    }
}
