//! Scoped push/pop pairing.

use std::ops::{Deref, DerefMut};

use super::ConvexCell;

/// A pushed half-plane that is popped again when the guard goes out of scope.
///
/// The guard dereferences to the cell, so the clipped cell can be inspected,
/// flipped, or pushed into further. Nested pushes must be scoped by their own
/// guards so that pops stay in LIFO order.
///
/// # Panics
/// Dropping the guard panics if its half-plane is no longer on top of the
/// stack, or if popping it fails.
#[derive(Debug)]
pub struct PushGuard<'a> {
    cell: &'a mut ConvexCell,
    index: usize,
}

impl<'a> PushGuard<'a> {
    pub(super) fn new(cell: &'a mut ConvexCell, index: usize) -> Self {
        Self { cell, index }
    }

    /// Stack index of the guarded half-plane.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }
}

impl Deref for PushGuard<'_> {
    type Target = ConvexCell;

    fn deref(&self) -> &ConvexCell {
        self.cell
    }
}

impl DerefMut for PushGuard<'_> {
    fn deref_mut(&mut self) -> &mut ConvexCell {
        self.cell
    }
}

impl Drop for PushGuard<'_> {
    fn drop(&mut self) {
        let on_top = self.cell.plane_count() == self.index + 1;
        let popped = if on_top { self.cell.pop().err() } else { None };
        if std::thread::panicking() {
            return;
        }
        assert!(on_top, "scoped half-plane {} is no longer on top of the stack", self.index);
        if let Some(err) = popped {
            panic!("scoped pop of half-plane {} failed: {err}", self.index);
        }
    }
}
