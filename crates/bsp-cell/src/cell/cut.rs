//! Splitting an active cycle by one more half-plane.
//!
//! Vertex `i` of a cycle `[h0, h1, .., hn-1]` is the intersection of
//! `h[i]` and `h[i + 1]`, so the edge lying on `h[i]` runs from vertex `i - 1`
//! to vertex `i`. A cut walks the vertex classifications once and locates the
//! exit (last kept vertex before the removed arc) and the entry (last removed
//! vertex before the kept arc).

use crate::PointClass;

/// Result of cutting a cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Cut {
    /// No vertex is outside; the cycle is unchanged.
    Keep,
    /// No vertex is inside; the whole cycle is removed.
    Discard,
    /// Both sides are non-empty. Each chain ends with the cutting plane.
    Split {
        interior: Vec<usize>,
        exterior: Vec<usize>,
    },
}

/// Cuts `active` by the plane `index`, given the classification of each
/// vertex. Returns `None` when the classifications cross the cycle more than
/// twice.
pub(super) fn cut_cycle(active: &[usize], codes: &[PointClass], index: usize) -> Option<Cut> {
    debug_assert_eq!(active.len(), codes.len());
    let n = active.len();

    let has_in = codes.contains(&PointClass::In);
    let has_out = codes.contains(&PointClass::Out);
    match (has_in, has_out) {
        (_, false) => return Some(Cut::Keep),
        (false, true) => return Some(Cut::Discard),
        (true, true) => {}
    }

    let exit = single_transition(codes, PointClass::In, PointClass::Out)?;
    let entry = single_transition(codes, PointClass::Out, PointClass::In)?;

    // On runs are resolved toward the kept side: the crossing point sits on
    // the On vertex touching the interior, so the interior never picks up an
    // edge lying along the cutting line.
    let interior_last = (exit.from + 1) % n;
    let exterior_first = if exit.direct() {
        interior_last
    } else {
        (exit.from + 2) % n
    };
    let interior_first = entry.to;
    let exterior_last = if entry.direct() {
        interior_first
    } else {
        (entry.to + n - 1) % n
    };

    let interior = arc(active, interior_first, interior_last, index);
    let exterior = arc(active, exterior_first, exterior_last, index);
    Some(Cut::Split { interior, exterior })
}

/// Two decided vertices `from` and `to` with only On vertices between them.
#[derive(Debug, Clone, Copy)]
struct Transition {
    from: usize,
    to: usize,
    len: usize,
}

impl Transition {
    fn direct(&self) -> bool {
        self.len == 1
    }
}

/// Finds the unique vertex classified `from` whose next non-On vertex is `to`.
fn single_transition(codes: &[PointClass], from: PointClass, to: PointClass) -> Option<Transition> {
    let n = codes.len();
    let mut found = None;
    for (i, &code) in codes.iter().enumerate() {
        if code != from {
            continue;
        }
        let step = (1..n).find(|k| codes[(i + k) % n] != PointClass::On)?;
        if codes[(i + step) % n] != to {
            continue;
        }
        if found.is_some() {
            return None;
        }
        found = Some(Transition {
            from: i,
            to: (i + step) % n,
            len: step,
        });
    }
    found
}

/// Plane indices at positions `first..=last` (cyclic), followed by `index`.
fn arc(active: &[usize], first: usize, last: usize, index: usize) -> Vec<usize> {
    let n = active.len();
    let count = (last + n - first) % n + 1;
    let mut chain = Vec::with_capacity(count + 1);
    chain.extend((0..count).map(|k| active[(first + k) % n]));
    chain.push(index);
    chain
}

#[cfg(test)]
mod tests {
    use super::*;
    use PointClass::{In, On, Out};

    fn split(cut: Option<Cut>) -> (Vec<usize>, Vec<usize>) {
        match cut {
            Some(Cut::Split { interior, exterior }) => (interior, exterior),
            other => panic!("expected a split, got {other:?}"),
        }
    }

    #[test]
    fn keep_and_discard() {
        let active = [0, 1, 2, 3];
        assert_eq!(cut_cycle(&active, &[In, On, In, In], 4), Some(Cut::Keep));
        assert_eq!(cut_cycle(&active, &[On, On, On, On], 4), Some(Cut::Keep));
        assert_eq!(cut_cycle(&active, &[Out, On, Out, Out], 4), Some(Cut::Discard));
    }

    #[test]
    fn direct_crossings_share_planes() {
        // Square cut by x <= 0: vertices 0 and 3 are outside.
        let (interior, exterior) = split(cut_cycle(&[0, 1, 2, 3], &[Out, In, In, Out], 4));
        assert_eq!(interior, vec![1, 2, 3, 4]);
        assert_eq!(exterior, vec![3, 0, 1, 4]);
    }

    #[test]
    fn single_outside_vertex() {
        let (interior, exterior) = split(cut_cycle(&[0, 1, 2, 3], &[In, Out, In, In], 4));
        assert_eq!(interior, vec![2, 3, 0, 1, 4]);
        assert_eq!(exterior, vec![1, 2, 4]);
    }

    #[test]
    fn on_vertex_is_the_crossing_point() {
        // Diagonal through vertices 1 and 3.
        let (interior, exterior) = split(cut_cycle(&[0, 1, 2, 3], &[In, On, Out, On], 4));
        assert_eq!(interior, vec![0, 1, 4]);
        assert_eq!(exterior, vec![2, 3, 4]);
    }

    #[test]
    fn extra_crossings_are_ambiguous() {
        assert_eq!(cut_cycle(&[0, 1, 2, 3], &[In, Out, In, Out], 4), None);
    }
}
