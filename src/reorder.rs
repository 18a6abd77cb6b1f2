//! Drag-to-reorder engine for one sibling list (the course's modules, or
//! one module's lessons).
//!
//! A [`DragSession`] starts when the pointer goes down on a node's drag
//! handle, follows the pointer across sibling slots, and on release
//! yields a [`ReorderPlan`] describing the single move. The plan turns
//! the current id order into the new one; feeding that to
//! `ReorderModules`/`ReorderLessons` completes the gesture. Nodes are
//! moved, never cloned, and their content is never touched.

use crate::draft::{DraftError, DraftResult, NodeId};

/// One in-flight drag gesture over a list of `len` siblings.
///
/// Invariant: a session only exists for a non-empty list (`grab` refuses
/// an out-of-range index, which includes every index of an empty list).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    len: usize,
    origin: usize,
    target: usize,
}

impl DragSession {
    /// Pointer-down on the handle of the sibling at `index`.
    pub fn grab(len: usize, index: usize) -> DraftResult<Self> {
        if index >= len {
            return Err(DraftError::DragOutOfBounds { index, len });
        }
        Ok(Self {
            len,
            origin: index,
            target: index,
        })
    }

    /// Pointer moved over `slot`. Dragging past the first or last sibling
    /// clamps to that boundary.
    pub fn hover(&mut self, slot: isize) {
        self.target = slot.clamp(0, (self.len - 1) as isize) as usize;
    }

    pub fn origin(&self) -> usize {
        self.origin
    }

    pub fn target(&self) -> usize {
        self.target
    }

    /// Pointer-up. `None` when the node would land where it started; an
    /// in-place drop is a no-op and must not mark the tree dirty.
    pub fn release(self) -> Option<ReorderPlan> {
        (self.target != self.origin).then_some(ReorderPlan {
            from: self.origin,
            to: self.target,
        })
    }
}

/// A completed drag: move the sibling at `from` so it ends up at `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReorderPlan {
    from: usize,
    to: usize,
}

impl ReorderPlan {
    pub fn from(&self) -> usize {
        self.from
    }

    pub fn to(&self) -> usize {
        self.to
    }

    /// The sibling id order after the move, for handing to a reorder
    /// command. `ids` must be the same list the session was grabbed on.
    pub fn ordering(&self, ids: &[NodeId]) -> Vec<NodeId> {
        let mut order = ids.to_vec();
        let moved = order.remove(self.from);
        order.insert(self.to, moved);
        order
    }
}
