//! Reversible move records and the two-stack undo/redo store.
//!
//! The core guarantees only that a record's undo and redo round-trip the
//! piece set to identical state; the stack discipline lives here, owned
//! by the caller rather than hidden inside a toolkit undo manager.

use crate::board::PieceSet;
use crate::geometry::Direction;

/// Enough state to re-apply or reverse one committed transform: the
/// chain, the node, and, for translations, the direction that was used.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveRecord {
    piece: usize,
    node: usize,
    direction: Option<Direction>,
}

impl MoveRecord {
    pub(crate) fn new(piece: usize, node: usize, direction: Option<Direction>) -> Self {
        Self {
            piece,
            node,
            direction,
        }
    }

    pub fn piece(&self) -> usize {
        self.piece
    }

    pub fn node(&self) -> usize {
        self.node
    }

    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }
}

/// A linear undo/redo stack over committed moves.
///
/// Pushing a new move invalidates the redo branch, the usual linear-undo
/// rule. Cleared wholesale on level change.
#[derive(Clone, Debug, Default)]
pub struct History {
    undo_stack: Vec<MoveRecord>,
    redo_stack: Vec<MoveRecord>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a committed move and drops any pending redos.
    pub fn push(&mut self, record: MoveRecord) {
        self.redo_stack.clear();
        self.undo_stack.push(record);
    }

    /// Reverses the most recent move. Returns false when there is
    /// nothing to undo.
    pub fn undo(&mut self, pieces: &mut PieceSet) -> bool {
        let Some(record) = self.undo_stack.pop() else {
            return false;
        };
        pieces.revert_record(&record);
        self.redo_stack.push(record);
        true
    }

    /// Re-applies the most recently undone move. Returns false when
    /// there is nothing to redo.
    pub fn redo(&mut self, pieces: &mut PieceSet) -> bool {
        let Some(record) = self.redo_stack.pop() else {
            return false;
        };
        pieces.apply_record(&record);
        self.undo_stack.push(record);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
