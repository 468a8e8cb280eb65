//! Move commands
//!
//! Every board mutation is an explicit command applied to a board
//! snapshot. Applying a command yields its inverse, so rollback is the
//! mechanical application of the paired undo, independent of whatever
//! input device (drag, button, keyboard) produced the move.

use crate::pipeline::lead::LeadId;

/// A request to move one lead between two buckets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveCommand<K> {
    /// Lead being moved
    pub lead_id: LeadId,
    /// Source bucket
    pub from: K,
    /// Target bucket
    pub to: K,
}

impl<K: Clone> MoveCommand<K> {
    /// Create a move command.
    pub fn new(lead_id: LeadId, from: K, to: K) -> Self {
        Self { lead_id, from, to }
    }

    /// The undo command that reverses exactly this move.
    pub fn inverse(&self) -> Self {
        Self {
            lead_id: self.lead_id,
            from: self.to.clone(),
            to: self.from.clone(),
        }
    }
}
