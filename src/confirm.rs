//! Two-step confirmation guarding every destructive operation.
//!
//! Deleting is request-then-confirm: requesting marks one record id as
//! pending, confirming actually deletes it, cancelling (or leaving the view)
//! drops the request. Requesting a different record replaces the previous
//! pending id.

use anyhow::Result;

#[derive(Debug, Default)]
pub struct PendingDelete {
    pending: Option<i64>,
}

impl PendingDelete {
    pub fn request(&mut self, id: i64) {
        self.pending = Some(id);
    }

    pub fn pending(&self) -> Option<i64> {
        self.pending
    }

    pub fn is_pending(&self, id: i64) -> bool {
        self.pending == Some(id)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Takes the pending id, returning the machine to idle.
    pub fn confirm(&mut self) -> Option<i64> {
        self.pending.take()
    }
}

/// Outcome of a confirmed delete. `AlreadyGone` covers the record vanishing
/// between request and confirm; it is a normal result, not an error.
#[derive(Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted(i64),
    AlreadyGone(i64),
    NothingPending,
}

/// Interaction state for one tracker view: the record selected for editing
/// plus the delete confirmation machine. One instance per view, never
/// process-global.
#[derive(Debug, Default)]
pub struct ViewSession {
    pub selected_for_edit: Option<i64>,
    pub delete: PendingDelete,
}

impl ViewSession {
    /// Runs the store delete for the pending id, dropping the edit selection
    /// when it pointed at the removed record. `delete_fn` returns whether a
    /// row was actually removed.
    pub fn confirm_delete<F>(&mut self, delete_fn: F) -> Result<DeleteOutcome>
    where
        F: FnOnce(i64) -> Result<bool>,
    {
        let Some(id) = self.delete.confirm() else {
            return Ok(DeleteOutcome::NothingPending);
        };
        let removed = delete_fn(id)?;
        if self.selected_for_edit == Some(id) {
            self.selected_for_edit = None;
        }
        Ok(if removed {
            DeleteOutcome::Deleted(id)
        } else {
            DeleteOutcome::AlreadyGone(id)
        })
    }

    /// Leaving the view: any pending request is implicitly cancelled.
    pub fn reset(&mut self) {
        self.selected_for_edit = None;
        self.delete.cancel();
    }
}
