// ── Confirmation dialog state ──
//
// open -> begin (loading) -> succeed (closed) | fail (open, not loading).
// A failed operation leaves the dialog open so it can be retried or
// cancelled.

use serde::Serialize;

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConfirmDialog {
    open: bool,
    loading: bool,
}

impl ConfirmDialog {
    pub fn is_open(self) -> bool {
        self.open
    }

    pub fn is_loading(self) -> bool {
        self.loading
    }

    pub fn open(&mut self) {
        self.open = true;
        self.loading = false;
    }

    /// Close without acting. Ignored while an operation is running;
    /// returns whether the dialog closed.
    pub fn cancel(&mut self) -> bool {
        if self.loading {
            return false;
        }
        self.open = false;
        true
    }

    /// Mark the confirmed operation as running.
    pub fn begin(&mut self) -> Result<(), CoreError> {
        if self.loading {
            return Err(CoreError::OperationInProgress);
        }
        self.open = true;
        self.loading = true;
        Ok(())
    }

    pub fn succeed(&mut self) {
        self.open = false;
        self.loading = false;
    }

    pub fn fail(&mut self) {
        self.loading = false;
    }
}
