//! User-facing notifications for the outcome of dashboard actions.

use serde::{Deserialize, Serialize};

use crate::controller::BudgetError;
use crate::sync::SyncError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A short, non-blocking message for the toast area
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn synced() -> Self {
        Self::info("Success", "Budget data updated successfully!")
    }

    pub fn receipt_recorded() -> Self {
        Self::info("Receipt uploaded", "Your receipt was saved with the transaction.")
    }

    pub fn from_error(error: &BudgetError) -> Self {
        match error {
            BudgetError::Validation(e) => Self::error("Missing information", e.to_string()),
            BudgetError::Sync(e) => Self::from_sync_error(e),
            BudgetError::Upload(e) => Self::error("Receipt upload failed", e.to_string()),
        }
    }

    pub fn from_sync_error(error: &SyncError) -> Self {
        Self::error(
            "Failed to update budget data",
            format!("{}. Your changes are kept on this device.", error),
        )
    }

    /// Notice for the result of a push. A dropped stale answer gets none;
    /// the newer push that superseded it reports instead.
    pub fn from_sync_outcome(outcome: &Result<bool, SyncError>) -> Option<Self> {
        match outcome {
            Ok(true) => Some(Self::synced()),
            Ok(false) => None,
            Err(e) => Some(Self::from_sync_error(e)),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}
