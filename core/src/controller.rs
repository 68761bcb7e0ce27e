//! Ties the local session to the sync client for a view layer.
//!
//! The controller is the only place the current session lives. It is
//! single-threaded: the session sits in a `RefCell` whose borrows never span
//! an await point, so local edits can be recorded while a push is in flight.

use chrono::{DateTime, Utc};
use shared::TransactionDraft;
use std::cell::RefCell;
use tracing::info;

use crate::session::BudgetSession;
use crate::sync::{BudgetTransport, ReceiptUpload, SyncClient, SyncError, UploadError};
use crate::validation::{validate_draft, ValidationError};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BudgetError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Sync(#[from] SyncError),
    #[error(transparent)]
    Upload(#[from] UploadError),
}

pub struct BudgetController<T> {
    session: RefCell<BudgetSession>,
    client: SyncClient<T>,
}

impl<T: BudgetTransport> BudgetController<T> {
    pub fn new(client: SyncClient<T>, session: BudgetSession) -> Self {
        Self {
            session: RefCell::new(session),
            client,
        }
    }

    pub fn client(&self) -> &SyncClient<T> {
        &self.client
    }

    /// Copy of the current session for rendering
    pub fn snapshot(&self) -> BudgetSession {
        self.session.borrow().clone()
    }

    /// Apply a transaction locally without talking to the server
    pub fn record_local(
        &self,
        draft: &TransactionDraft,
        now: DateTime<Utc>,
    ) -> Result<BudgetSession, ValidationError> {
        let next = self.session.borrow().record(draft, now)?;
        *self.session.borrow_mut() = next.clone();
        Ok(next)
    }

    /// Record a transaction and push the result.
    ///
    /// A sync failure keeps the locally recorded transaction; it goes out
    /// with the next successful push.
    pub async fn add_transaction(
        &self,
        draft: &TransactionDraft,
        now: DateTime<Utc>,
    ) -> Result<BudgetSession, BudgetError> {
        self.record_local(draft, now)?;
        self.sync().await?;
        Ok(self.snapshot())
    }

    /// Push the current state. `Ok(false)` means the answer was stale and
    /// dropped because the session moved on while it was in flight.
    pub async fn sync(&self) -> Result<bool, SyncError> {
        let pending = self.snapshot();
        let canonical = self.client.push(pending.state()).await?;
        Ok(self.adopt(pending.revision(), canonical))
    }

    /// Load the server's state, e.g. when the dashboard opens.
    ///
    /// While local edits are still unconfirmed this pushes them instead of
    /// pulling, so a refresh after a failed sync retries it rather than
    /// replacing the edits with the server's older copy.
    pub async fn refresh(&self) -> Result<bool, SyncError> {
        let (revision, unsynced) = {
            let session = self.session.borrow();
            (session.revision(), session.has_unsynced_edits())
        };
        if unsynced {
            info!("Refresh with unsynced edits at revision {}, pushing instead", revision);
            return self.sync().await;
        }

        let canonical = self.client.pull().await?;
        Ok(self.adopt(revision, canonical))
    }

    /// Upload a receipt, then record and push its transaction once the
    /// server has confirmed the upload.
    pub async fn record_receipt(
        &self,
        receipt: &ReceiptUpload,
        draft: &TransactionDraft,
        now: DateTime<Utc>,
    ) -> Result<BudgetSession, BudgetError> {
        // Nothing leaves the client until the details are valid
        validate_draft(draft)?;

        let ack = self.client.upload_receipt(receipt, draft).await?;
        let stored_as = ack
            .get("filename")
            .and_then(serde_json::Value::as_str)
            .map(str::to_owned);

        let draft = TransactionDraft {
            receipt: stored_as.or_else(|| draft.receipt.clone()),
            ..draft.clone()
        };
        self.add_transaction(&draft, now).await
    }

    fn adopt(&self, revision: u64, canonical: shared::AppState) -> bool {
        let adopted = self.session.borrow().adopt(revision, canonical);
        match adopted {
            Some(next) => {
                info!("Adopted server state at revision {}", revision);
                *self.session.borrow_mut() = next;
                true
            }
            None => false,
        }
    }
}
