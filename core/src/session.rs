//! Revisioned budget snapshots.
//!
//! Every local edit produces a new session one revision ahead. A sync answer
//! is only adopted for the revision it was sent from; anything older has
//! already been superseded by a push queued behind it. The session also
//! remembers the last revision the server confirmed, so edits that never
//! reached it can be told apart.

use chrono::{DateTime, Utc};
use shared::{AppState, BudgetSummary, CategorySpending, Transaction, TransactionDraft};
use tracing::debug;

use crate::store;
use crate::validation::ValidationError;

#[derive(Debug, Clone, PartialEq)]
pub struct BudgetSession {
    state: AppState,
    revision: u64,
    synced_revision: u64,
}

impl BudgetSession {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            revision: 0,
            synced_revision: 0,
        }
    }

    pub fn seeded() -> Self {
        Self::new(AppState::seeded())
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// True while a local edit has not been confirmed by the server
    pub fn has_unsynced_edits(&self) -> bool {
        self.revision > self.synced_revision
    }

    /// Record a transaction locally, producing the next revision
    pub fn record(&self, draft: &TransactionDraft, now: DateTime<Utc>) -> Result<Self, ValidationError> {
        Ok(Self {
            state: store::add_transaction(&self.state, draft, now)?,
            revision: self.revision + 1,
            synced_revision: self.synced_revision,
        })
    }

    /// Replace the state with the server's canonical copy if it answers the
    /// current revision, marking that revision as synced. Returns `None` for
    /// a stale answer.
    pub fn adopt(&self, answered_revision: u64, canonical: AppState) -> Option<Self> {
        if answered_revision != self.revision {
            debug!(
                "Dropping server state for revision {} (current is {})",
                answered_revision, self.revision
            );
            return None;
        }

        Some(Self {
            state: canonical,
            revision: self.revision,
            synced_revision: self.revision,
        })
    }

    pub fn spending_by_category(&self) -> Vec<CategorySpending> {
        store::spending_by_category(&self.state)
    }

    pub fn recent_transactions(&self, n: usize) -> impl Iterator<Item = &Transaction> + '_ {
        store::recent_transactions(&self.state, n)
    }

    pub fn summary(&self) -> BudgetSummary {
        store::summary(&self.state)
    }
}

impl Default for BudgetSession {
    fn default() -> Self {
        Self::seeded()
    }
}
