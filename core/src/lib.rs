//! # Pocket Budget Core
//!
//! The budget-state reconciliation model behind the dashboard.
//!
//! - **validation**: turns raw form input into a checked transaction draft
//! - **store**: pure functions that append transactions and derive spending figures
//! - **reconcile**: the validation boundary for state arriving from the server
//! - **session**: revisioned snapshots so stale server answers are dropped
//! - **sync**: the REST sync client, generic over a [`sync::BudgetTransport`]
//! - **controller**: glue used by the view layer
//! - **notice**: user-facing messages for outcomes and errors
//!
//! ```text
//! form input → validation → store (new snapshot) → sync push → reconcile → session adopt
//! ```

pub mod controller;
pub mod notice;
pub mod reconcile;
pub mod session;
pub mod store;
pub mod sync;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_support;

pub use controller::{BudgetController, BudgetError};
pub use notice::{Notice, NoticeLevel};
pub use reconcile::{check_state, StateError};
pub use session::BudgetSession;
pub use sync::{
    BudgetTransport, ReceiptUpload, SyncClient, SyncError, TransportError, TransportReply,
    UploadError,
};
pub use validation::{ValidDraft, ValidationError};
