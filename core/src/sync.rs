//! Sync client for the budget server.
//!
//! The HTTP exchange itself sits behind [`BudgetTransport`]; this module owns
//! encoding, status handling, decoding and the validation of whatever the
//! server sends back. State exchanges go through a single gate so only one
//! is ever in flight and answers arrive in the order requests were sent.

use async_trait::async_trait;
use serde::Serialize;
use shared::{api_paths, AppState, TransactionDraft};
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::reconcile::{check_state, StateError};

/// Status and body of an HTTP response, before any interpretation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportReply {
    pub status: u16,
    pub body: String,
}

impl TransportReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The request never produced a response
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// A receipt image picked by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// One request/response exchange with the server.
///
/// Futures are not required to be `Send` so a browser `fetch` can implement it.
#[async_trait(?Send)]
pub trait BudgetTransport {
    async fn get(&self, path: &str) -> Result<TransportReply, TransportError>;

    async fn post_json(&self, path: &str, body: String) -> Result<TransportReply, TransportError>;

    /// Multipart POST with the image under `receipt` and the JSON metadata
    /// under `transaction_data`
    async fn post_receipt(
        &self,
        path: &str,
        receipt: &ReceiptUpload,
        transaction_data: String,
    ) -> Result<TransportReply, TransportError>;
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SyncError {
    #[error("Failed to serialize budget state: {0}")]
    Encode(String),
    #[error("Network error: {0}")]
    Transport(#[from] TransportError),
    #[error("Server error {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Failed to parse server response: {0}")]
    Decode(String),
    #[error("Server sent inconsistent budget data: {0}")]
    InvalidState(#[from] StateError),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UploadError {
    #[error("Receipt image is empty")]
    EmptyImage,
    #[error("Failed to serialize receipt details: {0}")]
    Encode(String),
    #[error("Network error: {0}")]
    Transport(#[from] TransportError),
    #[error("Server error {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Failed to parse server response: {0}")]
    Decode(String),
}

/// Wire shape of `UpdateBudgetRequest`, borrowing instead of cloning the state
#[derive(Serialize)]
struct UpdateBudgetPayload<'a> {
    state: &'a AppState,
}

pub struct SyncClient<T> {
    transport: T,
    in_flight: Mutex<()>,
}

impl<T: BudgetTransport> SyncClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            in_flight: Mutex::new(()),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send the full state and return the server's canonical copy.
    ///
    /// On any error the caller keeps the state it already has.
    pub async fn push(&self, state: &AppState) -> Result<AppState, SyncError> {
        let _gate = self.in_flight.lock().await;

        let body = serde_json::to_string(&UpdateBudgetPayload { state })
            .map_err(|e| SyncError::Encode(e.to_string()))?;

        info!(
            "Pushing budget state: {} transactions, {} spent",
            state.transactions.len(),
            state.total_spent
        );
        let reply = self
            .transport
            .post_json(api_paths::UPDATE_BUDGET, body)
            .await
            .inspect_err(|e| error!("Budget push failed: {}", e))?;

        decode_state(reply)
    }

    /// Fetch the server's current state
    pub async fn pull(&self) -> Result<AppState, SyncError> {
        let _gate = self.in_flight.lock().await;

        info!("Fetching budget state");
        let reply = self
            .transport
            .get(api_paths::GET_BUDGET_DATA)
            .await
            .inspect_err(|e| error!("Budget fetch failed: {}", e))?;

        decode_state(reply)
    }

    /// Upload a receipt image with the transaction it belongs to.
    ///
    /// Independent of the state gate; the acknowledgment is returned as-is.
    pub async fn upload_receipt(
        &self,
        receipt: &ReceiptUpload,
        metadata: &TransactionDraft,
    ) -> Result<serde_json::Value, UploadError> {
        if receipt.bytes.is_empty() {
            return Err(UploadError::EmptyImage);
        }

        let transaction_data =
            serde_json::to_string(metadata).map_err(|e| UploadError::Encode(e.to_string()))?;

        info!(
            "Uploading receipt '{}' ({} bytes)",
            receipt.file_name,
            receipt.bytes.len()
        );
        let reply = self
            .transport
            .post_receipt(api_paths::UPLOAD_RECEIPT, receipt, transaction_data)
            .await
            .inspect_err(|e| error!("Receipt upload failed: {}", e))?;

        if !reply.is_success() {
            warn!("Receipt upload rejected with status {}", reply.status);
            return Err(UploadError::Status {
                status: reply.status,
                body: reply.body,
            });
        }

        serde_json::from_str(&reply.body).map_err(|e| UploadError::Decode(e.to_string()))
    }
}

fn decode_state(reply: TransportReply) -> Result<AppState, SyncError> {
    if !reply.is_success() {
        warn!("Budget server answered with status {}", reply.status);
        return Err(SyncError::Status {
            status: reply.status,
            body: reply.body,
        });
    }

    let state: AppState =
        serde_json::from_str(&reply.body).map_err(|e| SyncError::Decode(e.to_string()))?;
    check_state(&state).inspect_err(|e| warn!("Rejecting server state: {}", e))?;

    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ok_json, RecordedRequest, ScriptedTransport};
    use rust_decimal_macros::dec;
    use shared::UpdateBudgetRequest;

    fn receipt() -> ReceiptUpload {
        ReceiptUpload {
            file_name: "costco.jpg".to_string(),
            content_type: "image/jpeg".to_string(),
            bytes: vec![0xFF, 0xD8, 0xFF],
        }
    }

    #[tokio::test]
    async fn test_push_sends_wrapped_state() {
        let state = AppState::seeded();
        let transport = ScriptedTransport::new();
        transport.reply(ok_json(&state));
        let client = SyncClient::new(transport);

        client.push(&state).await.unwrap();

        let requests = client.transport().requests();
        let RecordedRequest::Json { path, body } = &requests[0] else {
            panic!("expected a JSON request, got {:?}", requests[0]);
        };
        assert_eq!(path, "/api/update-budget");
        let sent: UpdateBudgetRequest = serde_json::from_str(body).unwrap();
        assert_eq!(sent.state, state);
    }

    #[tokio::test]
    async fn test_push_returns_server_state_verbatim() {
        let mut canonical = AppState::seeded();
        canonical.total_budget = dec!(2000);
        let transport = ScriptedTransport::new();
        transport.reply(ok_json(&canonical));
        let client = SyncClient::new(transport);

        let adopted = client.push(&AppState::seeded()).await.unwrap();
        assert_eq!(adopted, canonical);
    }

    #[tokio::test]
    async fn test_push_failures() {
        let transport = ScriptedTransport::new();
        transport.fail("connection refused");
        transport.reply(TransportReply {
            status: 500,
            body: "boom".to_string(),
        });
        transport.reply(TransportReply {
            status: 200,
            body: "<html>not json</html>".to_string(),
        });
        let mut inconsistent = AppState::seeded();
        inconsistent.total_spent = dec!(99);
        transport.reply(ok_json(&inconsistent));
        let client = SyncClient::new(transport);
        let state = AppState::seeded();

        assert_eq!(
            client.push(&state).await,
            Err(SyncError::Transport(TransportError("connection refused".to_string())))
        );
        assert_eq!(
            client.push(&state).await,
            Err(SyncError::Status {
                status: 500,
                body: "boom".to_string()
            })
        );
        assert!(matches!(client.push(&state).await, Err(SyncError::Decode(_))));
        assert!(matches!(
            client.push(&state).await,
            Err(SyncError::InvalidState(StateError::TotalSpentMismatch { .. }))
        ));
    }

    #[tokio::test]
    async fn test_pull_reads_budget_data() {
        let transport = ScriptedTransport::new();
        transport.reply(ok_json(&AppState::seeded()));
        let client = SyncClient::new(transport);

        assert_eq!(client.pull().await, Ok(AppState::seeded()));
        assert_eq!(
            client.transport().requests(),
            vec![RecordedRequest::Get {
                path: "/api/get-budget-data".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn test_concurrent_pushes_are_serialized() {
        let state = AppState::seeded();
        let transport = ScriptedTransport::new();
        for _ in 0..3 {
            transport.reply(ok_json(&state));
        }
        let client = SyncClient::new(transport);

        let (a, b, c) = tokio::join!(client.push(&state), client.push(&state), client.pull());

        assert!(a.is_ok() && b.is_ok() && c.is_ok());
        assert_eq!(client.transport().requests().len(), 3);
        assert_eq!(client.transport().max_in_flight(), 1);
    }

    #[tokio::test]
    async fn test_upload_receipt_sends_metadata() {
        let transport = ScriptedTransport::new();
        transport.reply(TransportReply {
            status: 200,
            body: r#"{"message": "Receipt uploaded successfully", "filename": "20250914_120000_costco.jpg"}"#
                .to_string(),
        });
        let client = SyncClient::new(transport);
        let draft = TransactionDraft::expense("20.50", "Food", "Costco");

        let ack = client.upload_receipt(&receipt(), &draft).await.unwrap();
        assert_eq!(ack["filename"], "20250914_120000_costco.jpg");

        let requests = client.transport().requests();
        let RecordedRequest::Receipt { path, file_name, transaction_data } = &requests[0] else {
            panic!("expected a receipt upload, got {:?}", requests[0]);
        };
        assert_eq!(path, "/api/upload-receipt");
        assert_eq!(file_name, "costco.jpg");
        let sent: TransactionDraft = serde_json::from_str(transaction_data).unwrap();
        assert_eq!(sent, draft);
    }

    #[tokio::test]
    async fn test_upload_receipt_failures() {
        let transport = ScriptedTransport::new();
        transport.reply(TransportReply {
            status: 400,
            body: r#"{"error": "No file selected"}"#.to_string(),
        });
        transport.fail("offline");
        let client = SyncClient::new(transport);
        let draft = TransactionDraft::expense("1", "Food", "x");

        let empty = ReceiptUpload {
            bytes: Vec::new(),
            ..receipt()
        };
        assert_eq!(client.upload_receipt(&empty, &draft).await, Err(UploadError::EmptyImage));
        assert!(client.transport().requests().is_empty());

        assert!(matches!(
            client.upload_receipt(&receipt(), &draft).await,
            Err(UploadError::Status { status: 400, .. })
        ));
        assert_eq!(
            client.upload_receipt(&receipt(), &draft).await,
            Err(UploadError::Transport(TransportError("offline".to_string())))
        );
    }
}
