//! In-memory transport for exercising the sync client without a server.

use async_trait::async_trait;
use shared::AppState;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use tokio::sync::Notify;

use crate::sync::{BudgetTransport, ReceiptUpload, TransportError, TransportReply};

#[derive(Debug, Clone, PartialEq)]
pub enum RecordedRequest {
    Get {
        path: String,
    },
    Json {
        path: String,
        body: String,
    },
    Receipt {
        path: String,
        file_name: String,
        transaction_data: String,
    },
}

/// Answers requests from a queue of scripted replies, recording what was sent.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: RefCell<VecDeque<Result<TransportReply, TransportError>>>,
    requests: RefCell<Vec<RecordedRequest>>,
    in_flight: Cell<usize>,
    max_in_flight: Cell<usize>,
    hold: Option<Rc<Notify>>,
}

pub fn ok_json(state: &AppState) -> TransportReply {
    TransportReply {
        status: 200,
        body: serde_json::to_string(state).unwrap(),
    }
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every request waits for a permit on `release` before answering
    pub fn held(release: Rc<Notify>) -> Self {
        Self {
            hold: Some(release),
            ..Self::default()
        }
    }

    pub fn reply(&self, reply: TransportReply) {
        self.replies.borrow_mut().push_back(Ok(reply));
    }

    pub fn fail(&self, message: &str) {
        self.replies
            .borrow_mut()
            .push_back(Err(TransportError(message.to_string())));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.borrow().clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.get()
    }

    async fn answer(&self, request: RecordedRequest) -> Result<TransportReply, TransportError> {
        self.requests.borrow_mut().push(request);
        self.in_flight.set(self.in_flight.get() + 1);
        self.max_in_flight
            .set(self.max_in_flight.get().max(self.in_flight.get()));

        match &self.hold {
            Some(release) => release.notified().await,
            None => {
                for _ in 0..3 {
                    tokio::task::yield_now().await;
                }
            }
        }

        self.in_flight.set(self.in_flight.get() - 1);
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError("no scripted reply".to_string())))
    }
}

#[async_trait(?Send)]
impl BudgetTransport for ScriptedTransport {
    async fn get(&self, path: &str) -> Result<TransportReply, TransportError> {
        self.answer(RecordedRequest::Get {
            path: path.to_string(),
        })
        .await
    }

    async fn post_json(&self, path: &str, body: String) -> Result<TransportReply, TransportError> {
        self.answer(RecordedRequest::Json {
            path: path.to_string(),
            body,
        })
        .await
    }

    async fn post_receipt(
        &self,
        path: &str,
        receipt: &ReceiptUpload,
        transaction_data: String,
    ) -> Result<TransportReply, TransportError> {
        self.answer(RecordedRequest::Receipt {
            path: path.to_string(),
            file_name: receipt.file_name.clone(),
            transaction_data,
        })
        .await
    }
}
