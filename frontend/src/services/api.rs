use async_trait::async_trait;
use gloo::net::http::{Request, Response};
use pocket_budget_core::{BudgetTransport, ReceiptUpload, TransportError, TransportReply};
use shared::{RECEIPT_FIELD, TRANSACTION_DATA_FIELD};
use wasm_bindgen::JsValue;
use web_sys::{Blob, BlobPropertyBag, FormData};

/// API client for communicating with the backend server
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Create a new API client with the default base URL
    pub fn new() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

async fn into_reply(response: Response) -> Result<TransportReply, TransportError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| TransportError(format!("Failed to read response: {}", e)))?;
    Ok(TransportReply { status, body })
}

fn js_error(context: &str, value: JsValue) -> TransportError {
    TransportError(format!("{}: {:?}", context, value))
}

fn receipt_form(receipt: &ReceiptUpload, transaction_data: &str) -> Result<FormData, TransportError> {
    let bytes = js_sys::Uint8Array::from(receipt.bytes.as_slice());
    let parts = js_sys::Array::of1(&bytes);
    let options = BlobPropertyBag::new();
    options.set_type(&receipt.content_type);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(|e| js_error("Failed to wrap receipt image", e))?;

    let form = FormData::new().map_err(|e| js_error("Failed to create form data", e))?;
    form.append_with_blob_and_filename(RECEIPT_FIELD, &blob, &receipt.file_name)
        .map_err(|e| js_error("Failed to attach receipt", e))?;
    form.append_with_str(TRANSACTION_DATA_FIELD, transaction_data)
        .map_err(|e| js_error("Failed to attach transaction data", e))?;
    Ok(form)
}

#[async_trait(?Send)]
impl BudgetTransport for ApiClient {
    async fn get(&self, path: &str) -> Result<TransportReply, TransportError> {
        let response = Request::get(&self.url(path))
            .send()
            .await
            .map_err(|e| TransportError(format!("Request failed: {}", e)))?;
        into_reply(response).await
    }

    async fn post_json(&self, path: &str, body: String) -> Result<TransportReply, TransportError> {
        let request = Request::post(&self.url(path))
            .header("Content-Type", "application/json")
            .body(body)
            .map_err(|e| TransportError(format!("Failed to build request: {}", e)))?;
        let response = request
            .send()
            .await
            .map_err(|e| TransportError(format!("Request failed: {}", e)))?;
        into_reply(response).await
    }

    async fn post_receipt(
        &self,
        path: &str,
        receipt: &ReceiptUpload,
        transaction_data: String,
    ) -> Result<TransportReply, TransportError> {
        // The browser sets the multipart boundary itself, so no Content-Type here
        let form = receipt_form(receipt, &transaction_data)?;
        let request = Request::post(&self.url(path))
            .body(form)
            .map_err(|e| TransportError(format!("Failed to build request: {}", e)))?;
        let response = request
            .send()
            .await
            .map_err(|e| TransportError(format!("Upload failed: {}", e)))?;
        into_reply(response).await
    }
}
