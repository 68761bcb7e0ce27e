use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Local;
use shared::{
    ErrorResponse, ReceiptUploadResponse, UpdateBudgetRequest, RECEIPT_FIELD,
    TRANSACTION_DATA_FIELD,
};
use tracing::{error, info, warn};

use crate::AppState;

fn error_response(status: StatusCode, message: impl Into<String>) -> axum::response::Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

/// Axum handler function for POST /api/update-budget
pub async fn update_budget(
    State(state): State<AppState>,
    Json(request): Json<UpdateBudgetRequest>,
) -> impl IntoResponse {
    info!(
        "POST /api/update-budget - {} transactions",
        request.state.transactions.len()
    );

    match state.budget_service.update(request.state).await {
        Ok(canonical) => (StatusCode::OK, Json(canonical)).into_response(),
        Err(e) => {
            warn!("Rejected budget update: {}", e);
            error_response(StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
        }
    }
}

/// Axum handler function for GET /api/get-budget-data
pub async fn get_budget_data(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/get-budget-data");
    Json(state.budget_service.current().await)
}

/// Axum handler function for POST /api/upload-receipt
pub async fn upload_receipt(State(state): State<AppState>, mut multipart: Multipart) -> impl IntoResponse {
    info!("POST /api/upload-receipt");

    let mut receipt: Option<(String, Vec<u8>)> = None;
    let mut transaction_data: Option<String> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                warn!("Malformed multipart body: {}", e);
                return error_response(StatusCode::BAD_REQUEST, "Malformed upload");
            }
        };

        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            RECEIPT_FIELD => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                match field.bytes().await {
                    Ok(bytes) => receipt = Some((file_name, bytes.to_vec())),
                    Err(e) => {
                        warn!("Failed to read receipt upload: {}", e);
                        return error_response(StatusCode::BAD_REQUEST, "Malformed upload");
                    }
                }
            }
            TRANSACTION_DATA_FIELD => match field.text().await {
                Ok(text) => transaction_data = Some(text),
                Err(e) => {
                    warn!("Failed to read transaction data: {}", e);
                    return error_response(StatusCode::BAD_REQUEST, "Malformed upload");
                }
            },
            other => info!("Ignoring multipart field '{}'", other),
        }
    }

    let Some((file_name, bytes)) = receipt else {
        return error_response(StatusCode::BAD_REQUEST, "No receipt file provided");
    };
    if file_name.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "No file selected");
    }

    let transaction_data = match transaction_data.as_deref().map(serde_json::from_str::<serde_json::Value>) {
        None => serde_json::json!({}),
        Some(Ok(value)) => value,
        Some(Err(e)) => {
            warn!("Invalid transaction data: {}", e);
            return error_response(StatusCode::BAD_REQUEST, "Invalid transaction_data");
        }
    };

    match state.receipt_store.save(&file_name, &bytes, Local::now()).await {
        Ok(stored) => {
            let response = ReceiptUploadResponse {
                message: "Receipt uploaded successfully".to_string(),
                filename: stored.filename,
                file_path: stored.path.display().to_string(),
                transaction_data,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Error storing receipt: {:?}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to store receipt")
        }
    }
}
