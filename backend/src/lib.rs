//! # Pocket Budget Backend
//!
//! Keeps the canonical budget state and stores receipt images for the
//! dashboard.
//!
//! ```text
//! REST layer (rest.rs)
//!     ↓
//! Domain (domain.rs: budget ledger)   Storage (storage.rs: receipt files)
//! ```

pub mod config;
pub mod domain;
pub mod rest;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use shared::{api_paths, AppState as BudgetState};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::info;

use crate::config::ServerConfig;
use crate::domain::BudgetService;
use crate::storage::ReceiptStore;

/// Services shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub budget_service: BudgetService,
    pub receipt_store: ReceiptStore,
}

/// Initialize the backend services from the configuration
pub fn initialize_backend(config: &ServerConfig) -> AppState {
    info!("Setting up budget ledger");
    let budget_service = BudgetService::new(BudgetState::seeded(), config.default_limit);

    info!("Storing receipts in {}", config.upload_dir.display());
    let receipt_store = ReceiptStore::new(config.upload_dir.clone());

    AppState {
        budget_service,
        receipt_store,
    }
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, config: &ServerConfig) -> Result<Router> {
    let origin = config
        .allowed_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid allowed origin: {}", config.allowed_origin))?;

    // CORS setup to allow the dashboard to make requests
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Ok(Router::new()
        .route(api_paths::UPDATE_BUDGET, post(rest::update_budget))
        .route(api_paths::GET_BUDGET_DATA, get(rest::get_budget_data))
        .route(api_paths::UPLOAD_RECEIPT, post(rest::upload_receipt))
        .fallback_service(ServeDir::new(config.static_dir.clone()))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(cors)
        .with_state(app_state))
}
