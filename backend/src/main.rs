use pocket_budget_backend::{config::ServerConfig, create_router, initialize_backend};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::from_env()?;
    let app_state = initialize_backend(&config);
    let app = create_router(app_state, &config)?;

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!("Listening on {}", config.addr);

    axum::serve(listener, app).await?;

    Ok(())
}
