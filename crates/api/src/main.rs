use std::sync::Arc;

use anyhow::Context;

use workforce_api::{config::AppConfig, store::InMemoryVerificationStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    workforce_observability::init();

    let config = AppConfig::from_env()?;
    let store = Arc::new(InMemoryVerificationStore::new());
    let app = workforce_api::app::build_app(&config, store);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
