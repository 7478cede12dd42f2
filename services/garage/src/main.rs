use std::sync::Arc;

use anyhow::{Context, Result};
use garage::config::AppConfig;
use garage::state::AppState;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env()?;
    let app_state = Arc::new(AppState::from_config(&cfg)?);

    let source = app_state.catalog.source().info();
    info!(
        source = %source.name,
        base_url = %source.base_url,
        ttl_secs = app_state.catalog.ttl().num_seconds(),
        data_path = %cfg.data_path,
        "garage: starting"
    );

    // Warm the catalog cache; the journal works offline so a miss is not fatal.
    let warm = app_state.clone();
    tokio::spawn(async move {
        match warm.catalog.get_all_cars().await {
            Ok(brands) => info!(brands = brands.len(), "catalog: warmed"),
            Err(e) => warn!(error = %e, "catalog: warm-up failed"),
        }
    });

    let app = garage::app(app_state);

    let addr = &cfg.bind_addr;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("garage listening on http://{addr}");
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
