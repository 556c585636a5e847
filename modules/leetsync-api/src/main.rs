use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use leetcode_client::LeetCodeClient;
use leetsync_api::{build_router, AppState};
use leetsync_core::{Aggregator, Config};

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::from_default_env()
        .add_directive("leetsync=info".parse()?)
        .add_directive("leetcode_client=info".parse()?);

    if std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json")) {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing()?;

    let config = Config::from_env()?;
    let client = LeetCodeClient::new(config.client_options()).context("failed to build LeetCode client")?;
    info!(base_url = client.base_url(), "LeetCode client ready");

    let state = Arc::new(AppState::new(Aggregator::leetcode(
        Arc::new(client),
        config.recent_limit,
    )));
    let app = build_router(state);

    let addr = config.listen_addr();
    info!("leetsync API starting on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
