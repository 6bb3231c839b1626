//! Liveness HTTP Server.

use std::future::Future;

use anyhow::{Context, Result};
use axum::{Router, http::StatusCode};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, instrument};

pub const LIVENESS_BODY: &str = "Bot is running";

/// Router that answers any method on any path.
pub fn liveness_router() -> Router {
    Router::new()
        .fallback(|| async { (StatusCode::OK, LIVENESS_BODY) })
        .layer(TraceLayer::new_for_http())
}

/// Serve the liveness router on `addr` until `shutdown` resolves.
#[instrument(skip(shutdown))]
pub async fn start_server<F>(addr: &str, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind liveness server to {addr}"))?;
    serve(listener, shutdown).await
}

async fn serve<F>(listener: TcpListener, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    info!(addr = %listener.local_addr()?, "Liveness server listening");
    axum::serve(listener, liveness_router())
        .with_graceful_shutdown(shutdown)
        .await
        .context("liveness server failed")?;
    info!("Liveness server stopped");
    Ok(())
}
