//! HTTP front-end: the input form, the prediction endpoint and a health check.

pub mod page;
pub mod routes;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use log::info;

pub use state::{AppState, SharedState};

/// Builds the application router over `state`.
pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/predict", post(routes::predict))
        .route("/health", get(routes::health_check))
        .with_state(state)
}

/// Serves the application on `addr` until the process is stopped.
pub async fn serve(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let app = router(Arc::new(state));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await
}
