//! HTTP surface: the JSON arithmetic endpoint and the embedded keypad pages.
//!
//! The server is stateless. Keypad entry state lives in each page view; the
//! arithmetic itself resolves through `POST /api/calculate` so the evaluator
//! contract has a single home.

mod calculate;
mod pages;

use std::net::SocketAddr;

use anyhow::Context;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Build the application router.
///
/// The dashboard page variant is optional; the calculate endpoint and the
/// standard page are always mounted.
pub fn build_router(dashboard: bool) -> Router {
    let mut router = Router::new()
        .route("/", get(pages::index))
        .route("/healthz", get(pages::healthz))
        .route("/api/calculate", post(calculate::calculate));

    if dashboard {
        router = router.route("/dashboard", get(pages::dashboard));
    }

    // Permissive CORS for poking the API during development.
    router
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

/// Bind and serve until the process is stopped.
pub async fn run(addr: SocketAddr, dashboard: bool) -> anyhow::Result<()> {
    let app = build_router(dashboard);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    tracing::info!("calcboard listening on http://{addr}");
    if dashboard {
        tracing::info!("dashboard variant at http://{addr}/dashboard");
    }

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
