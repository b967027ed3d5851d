//! ucr-daemon entry point.
//!
//! This file is intentionally thin: it loads configuration, sets up
//! tracing, builds the shared state, wires middleware, and starts the HTTP
//! server. All route handlers live in `routes.rs`; all shared state types
//! live in `state.rs`.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::http::Method;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::{info, Level};
use ucr_config::AppConfig;
use ucr_daemon::{routes, state};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env.local if present (dev convenience). Silent if the file does
    // not exist; production injects env vars directly.
    let _ = dotenvy::from_filename(".env.local");

    init_tracing();

    let config = AppConfig::from_env().context("failed to load configuration")?;
    let bind_addr: SocketAddr =
        config.bind_addr.parse().context("APP_BIND_ADDR is not a valid socket address")?;
    let shared = Arc::new(state::AppState::from_config(config));

    let app = routes::build_router(Arc::clone(&shared))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors_permissive_get_post());

    info!("ucr-daemon listening on http://{}", bind_addr);

    axum::serve(tokio::net::TcpListener::bind(bind_addr).await?, app)
        .await
        .context("server crashed")?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();
}

/// This service has no browser-facing frontend of its own; CORS only needs
/// to allow the methods the API surface actually uses.
fn cors_permissive_get_post() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(tower_http::cors::Any)
}
