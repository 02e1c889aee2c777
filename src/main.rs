mod catalog;
mod gemini;
mod models;
mod prompt;
mod routes;
mod wizard;

use anyhow::Context;
use axum::{Router, routing::{post, get}};
use parking_lot::RwLock;
use routes::{
    AppState, back_step, download_result, generate_more, get_catalog, get_session, next_step,
    reset_session, select_persona, select_scene, start_generation, update_settings, upload_image,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{fmt, EnvFilter};
use tower_http::cors::{CorsLayer, Any};

use crate::gemini::GeminiClient;
use crate::wizard::WizardState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Init tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let api_key = std::env::var("GEMINI_API_KEY").context("GEMINI_API_KEY must be set")?;
    tracing::info!("Using API key: {}...", &api_key[..std::cmp::min(10, api_key.len())]);
    let state = AppState {
        wizard: Arc::new(RwLock::new(WizardState::new())),
        generator: Arc::new(GeminiClient::new(api_key)),
    };

    let app = Router::new()
        .route("/api/catalog", get(get_catalog))
        .route("/api/session", get(get_session))
        .route("/api/session/image", post(upload_image))
        .route("/api/session/persona", post(select_persona))
        .route("/api/session/scene", post(select_scene))
        .route("/api/session/settings", post(update_settings))
        .route("/api/session/next", post(next_step))
        .route("/api/session/back", post(back_step))
        .route("/api/session/generate", post(start_generation))
        .route("/api/session/more", post(generate_more))
        .route("/api/session/reset", post(reset_session))
        .route("/api/session/result/:index/download", get(download_result))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state);

    let port: u16 = std::env::var("PORT").ok().and_then(|v| v.parse().ok()).unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!(%addr, "Starting server");
    let listener = tokio::net::TcpListener::bind(addr).await.context("failed to bind")?;
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
