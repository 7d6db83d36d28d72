//! HTTP service: `POST /simulate`, `GET /health` and the static frontend.
//!
//! Simulation failures never become HTTP errors. The handler always answers
//! 200 with a `SimulationResponse` envelope; only a body that is not a
//! `SimulationRequest` at all is rejected by the JSON extractor.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crosslab_core::data::{AdjustMode, DataProvider};
use crosslab_runner::{run_simulation_with, RunError, SimulationRequest, SimulationResponse};

/// Shared by every request; the provider (and its circuit breaker) is built once.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn DataProvider>,
    pub adjust: AdjustMode,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

pub fn router(state: AppState, frontend_dir: &Path) -> Router {
    Router::new()
        .route("/simulate", post(simulate))
        .route("/health", get(health))
        .with_state(state)
        .route_service("/", ServeFile::new(frontend_dir.join("index.html")))
        .route_service("/result", ServeFile::new(frontend_dir.join("result.html")))
        .nest_service("/frontend", ServeDir::new(frontend_dir))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".into(),
        message: "Trading Strategy Simulator API".into(),
    })
}

async fn simulate(
    State(state): State<AppState>,
    Json(request): Json<SimulationRequest>,
) -> Json<SimulationResponse> {
    let symbol = request.symbol.clone();

    // Fetching is blocking I/O; keep it off the async workers.
    let outcome = tokio::task::spawn_blocking(move || {
        run_simulation_with(&request, state.provider.as_ref(), state.adjust)
    })
    .await
    .unwrap_or_else(|join_err| Err(RunError::Internal(join_err.to_string())));

    if let Err(e) = &outcome {
        warn!(%symbol, error = %e, "simulation request failed");
    }
    Json(SimulationResponse::from_outcome(outcome))
}

/// Bind `addr` and serve until Ctrl+C.
pub async fn serve(addr: &str, app: Router) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => warn!("received Ctrl+C, shutting down"),
        Err(e) => warn!(error = %e, "failed to listen for Ctrl+C; running until killed"),
    }
}
