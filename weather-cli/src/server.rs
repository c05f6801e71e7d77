//! Thin HTTP dispatcher in front of [`WeatherService`].

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use thiserror::Error;
use tokio::{net::TcpListener, signal};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};
use weather_core::{WeatherQuery, WeatherService, WeatherSummary};

/// Dispatcher failures. Service-level errors never end up here; they are
/// already part of the summary body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid query string: {0}")]
    Query(#[from] QueryRejection),

    #[error("Weather request task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!(error = %self, "request failed");
        let body = ErrorBody { error: self.to_string() };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

#[derive(Debug, Serialize)]
struct StatusResponse {
    status: &'static str,
}

pub fn router(service: Arc<WeatherService>) -> Router {
    Router::new()
        .route("/", get(status))
        .route("/api/weather", get(weather))
        .with_state(service)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

async fn status() -> Json<StatusResponse> {
    Json(StatusResponse { status: "Weather Service is running" })
}

async fn weather(
    State(service): State<Arc<WeatherService>>,
    query: Result<Query<WeatherQuery>, QueryRejection>,
) -> Result<Json<WeatherSummary>, ApiError> {
    let Query(query) = query?;
    // Run on its own task so a panic surfaces as a 500 instead of a dropped connection.
    let summary = tokio::spawn(async move { service.handle_query(query).await }).await?;
    Ok(Json(summary))
}

/// Bind `port` on all interfaces and serve until Ctrl-C.
pub async fn serve(service: Arc<WeatherService>, port: u16) -> anyhow::Result<()> {
    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    info!("Server listening on port {}", listener.local_addr()?.port());

    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        error!(error = %err, "failed to listen for shutdown signal");
    }
}
