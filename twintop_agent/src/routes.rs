//! HTTP routes. Every endpoint collects on demand from the shared sysinfo handles.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tracing::error;

use crate::metrics::{collect_metrics, collect_system_info, collect_top_processes};
use crate::state::AppState;
use crate::types::{Metrics, ProcessInfo, SystemInfo};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/metrics", get(metrics_handler))
        .route("/api/system-info", get(system_info_handler))
        .route("/api/processes/top", get(top_processes_handler))
        .with_state(state)
}

/// Handler failure rendered as `500 {"error": "..."}`.
pub struct ApiError(anyhow::Error);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!("request failed: {:#}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": self.0.to_string() })),
        )
            .into_response()
    }
}

impl<E: Into<anyhow::Error>> From<E> for ApiError {
    fn from(e: E) -> Self {
        Self(e.into())
    }
}

// sysinfo can panic on odd platforms; run collection on its own task so a panic
// becomes a 500 instead of a dropped connection.
async fn guarded<T, F>(fut: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: std::future::Future<Output = T> + Send + 'static,
{
    Ok(tokio::spawn(fut).await?)
}

async fn metrics_handler(State(state): State<AppState>) -> Result<Json<Metrics>, ApiError> {
    let m = guarded(async move { collect_metrics(&state).await }).await?;
    Ok(Json(m))
}

async fn system_info_handler(
    State(state): State<AppState>,
) -> Result<Json<SystemInfo>, ApiError> {
    let info = guarded(async move { collect_system_info(&state).await }).await?;
    Ok(Json(info))
}

async fn top_processes_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProcessInfo>>, ApiError> {
    let procs = guarded(async move { collect_top_processes(&state).await }).await?;
    Ok(Json(procs))
}
