use axum::response::IntoResponse;
use serde_json::json;

use crate::middleware::ApiResponse;

/// GET /health - liveness check, never touches the session provider
pub async fn health() -> impl IntoResponse {
    ApiResponse::success(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now(),
    }))
}
