//! Service info and health endpoints.

use axum::Json;

/// GET / - Service info.
pub async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": format!("Welcome to {}", env!("CARGO_PKG_NAME")),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /health - Basic health probe.
///
/// Returns 200 whenever the server is accepting connections. The cache is
/// best-effort and the store is exercised per-request, so neither is probed.
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
    }))
}
