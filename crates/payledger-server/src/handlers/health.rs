//! Liveness handler

use axum::Json;
use serde_json::{json, Value};

/// GET /health - Liveness probe (no auth, no backend call)
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
