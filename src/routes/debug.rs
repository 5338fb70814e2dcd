use axum::Json;
use serde_json::{json, Value};

/// GET /debug/health - Liveness probe; upstream services are not contacted
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
