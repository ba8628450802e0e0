use axum::{extract::State, Json};
use serde_json::{json, Value};
use tracing::warn;

use crate::state::AppState;

/// GET /health
/// Reports this service and whether the resume backend answers.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let backend = match state.backend.health().await {
        Ok(health) => json!({ "status": health.status, "service": health.service }),
        Err(e) => {
            warn!("Backend health check failed: {e}");
            json!({ "status": "unreachable", "error": e.to_string() })
        }
    };

    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "resume-editor",
        "backend_url": state.config.backend_url,
        "backend": backend
    }))
}
