use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::assistant::tools::TOOL_NAMES;
use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version and assistant details.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "portfolio-api",
        "model": state.assistant.model_name(),
        "tools_count": TOOL_NAMES.len()
    }))
}
