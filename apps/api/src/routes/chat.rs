use axum::{extract::State, Json};
use serde_json::{json, Value};
use tracing::info;

use crate::assistant::tools::{self, TOOL_NAMES};
use crate::errors::AppError;
use crate::models::chat::{ChatRequest, ChatResponse};
use crate::state::AppState;

/// POST /api/chat
///
/// One blocking round trip: the full reply is returned in a single body.
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let message = request.message.trim();
    if message.is_empty() {
        return Err(AppError::Validation("message cannot be empty".to_string()));
    }

    info!(
        "Chat request: {} chars, {} history message(s)",
        message.chars().count(),
        request.history.len()
    );

    let response = state.assistant.reply(message, &request.history).await?;
    Ok(Json(ChatResponse { response }))
}

/// GET /api/tools
pub async fn handle_list_tools() -> Json<Value> {
    Json(json!({
        "tools": TOOL_NAMES,
        "description": tools::catalog()
    }))
}
