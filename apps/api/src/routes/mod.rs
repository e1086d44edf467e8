pub mod chat;
pub mod health;
pub mod portfolio;

use std::path::Path;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::state::AppState;

pub fn build_router(state: AppState, static_dir: Option<&Path>) -> Router {
    let router = Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/chat", post(chat::handle_chat))
        .route("/api/tools", get(chat::handle_list_tools))
        .route("/api/portfolio", get(portfolio::handle_get_portfolio))
        .route(
            "/api/portfolio/:collection",
            get(portfolio::handle_get_collection),
        )
        .with_state(state);

    match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    }
}
