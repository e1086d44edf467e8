use axum::{
    extract::{Path, State},
    Json,
};

use crate::errors::AppError;
use crate::models::content::{CollectionKind, ContentItem, Portfolio};
use crate::state::AppState;

/// GET /api/portfolio
pub async fn handle_get_portfolio(State(state): State<AppState>) -> Json<Portfolio> {
    Json(state.portfolio.as_ref().clone())
}

/// GET /api/portfolio/:collection
pub async fn handle_get_collection(
    State(state): State<AppState>,
    Path(collection): Path<String>,
) -> Result<Json<Vec<ContentItem>>, AppError> {
    let kind: CollectionKind = collection.parse()?;
    Ok(Json(state.portfolio.collection(kind).to_vec()))
}
