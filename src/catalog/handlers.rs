use axum::{extract::State, routing::get, Json, Router};
use tracing::instrument;

use crate::{
    catalog::repo::{Category, Newsletter},
    error::ApiError,
    state::AppState,
};

pub const RECENT_LIMIT: i64 = 10;

pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/newsletters/featured", get(list_featured))
        .route("/newsletters/recent", get(list_recent))
        .route("/categories", get(list_categories))
}

#[instrument(skip(state))]
pub async fn list_featured(
    State(state): State<AppState>,
) -> Result<Json<Vec<Newsletter>>, ApiError> {
    let newsletters = Newsletter::list_featured(&state.db).await?;
    Ok(Json(newsletters))
}

#[instrument(skip(state))]
pub async fn list_recent(
    State(state): State<AppState>,
) -> Result<Json<Vec<Newsletter>>, ApiError> {
    let newsletters = Newsletter::list_recent(&state.db, RECENT_LIMIT).await?;
    Ok(Json(newsletters))
}

#[instrument(skip(state))]
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<Category>>, ApiError> {
    let categories = Category::list(&state.db).await?;
    Ok(Json(categories))
}
