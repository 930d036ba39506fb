use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use axum_extra::extract::WithRejection;
use tracing::{info, instrument, warn};

use crate::{
    auth::extractors::AuthUser,
    bookmarks::{dto::SaveRequest, repo::Bookmark},
    catalog::repo::Newsletter,
    error::ApiError,
    state::AppState,
};

pub fn bookmark_routes() -> Router<AppState> {
    Router::new().route(
        "/user/newsletters",
        get(list_saved).post(save_newsletter),
    )
}

/// Only the authenticated user's own rows; there is no cross-user listing.
#[instrument(skip(state))]
pub async fn list_saved(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<Bookmark>>, ApiError> {
    let bookmarks = Bookmark::list_for_user(&state.db, user_id).await?;
    Ok(Json(bookmarks))
}

#[instrument(skip(state, payload))]
pub async fn save_newsletter(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    WithRejection(Json(payload), _): WithRejection<Json<SaveRequest>, ApiError>,
) -> Result<Json<Bookmark>, ApiError> {
    if !Newsletter::exists(&state.db, payload.newsletter_id).await? {
        warn!(user_id, newsletter_id = payload.newsletter_id, "save of unknown newsletter");
        return Err(ApiError::NewsletterNotFound);
    }

    let bookmark = Bookmark::save(&state.db, user_id, payload.newsletter_id).await?;
    info!(user_id, newsletter_id = bookmark.newsletter_id, "newsletter saved");
    Ok(Json(bookmark))
}
