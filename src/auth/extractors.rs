use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::warn;
use uuid::Uuid;

use crate::{auth::session::Session, error::ApiError, state::AppState};

/// Resolves the session cookie to an authenticated user id. Rejects with 401
/// before the handler body runs; protected handlers just take this as an
/// argument.
pub struct AuthUser(pub i32);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        // Anything that is not a token we issued reads as anonymous.
        let token = jar
            .get(&state.config.session.cookie_name)
            .and_then(|cookie| cookie.value().parse::<Uuid>().ok())
            .ok_or(ApiError::Unauthenticated)?;

        let session = Session::find_live(&state.db, token, state.config.session.ttl())
            .await
            .map_err(ApiError::Storage)?
            .ok_or_else(|| {
                warn!(%token, "session cookie for unknown or expired session");
                ApiError::Unauthenticated
            })?;

        Ok(AuthUser(session.user_id))
    }
}
