use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::{cookie::CookieJar, WithRejection};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::{
        dto::{LoginRequest, MessageResponse, PublicUser},
        extractors::AuthUser,
        password::verify_password,
        repo::User,
        session::{removal_cookie, session_cookie, Session},
    },
    error::ApiError,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/logout", get(logout).post(logout))
        .route("/auth/me", get(me))
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

#[instrument(skip(state, jar, payload))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    WithRejection(Json(payload), _): WithRejection<Json<LoginRequest>, ApiError>,
) -> Result<(CookieJar, Json<PublicUser>), ApiError> {
    let email = payload.email.trim().to_lowercase();
    if email.is_empty() {
        return Err(ApiError::MissingField("email"));
    }
    if payload.password.is_empty() {
        return Err(ApiError::MissingField("password"));
    }
    if !is_valid_email(&email) {
        warn!(email = %email, "malformed login email");
        return Err(ApiError::BadRequest("Invalid email".into()));
    }

    // Unknown email and bad password produce the same response.
    let Some(user) = User::find_by_email(&state.db, &email).await? else {
        warn!(email = %email, "login unknown email");
        return Err(ApiError::InvalidCredentials);
    };

    if !verify_password(&payload.password, &user.password)? {
        warn!(user_id = user.id, "login invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    let session = Session::create(&state.db, user.id, state.config.session.ttl()).await?;
    let jar = jar.add(session_cookie(&state.config.session, session.token));

    info!(user_id = user.id, email = %user.email, "user logged in");
    Ok((jar, Json(PublicUser::from(user))))
}

/// Idempotent: a cookie-less or stale-cookie logout is still a 200.
#[instrument(skip(state, jar))]
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<MessageResponse>), ApiError> {
    if let Some(token) = jar
        .get(&state.config.session.cookie_name)
        .and_then(|cookie| cookie.value().parse::<Uuid>().ok())
    {
        Session::delete(&state.db, token).await?;
        info!(%token, "session discarded");
    }

    let jar = jar.remove(removal_cookie(&state.config.session));
    Ok((jar, Json(MessageResponse { message: "Logged out" })))
}

#[instrument(skip(state))]
pub async fn me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<PublicUser>, ApiError> {
    // The session can outlive its user row; treat that as anonymous.
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or(ApiError::Unauthenticated)?;
    Ok(Json(PublicUser::from(user)))
}
