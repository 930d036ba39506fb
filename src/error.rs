use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Every failure a handler can surface. Each variant maps to one status code
/// and a JSON `{"message"}` body; storage detail never reaches the client.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Not authenticated")]
    Unauthenticated,
    #[error("Newsletter not found")]
    NewsletterNotFound,
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::InvalidCredentials | ApiError::Unauthenticated => {
                (StatusCode::UNAUTHORIZED, self.to_string())
            }
            ApiError::NewsletterNotFound => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::MissingField(_) | ApiError::BadRequest(_) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            ApiError::Storage(e) => {
                tracing::error!(error = %e, "storage failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".into(),
                )
            }
        };
        (status, Json(json!({ "message": message }))).into_response()
    }
}
