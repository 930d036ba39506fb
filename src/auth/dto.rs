use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::auth::repo::User;

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Public part of the user returned to the client. No credential and no
/// provider columns.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: OffsetDateTime,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            name: user.name,
            avatar_url: user.avatar_url,
            created_at: user.created_at,
        }
    }
}

/// Body of acknowledgement responses such as logout.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
