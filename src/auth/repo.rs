use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

/// User record in the database. The password column holds an argon2 PHC
/// string and is never serialized. The provider columns are reserved for
/// federated login and unused by any route.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: OffsetDateTime,
    #[serde(skip_serializing)]
    pub provider: Option<String>,
    #[serde(skip_serializing)]
    pub provider_id: Option<String>,
}

impl User {
    /// Find a user by exact email match.
    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password, name, avatar_url, created_at,
                   provider, provider_id
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Resolve a session's subject identity.
    pub async fn find_by_id(db: &PgPool, id: i32) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password, name, avatar_url, created_at,
                   provider, provider_id
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }
}
