use axum_extra::extract::cookie::{Cookie, SameSite};
use sqlx::{FromRow, PgPool};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use crate::config::SessionConfig;

/// Server-side session row. The token is the only thing the client ever
/// holds; everything else stays in the database.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub token: Uuid,
    pub user_id: i32,
    pub created_at: OffsetDateTime,
    pub expires_at: OffsetDateTime,
}

impl Session {
    pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
        self.expires_at <= now
    }

    /// Bind a fresh session to a verified user.
    pub async fn create(db: &PgPool, user_id: i32, ttl: Duration) -> anyhow::Result<Session> {
        let token = Uuid::new_v4();
        let expires_at = OffsetDateTime::now_utc() + ttl;
        let session = sqlx::query_as::<_, Session>(
            r#"
            INSERT INTO sessions (token, user_id, expires_at)
            VALUES ($1, $2, $3)
            RETURNING token, user_id, created_at, expires_at
            "#,
        )
        .bind(token)
        .bind(user_id)
        .bind(expires_at)
        .fetch_one(db)
        .await?;
        Ok(session)
    }

    /// Look up a session by token, enforcing sliding expiration: an expired
    /// row is deleted on sight and reads as anonymous, a live one has its
    /// expiry pushed forward by `ttl`.
    pub async fn find_live(
        db: &PgPool,
        token: Uuid,
        ttl: Duration,
    ) -> anyhow::Result<Option<Session>> {
        let Some(mut session) = sqlx::query_as::<_, Session>(
            r#"
            SELECT token, user_id, created_at, expires_at
            FROM sessions
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(db)
        .await?
        else {
            return Ok(None);
        };

        let now = OffsetDateTime::now_utc();
        if session.is_expired_at(now) {
            Session::delete(db, token).await?;
            return Ok(None);
        }

        session.expires_at = now + ttl;
        sqlx::query(r#"UPDATE sessions SET expires_at = $2 WHERE token = $1"#)
            .bind(token)
            .bind(session.expires_at)
            .execute(db)
            .await?;
        Ok(Some(session))
    }

    /// Discard a session. Deleting an unknown token is a no-op.
    pub async fn delete(db: &PgPool, token: Uuid) -> anyhow::Result<()> {
        sqlx::query(r#"DELETE FROM sessions WHERE token = $1"#)
            .bind(token)
            .execute(db)
            .await?;
        Ok(())
    }
}

/// Cookie carrying the opaque session token back to the client.
pub fn session_cookie(config: &SessionConfig, token: Uuid) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), token.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Name+path cookie used to clear the session on logout.
pub fn removal_cookie(config: &SessionConfig) -> Cookie<'static> {
    Cookie::build(config.cookie_name.clone()).path("/").build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn config() -> SessionConfig {
        SessionConfig {
            cookie_name: "newsstand_session".into(),
            ttl_minutes: 60,
        }
    }

    #[test]
    fn session_cookie_is_http_only_lax_site_wide() {
        let cookie = session_cookie(&config(), Uuid::new_v4());
        assert_eq!(cookie.name(), "newsstand_session");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    }

    #[test]
    fn cookie_value_is_the_opaque_token() {
        let token = Uuid::new_v4();
        let cookie = session_cookie(&config(), token);
        assert_eq!(cookie.value().parse::<Uuid>().unwrap(), token);
    }

    #[test]
    fn expiry_is_a_strict_cutoff() {
        let session = Session {
            token: Uuid::new_v4(),
            user_id: 1,
            created_at: datetime!(2024-01-01 00:00:00 UTC),
            expires_at: datetime!(2024-01-15 00:00:00 UTC),
        };
        assert!(!session.is_expired_at(datetime!(2024-01-14 23:59:59 UTC)));
        assert!(session.is_expired_at(datetime!(2024-01-15 00:00:00 UTC)));
        assert!(session.is_expired_at(datetime!(2024-02-01 00:00:00 UTC)));
    }

    #[test]
    fn removal_cookie_matches_session_cookie_scope() {
        let removal = removal_cookie(&config());
        assert_eq!(removal.name(), "newsstand_session");
        assert_eq!(removal.path(), Some("/"));
    }
}
