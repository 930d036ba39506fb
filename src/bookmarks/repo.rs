use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

/// A user's saved newsletter. Nothing deduplicates saves; the same pair may
/// appear more than once.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Bookmark {
    pub id: i32,
    pub user_id: i32,
    pub newsletter_id: i32,
    pub saved_at: OffsetDateTime,
}

impl Bookmark {
    /// All bookmarks owned by `user_id`, newest first.
    pub async fn list_for_user(db: &PgPool, user_id: i32) -> anyhow::Result<Vec<Bookmark>> {
        let rows = sqlx::query_as::<_, Bookmark>(
            r#"
            SELECT id, user_id, newsletter_id, saved_at
            FROM bookmarks
            WHERE user_id = $1
            ORDER BY saved_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    /// Single atomic insert; saved_at comes from the database clock.
    pub async fn save(db: &PgPool, user_id: i32, newsletter_id: i32) -> anyhow::Result<Bookmark> {
        let bookmark = sqlx::query_as::<_, Bookmark>(
            r#"
            INSERT INTO bookmarks (user_id, newsletter_id)
            VALUES ($1, $2)
            RETURNING id, user_id, newsletter_id, saved_at
            "#,
        )
        .bind(user_id)
        .bind(newsletter_id)
        .fetch_one(db)
        .await?;
        Ok(bookmark)
    }
}
