use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

/// Reference data; no mutation routes exist for categories.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Newsletter {
    pub id: i32,
    pub title: String,
    pub publisher: String,
    pub description: String,
    pub image_url: String,
    pub audio_url: String,
    pub duration: i32,
    pub category_id: i32,
    pub published_at: OffsetDateTime,
    pub featured: bool,
}

impl Category {
    pub async fn list(db: &PgPool) -> anyhow::Result<Vec<Category>> {
        let rows = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, description
            FROM categories
            ORDER BY id
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(rows)
    }
}

impl Newsletter {
    pub async fn list_featured(db: &PgPool) -> anyhow::Result<Vec<Newsletter>> {
        let rows = sqlx::query_as::<_, Newsletter>(
            r#"
            SELECT id, title, publisher, description, image_url, audio_url,
                   duration, category_id, published_at, featured
            FROM newsletters
            WHERE featured
            ORDER BY id
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    /// Newest first; id breaks ties so equal timestamps order the same way
    /// on every call.
    pub async fn list_recent(db: &PgPool, limit: i64) -> anyhow::Result<Vec<Newsletter>> {
        let rows = sqlx::query_as::<_, Newsletter>(
            r#"
            SELECT id, title, publisher, description, image_url, audio_url,
                   duration, category_id, published_at, featured
            FROM newsletters
            ORDER BY published_at DESC, id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn exists(db: &PgPool, id: i32) -> anyhow::Result<bool> {
        let row: Option<(i32,)> =
            sqlx::query_as(r#"SELECT id FROM newsletters WHERE id = $1"#)
                .bind(id)
                .fetch_optional(db)
                .await?;
        Ok(row.is_some())
    }
}
