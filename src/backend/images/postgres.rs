/**
 * Database Operations for Image Records
 *
 * This module provides the PostgreSQL-backed `ImageStore`. Records live in
 * the `images` table created by the migrations under `migrations/`; tags are
 * stored as a `TEXT[]` column so find-by-tag and distinct-tags are single
 * queries.
 */
use chrono::{DateTime, Utc};
use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::images::store::{ImageStore, StoreResult};
use crate::shared::ImageRecord;

#[derive(sqlx::FromRow)]
struct ImageRow {
    id: Uuid,
    title: String,
    tags: Vec<String>,
    date: DateTime<Utc>,
    inline_svg: String,
    serialized_board: String,
}

impl From<ImageRow> for ImageRecord {
    fn from(row: ImageRow) -> Self {
        ImageRecord {
            id: row.id.to_string(),
            title: row.title,
            tags: row.tags,
            date: row.date,
            inline_svg: row.inline_svg,
            serialized_board: row.serialized_board,
        }
    }
}

/// `ImageStore` backed by a PostgreSQL pool
#[derive(Debug, Clone)]
pub struct PgImageStore {
    pool: PgPool,
}

impl PgImageStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Ids that are not UUIDs can never match a stored row.
fn parse_id(id: &str) -> Option<Uuid> {
    Uuid::parse_str(id).ok()
}

impl ImageStore for PgImageStore {
    fn create(&self, record: ImageRecord) -> BoxFuture<'_, StoreResult<ImageRecord>> {
        async move {
            let row = sqlx::query_as::<_, ImageRow>(
                r#"
                INSERT INTO images (id, title, tags, date, inline_svg, serialized_board)
                VALUES ($1, $2, $3, NOW(), $4, $5)
                RETURNING id, title, tags, date, inline_svg, serialized_board
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(&record.title)
            .bind(&record.tags)
            .bind(&record.inline_svg)
            .bind(&record.serialized_board)
            .fetch_one(&self.pool)
            .await?;

            Ok(row.into())
        }
        .boxed()
    }

    fn find_by_id<'a>(&'a self, id: &'a str) -> BoxFuture<'a, StoreResult<Option<ImageRecord>>> {
        async move {
            let Some(id) = parse_id(id) else {
                return Ok(None);
            };

            let row = sqlx::query_as::<_, ImageRow>(
                r#"
                SELECT id, title, tags, date, inline_svg, serialized_board
                FROM images
                WHERE id = $1
                "#,
            )
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

            Ok(row.map(ImageRecord::from))
        }
        .boxed()
    }

    fn find_all(&self) -> BoxFuture<'_, StoreResult<Vec<ImageRecord>>> {
        async move {
            let rows = sqlx::query_as::<_, ImageRow>(
                r#"
                SELECT id, title, tags, date, inline_svg, serialized_board
                FROM images
                ORDER BY date DESC
                "#,
            )
            .fetch_all(&self.pool)
            .await?;

            Ok(rows.into_iter().map(ImageRecord::from).collect())
        }
        .boxed()
    }

    fn find_by_tag<'a>(&'a self, tag: &'a str) -> BoxFuture<'a, StoreResult<Vec<ImageRecord>>> {
        async move {
            let rows = sqlx::query_as::<_, ImageRow>(
                r#"
                SELECT id, title, tags, date, inline_svg, serialized_board
                FROM images
                WHERE $1 = ANY(tags)
                ORDER BY date DESC
                "#,
            )
            .bind(tag)
            .fetch_all(&self.pool)
            .await?;

            Ok(rows.into_iter().map(ImageRecord::from).collect())
        }
        .boxed()
    }

    fn distinct_tags(&self) -> BoxFuture<'_, StoreResult<Vec<String>>> {
        async move {
            let tags = sqlx::query_scalar::<_, String>(
                r#"
                SELECT DISTINCT tag
                FROM images, unnest(tags) AS tag
                ORDER BY tag
                "#,
            )
            .fetch_all(&self.pool)
            .await?;

            Ok(tags)
        }
        .boxed()
    }

    fn update(&self, record: ImageRecord) -> BoxFuture<'_, StoreResult<Option<ImageRecord>>> {
        async move {
            let Some(id) = parse_id(&record.id) else {
                return Ok(None);
            };

            let row = sqlx::query_as::<_, ImageRow>(
                r#"
                UPDATE images
                SET title = $2, tags = $3, date = NOW(), inline_svg = $4, serialized_board = $5
                WHERE id = $1
                RETURNING id, title, tags, date, inline_svg, serialized_board
                "#,
            )
            .bind(id)
            .bind(&record.title)
            .bind(&record.tags)
            .bind(&record.inline_svg)
            .bind(&record.serialized_board)
            .fetch_optional(&self.pool)
            .await?;

            Ok(row.map(ImageRecord::from))
        }
        .boxed()
    }

    fn delete<'a>(&'a self, id: &'a str) -> BoxFuture<'a, StoreResult<bool>> {
        async move {
            let Some(id) = parse_id(id) else {
                return Ok(false);
            };

            let result = sqlx::query("DELETE FROM images WHERE id = $1")
                .bind(id)
                .execute(&self.pool)
                .await?;

            Ok(result.rows_affected() > 0)
        }
        .boxed()
    }
}
