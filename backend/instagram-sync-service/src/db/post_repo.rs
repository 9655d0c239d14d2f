use crate::instagram::MediaItem;
use crate::models::Post;
use crate::pagination::{Cursor, Direction};
use sqlx::{PgPool, Postgres};

const POST_COLUMNS: &str = r#"id, instagram_id, media_type, media_url, permalink, caption,
    "timestamp", like_count, comments_count, created_at, updated_at"#;

/// Insert or refresh a post keyed by `instagram_id`.
///
/// Returns `true` when a new row was inserted, `false` when an existing
/// row was updated.
pub async fn upsert_post<'e, E>(executor: E, item: &MediaItem) -> Result<bool, sqlx::Error>
where
    E: sqlx::Executor<'e, Database = Postgres>,
{
    // xmax is zero only for rows created by this statement
    let inserted = sqlx::query_scalar::<_, bool>(
        r#"
        INSERT INTO posts (instagram_id, media_type, media_url, permalink, caption,
                           "timestamp", like_count, comments_count)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        ON CONFLICT (instagram_id) DO UPDATE SET
            media_type = EXCLUDED.media_type,
            media_url = EXCLUDED.media_url,
            permalink = EXCLUDED.permalink,
            caption = EXCLUDED.caption,
            "timestamp" = EXCLUDED."timestamp",
            like_count = EXCLUDED.like_count,
            comments_count = EXCLUDED.comments_count,
            updated_at = NOW()
        RETURNING (xmax = 0) AS inserted
        "#,
    )
    .bind(&item.id)
    .bind(&item.media_type)
    .bind(&item.media_url)
    .bind(&item.permalink)
    .bind(&item.caption)
    .bind(item.timestamp)
    .bind(item.like_count)
    .bind(item.comments_count)
    .fetch_one(executor)
    .await?;

    Ok(inserted)
}

/// Find a post by its local primary key
pub async fn find_post_by_id(pool: &PgPool, post_id: i64) -> Result<Option<Post>, sqlx::Error> {
    let sql = format!("SELECT {POST_COLUMNS} FROM posts WHERE id = $1");
    let post = sqlx::query_as::<_, Post>(&sql)
        .bind(post_id)
        .fetch_optional(pool)
        .await?;

    Ok(post)
}

/// Find a post by its Instagram identifier
pub async fn find_post_by_instagram_id(
    pool: &PgPool,
    instagram_id: &str,
) -> Result<Option<Post>, sqlx::Error> {
    let sql = format!("SELECT {POST_COLUMNS} FROM posts WHERE instagram_id = $1");
    let post = sqlx::query_as::<_, Post>(&sql)
        .bind(instagram_id)
        .fetch_optional(pool)
        .await?;

    Ok(post)
}

/// Fetch up to `limit` posts adjacent to `cursor`.
///
/// Rows always come back in listing order (`timestamp DESC, id DESC`),
/// including for `Direction::Previous` pages which are read ascending and
/// reversed here.
pub async fn list_posts(
    pool: &PgPool,
    cursor: Option<&Cursor>,
    limit: i64,
) -> Result<Vec<Post>, sqlx::Error> {
    let posts = match cursor {
        None => {
            let sql = format!(
                r#"SELECT {POST_COLUMNS} FROM posts
                   ORDER BY "timestamp" DESC, id DESC
                   LIMIT $1"#
            );
            sqlx::query_as::<_, Post>(&sql)
                .bind(limit)
                .fetch_all(pool)
                .await?
        }
        Some(cursor) if cursor.direction == Direction::Next => {
            let sql = format!(
                r#"SELECT {POST_COLUMNS} FROM posts
                   WHERE ("timestamp", id) < ($1, $2)
                   ORDER BY "timestamp" DESC, id DESC
                   LIMIT $3"#
            );
            sqlx::query_as::<_, Post>(&sql)
                .bind(cursor.timestamp)
                .bind(cursor.id)
                .bind(limit)
                .fetch_all(pool)
                .await?
        }
        Some(cursor) => {
            let sql = format!(
                r#"SELECT {POST_COLUMNS} FROM posts
                   WHERE ("timestamp", id) > ($1, $2)
                   ORDER BY "timestamp" ASC, id ASC
                   LIMIT $3"#
            );
            let mut rows = sqlx::query_as::<_, Post>(&sql)
                .bind(cursor.timestamp)
                .bind(cursor.id)
                .bind(limit)
                .fetch_all(pool)
                .await?;
            rows.reverse();
            rows
        }
    };

    Ok(posts)
}

/// Count all mirrored posts
pub async fn count_posts(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM posts")
        .fetch_one(pool)
        .await
}
