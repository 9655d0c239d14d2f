use crate::models::Comment;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

/// Values for a comment the remote API has already accepted
#[derive(Debug, Clone)]
pub struct NewComment<'a> {
    pub post_id: i64,
    pub instagram_comment_id: &'a str,
    pub text: &'a str,
    pub timestamp: DateTime<Utc>,
    pub username: &'a str,
}

/// Persist a comment on a post
pub async fn create_comment(pool: &PgPool, comment: NewComment<'_>) -> Result<Comment, sqlx::Error> {
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        INSERT INTO comments (instagram_comment_id, post_id, text, "timestamp", username)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, instagram_comment_id, post_id, text, "timestamp", username, created_at
        "#,
    )
    .bind(comment.instagram_comment_id)
    .bind(comment.post_id)
    .bind(comment.text)
    .bind(comment.timestamp)
    .bind(comment.username)
    .fetch_one(pool)
    .await?;

    Ok(comment)
}

/// Comments for a set of posts, oldest first within each post
pub async fn get_comments_for_posts(
    pool: &PgPool,
    post_ids: &[i64],
) -> Result<Vec<Comment>, sqlx::Error> {
    if post_ids.is_empty() {
        return Ok(Vec::new());
    }

    let comments = sqlx::query_as::<_, Comment>(
        r#"
        SELECT id, instagram_comment_id, post_id, text, "timestamp", username, created_at
        FROM comments
        WHERE post_id = ANY($1)
        ORDER BY post_id, "timestamp" ASC, id ASC
        "#,
    )
    .bind(post_ids)
    .fetch_all(pool)
    .await?;

    Ok(comments)
}

/// Count comments for a post
pub async fn count_comments_by_post(pool: &PgPool, post_id: i64) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM comments WHERE post_id = $1")
        .bind(post_id)
        .fetch_one(pool)
        .await
}
