/// Comment service - publishes a comment on Instagram, then stores it locally
use crate::db::{comment_repo, post_repo, NewComment};
use crate::error::{AppError, Result};
use crate::instagram::MediaApi;
use crate::metrics::sync::record_comment_attempt;
use crate::models::{Comment, CreateCommentRequest};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{info, warn};
use validator::Validate;

pub struct CommentService {
    pool: PgPool,
    api: Arc<dyn MediaApi>,
}

impl CommentService {
    pub fn new(pool: PgPool, api: Arc<dyn MediaApi>) -> Self {
        Self { pool, api }
    }

    /// Create a comment on the post with local primary key `post_id`.
    ///
    /// The local row is written only after Instagram accepted the comment,
    /// using the identifier it assigned.
    pub async fn create_comment(
        &self,
        post_id: i64,
        req: &CreateCommentRequest,
    ) -> Result<Comment> {
        req.validate()?;

        let post = match post_repo::find_post_by_id(&self.pool, post_id).await? {
            Some(post) => post,
            None => {
                record_comment_attempt("post_not_found");
                return Err(AppError::NotFound("Post not found".to_string()));
            }
        };

        if !self.api.media_exists(&post.instagram_id).await {
            record_comment_attempt("remote_not_found");
            warn!(
                post_id,
                instagram_id = %post.instagram_id,
                "Post no longer exists on Instagram"
            );
            return Err(AppError::NotFound(
                "Post not found in Instagram".to_string(),
            ));
        }

        let created = self
            .api
            .post_comment(&post.instagram_id, &req.text)
            .await
            .map_err(|e| {
                record_comment_attempt("remote_rejected");
                warn!(post_id, error = %e, "Instagram rejected comment");
                AppError::BadRequest(format!("Instagram API error: {}", e))
            })?;

        let comment = comment_repo::create_comment(
            &self.pool,
            NewComment {
                post_id: post.id,
                instagram_comment_id: &created.id,
                text: &req.text,
                timestamp: req.timestamp,
                username: &req.username,
            },
        )
        .await?;

        record_comment_attempt("created");
        info!(
            post_id,
            comment_id = comment.id,
            instagram_comment_id = %comment.instagram_comment_id,
            "Comment created"
        );

        Ok(comment)
    }
}
