/// Data models for instagram-sync-service
///
/// This module defines structures for:
/// - Post: Media mirrored from Instagram
/// - Comment: Comments published through this service
/// - API request/response shapes built on top of them
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Post mirrored from the Graph API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: i64,
    pub instagram_id: String,
    pub media_type: String,
    pub media_url: String,
    pub permalink: Option<String>,
    pub caption: String,
    pub timestamp: DateTime<Utc>,
    pub like_count: i64,
    pub comments_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Comment on a post; `instagram_comment_id` comes from the remote API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: i64,
    pub instagram_comment_id: String,
    #[serde(rename = "post")]
    pub post_id: i64,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// Post with its comments, as returned by the list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: i64,
    pub instagram_id: String,
    pub media_type: String,
    pub media_url: String,
    pub permalink: Option<String>,
    pub caption: String,
    pub timestamp: DateTime<Utc>,
    pub like_count: i64,
    pub comments_count: i64,
    pub comments: Vec<Comment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PostResponse {
    pub fn new(post: Post, comments: Vec<Comment>) -> Self {
        Self {
            id: post.id,
            instagram_id: post.instagram_id,
            media_type: post.media_type,
            media_url: post.media_url,
            permalink: post.permalink,
            caption: post.caption,
            timestamp: post.timestamp,
            like_count: post.like_count,
            comments_count: post.comments_count,
            comments,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// One page of the post listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostPage {
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<PostResponse>,
}

/// Request body for creating a comment
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, message = "text must not be empty"))]
    pub text: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    #[validate(length(max = 255, message = "username must be at most 255 characters"))]
    pub username: String,
}

/// Counters accumulated by one sync run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncStats {
    pub created: u64,
    pub updated: u64,
    pub total: u64,
}

impl SyncStats {
    pub fn record(&mut self, inserted: bool) {
        if inserted {
            self.created += 1;
        } else {
            self.updated += 1;
        }
        self.total += 1;
    }
}

/// Body of a successful `POST /sync/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncResponse {
    pub message: String,
    #[serde(flatten)]
    pub stats: SyncStats,
}
