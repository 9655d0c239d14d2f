/// Post service - cursor-paginated listing of mirrored posts
use crate::db::{comment_repo, post_repo};
use crate::error::Result;
use crate::models::{Comment, PostResponse};
use crate::pagination::{Cursor, Direction};
use sqlx::PgPool;
use std::collections::HashMap;

/// A page of posts plus the cursors that lead away from it
#[derive(Debug, Clone)]
pub struct PostListing {
    pub posts: Vec<PostResponse>,
    pub next: Option<Cursor>,
    pub previous: Option<Cursor>,
}

pub struct PostService {
    pool: PgPool,
}

impl PostService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List posts newest first, `page_size` at a time
    pub async fn list_posts(&self, cursor: Option<Cursor>, page_size: u32) -> Result<PostListing> {
        let limit = page_size as usize;
        let mut rows = post_repo::list_posts(&self.pool, cursor.as_ref(), limit as i64 + 1).await?;

        let (next, previous) = match cursor.map(|c| c.direction) {
            Some(Direction::Previous) => {
                // The extra row is the newest one, first in listing order
                let has_newer = rows.len() > limit;
                if has_newer {
                    rows.remove(0);
                }
                let previous = rows
                    .first()
                    .filter(|_| has_newer)
                    .map(|p| Cursor::previous(p.timestamp, p.id));
                let next = rows.last().map(|p| Cursor::next(p.timestamp, p.id));
                (next, previous)
            }
            direction => {
                let has_older = rows.len() > limit;
                rows.truncate(limit);
                let next = rows
                    .last()
                    .filter(|_| has_older)
                    .map(|p| Cursor::next(p.timestamp, p.id));
                let previous = rows
                    .first()
                    .filter(|_| direction.is_some())
                    .map(|p| Cursor::previous(p.timestamp, p.id));
                (next, previous)
            }
        };

        let post_ids: Vec<i64> = rows.iter().map(|p| p.id).collect();
        let mut comments_by_post: HashMap<i64, Vec<Comment>> = HashMap::new();
        for comment in comment_repo::get_comments_for_posts(&self.pool, &post_ids).await? {
            comments_by_post
                .entry(comment.post_id)
                .or_default()
                .push(comment);
        }

        let posts = rows
            .into_iter()
            .map(|post| {
                let comments = comments_by_post.remove(&post.id).unwrap_or_default();
                PostResponse::new(post, comments)
            })
            .collect();

        Ok(PostListing {
            posts,
            next,
            previous,
        })
    }
}
