/// Post handlers - HTTP endpoints for listing posts and commenting on them
use crate::config::PaginationConfig;
use crate::error::{AppError, Result};
use crate::instagram::MediaApi;
use crate::models::{CreateCommentRequest, PostPage};
use crate::pagination::{page_link, resolve_page_size, Cursor};
use crate::services::{CommentService, PostService};
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use std::sync::Arc;

/// Query parameters for `GET /posts/`
#[derive(Debug, Deserialize)]
pub struct ListPostsQuery {
    pub cursor: Option<String>,
    /// Kept as text so a malformed value falls back to the default size
    pub page_size: Option<String>,
}

/// List posts newest first with their comments
pub async fn list_posts(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    pagination: web::Data<PaginationConfig>,
    query: web::Query<ListPostsQuery>,
) -> Result<HttpResponse> {
    let cursor = match query.cursor.as_deref().filter(|c| !c.is_empty()) {
        Some(token) => Some(Cursor::decode(token).map_err(|e| AppError::NotFound(e.to_string()))?),
        None => None,
    };

    let page_size = resolve_page_size(
        query.page_size.as_deref(),
        pagination.default_page_size,
        pagination.max_page_size,
    );
    // Only echo page_size in links when the client chose one
    let link_size = query.page_size.as_ref().map(|_| page_size);

    let service = PostService::new((**pool).clone());
    let listing = service.list_posts(cursor, page_size).await?;

    let path = req.path();
    Ok(HttpResponse::Ok().json(PostPage {
        next: listing.next.map(|c| page_link(path, &c, link_size)),
        previous: listing.previous.map(|c| page_link(path, &c, link_size)),
        results: listing.posts,
    }))
}

/// Create a comment on a post
pub async fn create_comment(
    pool: web::Data<PgPool>,
    api: web::Data<Arc<dyn MediaApi>>,
    post_id: web::Path<i64>,
    req: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse> {
    let service = CommentService::new((**pool).clone(), api.get_ref().clone());
    let comment = service.create_comment(*post_id, &req).await?;

    Ok(HttpResponse::Created().json(comment))
}
