/// Sync handler - triggers a full resynchronization from Instagram
use crate::error::{AppError, Result};
use crate::instagram::MediaApi;
use crate::models::SyncResponse;
use crate::services::SyncService;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use std::sync::Arc;

/// Run a full sync and report created/updated/total counts
pub async fn trigger_sync(
    pool: web::Data<PgPool>,
    api: web::Data<Arc<dyn MediaApi>>,
) -> Result<HttpResponse> {
    let service = SyncService::new((**pool).clone(), api.get_ref().clone());
    let stats = service
        .sync_all_media()
        .await
        .map_err(|e| AppError::Internal(format!("Sync failed: {}", e)))?;

    Ok(HttpResponse::Ok().json(SyncResponse {
        message: "Sync completed".to_string(),
        stats,
    }))
}
