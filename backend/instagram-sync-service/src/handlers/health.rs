use actix_web::{web, HttpResponse};
use db_pool::PoolUsage;
use sqlx::PgPool;

/// Liveness summary backed by a PostgreSQL round trip
pub async fn health_summary(pool: web::Data<PgPool>) -> HttpResponse {
    let usage = PoolUsage::from_pool(&pool);

    match sqlx::query("SELECT 1").execute(pool.get_ref()).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": "instagram-sync-service",
            "version": env!("CARGO_PKG_VERSION"),
            "db_pool": {
                "idle": usage.idle,
                "active": usage.active,
                "max": usage.max,
            }
        })),
        Err(e) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "unhealthy",
            "error": format!("PostgreSQL connection failed: {}", e),
            "service": "instagram-sync-service"
        })),
    }
}
