/// HTTP handlers for instagram-sync-service
///
/// - Posts: Cursor-paginated listing and comment creation
/// - Sync: Full resynchronization from Instagram
/// - Health: Database-backed liveness summary
pub mod health;
pub mod posts;
pub mod sync;

pub use health::health_summary;
pub use posts::{create_comment, list_posts};
pub use sync::trigger_sync;

use crate::error::AppError;
use actix_web::web;

/// Extractor settings that render rejected bodies and paths as `AppError`s
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        AppError::BadRequest(format!("Invalid request body: {}", err)).into()
    })
}

fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|err, _req| AppError::NotFound(format!("Not found: {}", err)).into())
}

/// Register the `/api` routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(json_config())
            .app_data(path_config())
            .route("/health", web::get().to(health_summary))
            .route("/posts/", web::get().to(list_posts))
            .route("/posts/{post_id}/comment/", web::post().to(create_comment))
            .route("/sync/", web::post().to(trigger_sync)),
    );
}
