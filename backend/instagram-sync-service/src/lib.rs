/// Instagram Sync Service Library
///
/// Mirrors an Instagram account's media into PostgreSQL and exposes a small
/// REST API for reading posts and publishing comments through the Graph API.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers
/// - `models`: Posts, comments and their API representations
/// - `services`: Sync routine, comment creation flow, post listing
/// - `db`: Repositories over PostgreSQL
/// - `instagram`: Graph API client
/// - `pagination`: Keyset cursors for the post listing
/// - `error`: Error types and HTTP mapping
/// - `config`: Configuration management
/// - `metrics`: Prometheus collectors
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod instagram;
pub mod metrics;
pub mod models;
pub mod pagination;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};

/// Embedded schema migrations
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
