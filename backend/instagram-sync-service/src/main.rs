use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use db_pool::{create_pool, DbConfig};
use instagram_sync_service::config::Config;
use instagram_sync_service::handlers;
use instagram_sync_service::instagram::{InstagramClient, MediaApi};
use instagram_sync_service::metrics;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

async fn run_healthcheck(port: u16) -> anyhow::Result<()> {
    let url = format!("http://127.0.0.1:{}/api/health", port);
    let resp = reqwest::Client::new()
        .get(&url)
        .send()
        .await
        .context("healthcheck HTTP error")?;

    if resp.status().is_success() {
        Ok(())
    } else {
        anyhow::bail!("healthcheck HTTP status: {}", resp.status())
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,actix_web=info,sqlx=warn".into());

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

/// Instagram Sync Service
///
/// Mirrors an Instagram account's media into PostgreSQL and serves it back.
///
/// # Routes
///
/// - `GET /api/posts/` - Cursor-paginated posts with nested comments
/// - `POST /api/posts/{id}/comment/` - Publish a comment on Instagram and store it
/// - `POST /api/sync/` - Full resynchronization from the Graph API
/// - `GET /api/health` - PostgreSQL-backed health summary
/// - `GET /metrics` - Prometheus metrics
///
/// Runs on port 8000 (configurable via SERVICE_PORT env var).
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Support container healthchecks via CLI subcommand: `healthcheck`
    if let Some(cmd) = std::env::args().nth(1) {
        if cmd == "healthcheck" || cmd == "healthcheck-http" {
            let port = std::env::var("SERVICE_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000);
            return run_healthcheck(port).await;
        }
    }

    init_tracing();

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {}", e);
            anyhow::bail!("Failed to load configuration: {}", e);
        }
    };

    tracing::info!("Starting instagram-sync-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);
    tracing::debug!(instagram = ?config.instagram, "Instagram API configuration");

    let mut db_cfg = DbConfig::from_env("instagram-sync-service");
    if db_cfg.database_url.is_empty() {
        db_cfg.database_url = config.database.url.clone();
    }
    if std::env::var("DB_MAX_CONNECTIONS").is_err() {
        db_cfg.max_connections = config.database.max_connections;
        db_cfg.min_connections = db_cfg.min_connections.min(db_cfg.max_connections);
    }
    db_cfg.log_config();

    let db_pool = create_pool(db_cfg)
        .await
        .context("Failed to create database pool")?;
    tracing::info!("Connected to database via db-pool crate");

    instagram_sync_service::MIGRATOR
        .run(&db_pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");

    let instagram_client = InstagramClient::new(config.instagram.client_config())
        .context("Failed to build Instagram API client")?;
    tracing::info!(
        base_url = %instagram_client.base_url(),
        user_id = %instagram_client.user_id(),
        "Instagram API client initialized"
    );
    let media_api: Arc<dyn MediaApi> = Arc::new(instagram_client);

    let pool_data = web::Data::new(db_pool);
    let api_data = web::Data::new(media_api);
    let pagination_data = web::Data::new(config.pagination);

    let http_bind_address = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!("Starting HTTP server at {}", http_bind_address);

    let allowed_origins = config.cors.allowed_origins.clone();

    HttpServer::new(move || {
        let mut cors = Cors::default();
        for origin in allowed_origins.split(',') {
            let origin = origin.trim();
            if origin.is_empty() {
                continue;
            }
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        App::new()
            .app_data(pool_data.clone())
            .app_data(api_data.clone())
            .app_data(pagination_data.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .route("/metrics", web::get().to(metrics::serve_metrics))
            .configure(handlers::configure_routes)
    })
    .bind(&http_bind_address)
    .with_context(|| format!("Failed to bind {}", http_bind_address))?
    .run()
    .await
    .context("HTTP server error")?;

    tracing::info!("instagram-sync-service shutting down");
    Ok(())
}
