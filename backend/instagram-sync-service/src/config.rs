/// Configuration management for Instagram Sync Service
///
/// Everything is read from environment variables; a `.env` file is loaded
/// first by the binary when present.
use crate::instagram::{InstagramClientConfig, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Instagram Graph API configuration
    pub instagram: InstagramConfig,
    /// Post listing pagination
    pub pagination: PaginationConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development, staging, production)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// Server port to bind to
    pub port: u16,
}

impl AppConfig {
    pub fn is_production(&self) -> bool {
        self.env.eq_ignore_ascii_case("production")
    }
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins
    pub allowed_origins: String,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL
    pub url: String,
    /// Max connections in pool
    pub max_connections: u32,
}

/// Instagram Graph API configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct InstagramConfig {
    pub base_url: String,
    pub access_token: String,
    pub user_id: String,
    /// Items requested per `/me/media` page
    pub page_limit: u32,
    /// Per-request timeout; unset leaves the HTTP client default
    pub request_timeout_secs: Option<u64>,
}

impl std::fmt::Debug for InstagramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstagramConfig")
            .field("base_url", &self.base_url)
            .field("access_token", &"[REDACTED]")
            .field("user_id", &self.user_id)
            .field("page_limit", &self.page_limit)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl InstagramConfig {
    pub fn client_config(&self) -> InstagramClientConfig {
        InstagramClientConfig {
            base_url: self.base_url.clone(),
            access_token: self.access_token.clone(),
            user_id: self.user_id.clone(),
            page_limit: self.page_limit,
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
        }
    }
}

/// Page sizes for `GET /posts/`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PaginationConfig {
    pub default_page_size: u32,
    pub max_page_size: u32,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            max_page_size: 100,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        let production = app_env.eq_ignore_ascii_case("production");

        Ok(Config {
            app: AppConfig {
                env: app_env.clone(),
                host: std::env::var("SERVICE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or_default("SERVICE_PORT", 8000)?,
            },
            cors: {
                let allowed_origins = match std::env::var("CORS_ALLOWED_ORIGINS") {
                    Ok(value) => value,
                    Err(_) if production => {
                        return Err("CORS_ALLOWED_ORIGINS must be set in production".to_string())
                    }
                    Err(_) => "http://localhost:3000".to_string(),
                };

                if production && allowed_origins.trim() == "*" {
                    return Err("CORS_ALLOWED_ORIGINS cannot be '*' in production".to_string());
                }

                CorsConfig { allowed_origins }
            },
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "postgresql://localhost/instagram_sync".to_string()),
                max_connections: parse_env_or_default("DATABASE_MAX_CONNECTIONS", 10)?,
            },
            instagram: {
                let access_token = std::env::var("INSTAGRAM_ACCESS_TOKEN").unwrap_or_default();
                if production && access_token.trim().is_empty() {
                    return Err("INSTAGRAM_ACCESS_TOKEN must be set in production".to_string());
                }

                let page_limit = parse_env_or_default("INSTAGRAM_PAGE_LIMIT", 25)?;
                if page_limit == 0 {
                    return Err("INSTAGRAM_PAGE_LIMIT must be greater than zero".to_string());
                }

                InstagramConfig {
                    base_url: std::env::var("INSTAGRAM_API_BASE_URL")
                        .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
                    access_token,
                    user_id: std::env::var("INSTAGRAM_USER_ID").unwrap_or_default(),
                    page_limit,
                    request_timeout_secs: parse_env_optional("INSTAGRAM_REQUEST_TIMEOUT_SECS")?,
                }
            },
            pagination: {
                let defaults = PaginationConfig::default();
                let default_page_size =
                    parse_env_or_default("POSTS_PAGE_SIZE", defaults.default_page_size)?;
                let max_page_size =
                    parse_env_or_default("POSTS_MAX_PAGE_SIZE", defaults.max_page_size)?;

                if default_page_size == 0 || default_page_size > max_page_size {
                    return Err(format!(
                        "POSTS_PAGE_SIZE must be between 1 and POSTS_MAX_PAGE_SIZE ({})",
                        max_page_size
                    ));
                }

                PaginationConfig {
                    default_page_size,
                    max_page_size,
                }
            },
        })
    }
}

fn parse_env_or_default<T>(key: &str, default: T) -> Result<T, String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(val) => val
            .trim()
            .parse()
            .map_err(|e| format!("Failed to parse {}='{}': {}", key, val, e)),
        Err(_) => Ok(default),
    }
}

fn parse_env_optional<T>(key: &str) -> Result<Option<T>, String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(val) if val.trim().is_empty() => Ok(None),
        Ok(val) => val
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| format!("Failed to parse {}='{}': {}", key, val, e)),
        Err(_) => Ok(None),
    }
}
