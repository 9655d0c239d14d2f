//! Instagram Graph API access
//!
//! `MediaApi` is the seam the services depend on; `InstagramClient` is the
//! reqwest-backed implementation used in production.

mod client;
mod types;

pub use client::{InstagramClient, InstagramClientConfig, DEFAULT_BASE_URL, MEDIA_FIELDS};
pub use types::{CreatedComment, MediaItem, MediaPage, Paging};

use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by the remote media API
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request never produced a response (DNS, connect, timeout)
    #[error("request failed: {0}")]
    Transport(reqwest::Error),

    /// Remote answered with a non-2xx status
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body did not match the expected shape
    #[error("invalid response body: {0}")]
    Decode(String),
}

// Request URLs carry the access token in their query string
impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err.without_url())
    }
}

/// Operations the service needs from the remote content platform
#[async_trait]
pub trait MediaApi: Send + Sync {
    /// First page of the account's media
    async fn list_media(&self) -> Result<MediaPage, ApiError>;

    /// Follow a `paging.next` continuation URL
    async fn next_page(&self, next_url: &str) -> Result<MediaPage, ApiError>;

    /// Whether the media item still exists remotely.
    ///
    /// Transport failures are reported as `false`, never as an error.
    async fn media_exists(&self, instagram_id: &str) -> bool;

    /// Publish a comment and return the remote-assigned identifier
    async fn post_comment(&self, instagram_id: &str, text: &str)
        -> Result<CreatedComment, ApiError>;
}
