use super::{ApiError, CreatedComment, MediaApi, MediaPage};
use crate::metrics::sync::record_api_request;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://graph.instagram.com";

/// Field set requested for every media object
pub const MEDIA_FIELDS: &str =
    "id,media_type,media_url,permalink,caption,timestamp,like_count,comments_count";

/// Settings for [`InstagramClient`]
#[derive(Clone)]
pub struct InstagramClientConfig {
    pub base_url: String,
    pub access_token: String,
    pub user_id: String,
    /// Items requested per page of `/me/media`
    pub page_limit: u32,
    pub request_timeout: Option<Duration>,
}

impl fmt::Debug for InstagramClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstagramClientConfig")
            .field("base_url", &self.base_url)
            .field("access_token", &"[REDACTED]")
            .field("user_id", &self.user_id)
            .field("page_limit", &self.page_limit)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl Default for InstagramClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            access_token: String::new(),
            user_id: String::new(),
            page_limit: 25,
            request_timeout: None,
        }
    }
}

/// Instagram Graph API client
pub struct InstagramClient {
    client: Client,
    config: InstagramClientConfig,
}

impl InstagramClient {
    pub fn new(mut config: InstagramClientConfig) -> Result<Self, ApiError> {
        config.base_url = config.base_url.trim_end_matches('/').to_string();

        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub fn user_id(&self) -> &str {
        &self.config.user_id
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url, path.trim_start_matches('/'))
    }

    async fn read_json<T: DeserializeOwned>(
        operation: &'static str,
        response: Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            record_api_request(operation, "error");
            warn!(operation, status = status.as_u16(), "Instagram API returned an error status");
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await.map_err(|e| {
            record_api_request(operation, "error");
            ApiError::from(e)
        })?;

        match serde_json::from_slice(&bytes) {
            Ok(value) => {
                record_api_request(operation, "success");
                Ok(value)
            }
            Err(e) => {
                record_api_request(operation, "error");
                Err(ApiError::Decode(e.to_string()))
            }
        }
    }

    async fn send(
        operation: &'static str,
        request: reqwest::RequestBuilder,
    ) -> Result<Response, ApiError> {
        request.send().await.map_err(|e| {
            record_api_request(operation, "error");
            ApiError::from(e)
        })
    }
}

#[async_trait]
impl MediaApi for InstagramClient {
    async fn list_media(&self) -> Result<MediaPage, ApiError> {
        debug!(limit = self.config.page_limit, "Fetching first media page");

        let limit = self.config.page_limit.to_string();
        let request = self.client.get(self.url("me/media")).query(&[
            ("access_token", self.config.access_token.as_str()),
            ("fields", MEDIA_FIELDS),
            ("limit", limit.as_str()),
        ]);

        let response = Self::send("list_media", request).await?;
        Self::read_json("list_media", response).await
    }

    async fn next_page(&self, next_url: &str) -> Result<MediaPage, ApiError> {
        debug!("Following media continuation URL");

        // The continuation URL already carries the access token
        let request = self.client.get(next_url).query(&[("fields", MEDIA_FIELDS)]);

        let response = Self::send("next_page", request).await?;
        Self::read_json("next_page", response).await
    }

    async fn media_exists(&self, instagram_id: &str) -> bool {
        let request = self.client.get(self.url(instagram_id)).query(&[
            ("access_token", self.config.access_token.as_str()),
            ("fields", "id"),
        ]);

        match request.send().await {
            Ok(response) => {
                let exists = response.status() == reqwest::StatusCode::OK;
                record_api_request("media_exists", if exists { "success" } else { "missing" });
                debug!(instagram_id, exists, "Checked remote media existence");
                exists
            }
            Err(e) => {
                record_api_request("media_exists", "error");
                warn!(instagram_id, error = %e.without_url(), "Media existence check failed");
                false
            }
        }
    }

    async fn post_comment(
        &self,
        instagram_id: &str,
        text: &str,
    ) -> Result<CreatedComment, ApiError> {
        debug!(instagram_id, "Publishing comment");

        let request = self.client.post(self.url("me/comments")).form(&[
            ("access_token", self.config.access_token.as_str()),
            ("media_id", instagram_id),
            ("text", text),
        ]);

        let response = Self::send("post_comment", request).await?;
        Self::read_json("post_comment", response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> InstagramClient {
        InstagramClient::new(InstagramClientConfig {
            base_url: format!("{}/", server.uri()),
            access_token: "test-token".to_string(),
            user_id: "17841400000".to_string(),
            page_limit: 2,
            request_timeout: Some(Duration::from_secs(5)),
        })
        .expect("client builds")
    }

    #[tokio::test]
    async fn test_list_media_sends_fields_and_limit() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/me/media"))
            .and(query_param("access_token", "test-token"))
            .and(query_param("fields", MEDIA_FIELDS))
            .and(query_param("limit", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [
                    { "id": "1", "media_type": "IMAGE", "timestamp": "2026-02-19T12:00:00+0000" }
                ],
                "paging": { "next": format!("{}/page-2", server.uri()) }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let page = client_for(&server).list_media().await.unwrap();
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].media_type, "IMAGE");
        assert_eq!(page.next_url(), Some(format!("{}/page-2", server.uri()).as_str()));
    }

    #[tokio::test]
    async fn test_next_page_adds_only_fields() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page-2"))
            .and(query_param("after", "abc"))
            .and(query_param("fields", MEDIA_FIELDS))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [
                    { "id": "2", "timestamp": "2026-02-18T12:00:00+0000" }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let url = format!("{}/page-2?after=abc", server.uri());
        let page = client_for(&server).next_page(&url).await.unwrap();
        assert_eq!(page.data[0].id, "2");
        assert_eq!(page.next_url(), None);
    }

    #[tokio::test]
    async fn test_list_media_error_status_is_raised() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/me/media"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": { "message": "Invalid OAuth access token" }
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).list_media().await.unwrap_err();
        match err {
            ApiError::Status { status, body } => {
                assert_eq!(status, 400);
                assert!(body.contains("Invalid OAuth access token"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_media_exists() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/live-media"))
            .and(query_param("fields", "id"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": "live-media" })),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/gone-media"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": { "message": "Media not found" }
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert!(client.media_exists("live-media").await);
        assert!(!client.media_exists("gone-media").await);
    }

    #[tokio::test]
    async fn test_media_exists_swallows_transport_errors() {
        // Nothing listens on port 9 (discard) on loopback in test environments
        let client = InstagramClient::new(InstagramClientConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            access_token: "test-token".to_string(),
            request_timeout: Some(Duration::from_secs(2)),
            ..InstagramClientConfig::default()
        })
        .unwrap();

        assert!(!client.media_exists("any").await);
    }

    #[tokio::test]
    async fn test_transport_error_hides_access_token() {
        let client = InstagramClient::new(InstagramClientConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            access_token: "SECRET-TOKEN-123".to_string(),
            request_timeout: Some(Duration::from_secs(2)),
            ..InstagramClientConfig::default()
        })
        .unwrap();

        let err = client.list_media().await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
        assert!(!err.to_string().contains("SECRET-TOKEN-123"), "{}", err);

        let sync_error = format!("Sync failed: {}", crate::error::AppError::from(err));
        assert!(!sync_error.contains("SECRET-TOKEN-123"), "{}", sync_error);

        let err = client
            .next_page("http://127.0.0.1:9/page-2?access_token=SECRET-TOKEN-123&after=x")
            .await
            .unwrap_err();
        assert!(!err.to_string().contains("SECRET-TOKEN-123"), "{}", err);
    }

    #[tokio::test]
    async fn test_post_comment_returns_remote_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/me/comments"))
            .and(body_string_contains("media_id=17841405823"))
            .and(body_string_contains("text=Great+post%21"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": "1785123" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let created = client_for(&server)
            .post_comment("17841405823", "Great post!")
            .await
            .unwrap();
        assert_eq!(created.id, "1785123");
    }

    #[tokio::test]
    async fn test_post_comment_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/me/comments"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .post_comment("1", "hello")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn test_config_debug_redacts_token() {
        let config = InstagramClientConfig {
            access_token: "secret-token".to_string(),
            ..InstagramClientConfig::default()
        };
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("secret-token"));
    }
}
