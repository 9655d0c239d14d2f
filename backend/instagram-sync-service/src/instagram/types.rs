use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// One page of `/me/media`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaPage {
    #[serde(default)]
    pub data: Vec<MediaItem>,
    #[serde(default)]
    pub paging: Option<Paging>,
}

impl MediaPage {
    /// Continuation URL for the following page, if any
    pub fn next_url(&self) -> Option<&str> {
        self.paging
            .as_ref()
            .and_then(|p| p.next.as_deref())
            .filter(|url| !url.is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Paging {
    #[serde(default)]
    pub next: Option<String>,
}

/// Media object as returned for `MEDIA_FIELDS`
#[derive(Debug, Clone, Deserialize)]
pub struct MediaItem {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub media_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub media_url: String,
    #[serde(default)]
    pub permalink: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub caption: String,
    #[serde(deserialize_with = "deserialize_graph_timestamp")]
    pub timestamp: DateTime<Utc>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub like_count: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub comments_count: i64,
}

/// Response of `POST /me/comments`
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedComment {
    pub id: String,
}

/// Graph API timestamps look like `2026-02-19T12:00:00+0000`; RFC 3339 is
/// accepted as well.
pub(crate) fn parse_graph_timestamp(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%z"))
        .map(|dt| dt.with_timezone(&Utc))
}

/// Missing and explicit `null` values both become the type's default
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn deserialize_graph_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_graph_timestamp(&raw).map_err(serde::de::Error::custom)
}
