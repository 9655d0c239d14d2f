//! Keyset cursors for the post listing
//!
//! Posts are listed by `(timestamp DESC, id DESC)`. A cursor pins a position
//! in that order plus the direction to read from it, and travels as
//! URL-safe base64 of `<n|p>:<timestamp micros>:<id>`.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};

/// Which side of the cursor position a page is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Older posts, strictly after the position in listing order
    Next,
    /// Newer posts, strictly before the position in listing order
    Previous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub direction: Direction,
    pub timestamp: DateTime<Utc>,
    pub id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid cursor")]
pub struct InvalidCursor;

impl Cursor {
    pub fn next(timestamp: DateTime<Utc>, id: i64) -> Self {
        Self {
            direction: Direction::Next,
            timestamp,
            id,
        }
    }

    pub fn previous(timestamp: DateTime<Utc>, id: i64) -> Self {
        Self {
            direction: Direction::Previous,
            timestamp,
            id,
        }
    }

    pub fn encode(&self) -> String {
        let tag = match self.direction {
            Direction::Next => 'n',
            Direction::Previous => 'p',
        };
        let raw = format!("{}:{}:{}", tag, self.timestamp.timestamp_micros(), self.id);
        URL_SAFE_NO_PAD.encode(raw)
    }

    pub fn decode(token: &str) -> Result<Self, InvalidCursor> {
        let bytes = URL_SAFE_NO_PAD
            .decode(token.trim())
            .map_err(|_| InvalidCursor)?;
        let raw = String::from_utf8(bytes).map_err(|_| InvalidCursor)?;

        let mut parts = raw.splitn(3, ':');
        let direction = match parts.next() {
            Some("n") => Direction::Next,
            Some("p") => Direction::Previous,
            _ => return Err(InvalidCursor),
        };
        let micros: i64 = parts
            .next()
            .and_then(|v| v.parse().ok())
            .ok_or(InvalidCursor)?;
        let id: i64 = parts
            .next()
            .and_then(|v| v.parse().ok())
            .ok_or(InvalidCursor)?;
        let timestamp = DateTime::<Utc>::from_timestamp_micros(micros).ok_or(InvalidCursor)?;

        Ok(Self {
            direction,
            timestamp,
            id,
        })
    }
}

/// Resolve the client-supplied `page_size` against the configured bounds.
///
/// Missing, unparsable or non-positive values fall back to `default`.
pub fn resolve_page_size(requested: Option<&str>, default: u32, max: u32) -> u32 {
    let size = requested
        .and_then(|raw| raw.trim().parse::<u32>().ok())
        .filter(|size| *size > 0)
        .unwrap_or(default);
    size.min(max.max(1))
}

/// Build a relative page link for `path`
pub fn page_link(path: &str, cursor: &Cursor, page_size: Option<u32>) -> String {
    match page_size {
        Some(size) => format!("{}?cursor={}&page_size={}", path, cursor.encode(), size),
        None => format!("{}?cursor={}", path, cursor.encode()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_cursor_round_trip_keeps_microseconds() {
        let ts = Utc
            .with_ymd_and_hms(2026, 2, 19, 12, 0, 0)
            .unwrap()
            + chrono::Duration::microseconds(123_456);
        let cursor = Cursor::previous(ts, 42);

        let decoded = Cursor::decode(&cursor.encode()).unwrap();
        assert_eq!(decoded, cursor);
    }

    #[test]
    fn test_cursor_token_is_url_safe() {
        let cursor = Cursor::next(Utc.with_ymd_and_hms(2026, 2, 19, 12, 0, 0).unwrap(), 1);
        let token = cursor.encode();
        assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert_eq!(Cursor::decode("!!!"), Err(InvalidCursor));
        assert_eq!(
            Cursor::decode(&URL_SAFE_NO_PAD.encode("x:1:1")),
            Err(InvalidCursor)
        );
        assert_eq!(
            Cursor::decode(&URL_SAFE_NO_PAD.encode("n:abc:1")),
            Err(InvalidCursor)
        );
        assert_eq!(
            Cursor::decode(&URL_SAFE_NO_PAD.encode("n:1")),
            Err(InvalidCursor)
        );
    }

    #[test]
    fn test_resolve_page_size() {
        assert_eq!(resolve_page_size(None, 10, 100), 10);
        assert_eq!(resolve_page_size(Some("3"), 10, 100), 3);
        assert_eq!(resolve_page_size(Some("0"), 10, 100), 10);
        assert_eq!(resolve_page_size(Some("-4"), 10, 100), 10);
        assert_eq!(resolve_page_size(Some("many"), 10, 100), 10);
        assert_eq!(resolve_page_size(Some("500"), 10, 100), 100);
    }

    #[test]
    fn test_page_link() {
        let cursor = Cursor::next(Utc.with_ymd_and_hms(2026, 2, 19, 12, 0, 0).unwrap(), 5);
        let token = cursor.encode();

        assert_eq!(
            page_link("/api/posts/", &cursor, None),
            format!("/api/posts/?cursor={}", token)
        );
        assert_eq!(
            page_link("/api/posts/", &cursor, Some(3)),
            format!("/api/posts/?cursor={}&page_size=3", token)
        );
    }
}
