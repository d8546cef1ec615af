//! Per-item record extraction.
//!
//! Every field except the id is best-effort: a feed renders plenty of
//! promoted placements and half-hydrated cards, and those must vanish
//! silently rather than abort the scroll pass.

use chrono::{DateTime, Utc};

use newshub_common::{FeedItemSnapshot, PostRecord, PostStatus, MAX_TEXT_CHARS};

const STATUS_MARKER: &str = "/status/";

/// Extract a normalized [`PostRecord`] from one rendered feed item, or
/// `None` when the item carries no usable numeric identity.
pub fn extract_post(
    item: &FeedItemSnapshot,
    query: &str,
    captured_at: DateTime<Utc>,
) -> Option<PostRecord> {
    let href = item.status_href.as_deref()?;
    let tweet_id = tweet_id_from_href(href)?;

    let tweet_url = if href.starts_with('/') {
        format!("https://x.com{href}")
    } else {
        href.to_string()
    };

    Some(PostRecord {
        tweet_id,
        tweet_url,
        author_username: item
            .author_href
            .as_deref()
            .map(username_from_href)
            .unwrap_or_default(),
        text: truncate_chars(item.text.as_deref().unwrap_or_default(), MAX_TEXT_CHARS),
        timestamp: item.timestamp.clone().unwrap_or_default(),
        search_query: query.to_string(),
        submitted_at: captured_at.to_rfc3339(),
        status: PostStatus::Pending,
    })
}

/// The numeric id is the path segment after the last `/status/` marker,
/// with any query string or trailing path (`/photo/1`, `/analytics`)
/// stripped. Non-numeric segments disqualify the item.
fn tweet_id_from_href(href: &str) -> Option<String> {
    let idx = href.rfind(STATUS_MARKER)?;
    let rest = &href[idx + STATUS_MARKER.len()..];
    let id = rest
        .split(['?', '/', '#'])
        .next()
        .unwrap_or_default();

    if !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()) {
        Some(id.to_string())
    } else {
        None
    }
}

/// First path segment of the profile link, e.g. `/alice` -> `alice`.
fn username_from_href(href: &str) -> String {
    href.trim_matches('/')
        .split('/')
        .next()
        .unwrap_or_default()
        .to_string()
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(status_href: &str) -> FeedItemSnapshot {
        FeedItemSnapshot {
            status_href: Some(status_href.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn extracts_id_from_plain_status_href() {
        assert_eq!(
            tweet_id_from_href("/alice/status/12345"),
            Some("12345".to_string())
        );
    }

    #[test]
    fn strips_query_string_and_trailing_path() {
        assert_eq!(
            tweet_id_from_href("/alice/status/12345?s=20"),
            Some("12345".to_string())
        );
        assert_eq!(
            tweet_id_from_href("/alice/status/12345/photo/1"),
            Some("12345".to_string())
        );
    }

    #[test]
    fn non_numeric_segment_is_rejected() {
        assert_eq!(tweet_id_from_href("/alice/status/12a45"), None);
        assert_eq!(tweet_id_from_href("/i/status/"), None);
    }

    #[test]
    fn missing_status_anchor_yields_nothing() {
        let snapshot = FeedItemSnapshot::default();
        assert!(extract_post(&snapshot, "svg", Utc::now()).is_none());
    }

    #[test]
    fn relative_href_becomes_absolute() {
        let record = extract_post(&item("/alice/status/99"), "svg", Utc::now()).unwrap();
        assert_eq!(record.tweet_url, "https://x.com/alice/status/99");

        let absolute = item("https://x.com/alice/status/99");
        let record = extract_post(&absolute, "svg", Utc::now()).unwrap();
        assert_eq!(record.tweet_url, "https://x.com/alice/status/99");
    }

    #[test]
    fn author_resolved_from_profile_href() {
        let mut snapshot = item("/alice/status/99");
        snapshot.author_href = Some("/alice".to_string());
        let record = extract_post(&snapshot, "svg", Utc::now()).unwrap();
        assert_eq!(record.author_username, "alice");
    }

    #[test]
    fn missing_optional_fields_default_to_empty() {
        let record = extract_post(&item("/alice/status/99"), "svg", Utc::now()).unwrap();
        assert_eq!(record.author_username, "");
        assert_eq!(record.text, "");
        assert_eq!(record.timestamp, "");
        assert_eq!(record.status, PostStatus::Pending);
    }

    #[test]
    fn text_truncated_to_five_hundred_chars() {
        let mut snapshot = item("/alice/status/99");
        snapshot.text = Some("รถ".repeat(800));
        let record = extract_post(&snapshot, "svg", Utc::now()).unwrap();
        assert_eq!(record.text.chars().count(), 500);
    }

    #[test]
    fn search_query_attributed() {
        let record = extract_post(&item("/a/status/7"), "vector graphics", Utc::now()).unwrap();
        assert_eq!(record.search_query, "vector graphics");
    }
}
