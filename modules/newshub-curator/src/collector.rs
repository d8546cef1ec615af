//! Scroll-and-collect pass for one search query.

use std::collections::HashSet;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{info, warn};
use url::Url;

use newshub_common::{Config, PostRecord};

use crate::extractor::extract_post;
use crate::traits::PageSession;

const SCROLL_STEP_PIXELS: u32 = 1000;

/// Live-results search endpoint for a query. The query is percent-encoded;
/// multi-word queries like "vector graphics" must survive the round trip.
pub fn search_url(query: &str) -> String {
    Url::parse_with_params(
        "https://x.com/search",
        &[("q", query), ("src", "typed_query"), ("f", "live")],
    )
    .expect("static base URL parses")
    .to_string()
}

pub struct ScrollCollector {
    scroll_count: u32,
    nav_settle: Duration,
    scroll_settle: Duration,
}

impl ScrollCollector {
    pub fn new(config: &Config) -> Self {
        Self {
            scroll_count: config.scroll_count,
            nav_settle: Duration::from_millis(config.nav_settle_ms),
            scroll_settle: Duration::from_millis(config.scroll_settle_ms),
        }
    }

    /// Collect the unique posts visible across a fixed number of scroll
    /// iterations of one query's live feed.
    ///
    /// The page re-renders items as it grows, so the same post surfaces in
    /// several snapshots; a page-local seen set keeps each id exactly once,
    /// first render wins. A fixed iteration count (rather than "until no
    /// new items") bounds the pass against an endless or rate-limited feed.
    ///
    /// Returns `Err` only for navigation failure; the caller degrades that
    /// to an empty batch so one unreachable query never affects the others.
    pub async fn collect(
        &self,
        session: &dyn PageSession,
        query: &str,
    ) -> Result<Vec<PostRecord>> {
        let url = search_url(query);
        session
            .goto(&url)
            .await
            .with_context(|| format!("loading search results for '{query}'"))?;
        session.settle(self.nav_settle).await;

        let mut seen: HashSet<String> = HashSet::new();
        let mut batch = Vec::new();

        for iteration in 0..self.scroll_count {
            let items = match session.feed_items().await {
                Ok(items) => items,
                Err(e) => {
                    // Page likely died mid-pass; keep what we have.
                    warn!(query, iteration, error = %e, "Feed snapshot failed, ending pass");
                    break;
                }
            };

            let captured_at = Utc::now();
            for item in &items {
                let Some(record) = extract_post(item, query, captured_at) else {
                    continue;
                };
                if seen.insert(record.tweet_id.clone()) {
                    batch.push(record);
                }
            }

            if let Err(e) = session.scroll_by(SCROLL_STEP_PIXELS).await {
                warn!(query, iteration, error = %e, "Scroll failed, ending pass");
                break;
            }
            session.settle(self.scroll_settle).await;
        }

        info!(query, count = batch.len(), "Search pass complete");
        Ok(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{snapshot, FakePage, FakeSession};

    fn collector(scrolls: u32) -> ScrollCollector {
        ScrollCollector {
            scroll_count: scrolls,
            nav_settle: Duration::ZERO,
            scroll_settle: Duration::ZERO,
        }
    }

    #[test]
    fn search_url_percent_encodes_query() {
        let url = search_url("vector graphics");
        assert!(url.contains("q=vector+graphics") || url.contains("q=vector%20graphics"));
        assert!(url.contains("f=live"));
    }

    #[tokio::test]
    async fn duplicate_renders_collected_once() {
        let session = FakeSession::new();
        session.add_page(
            &search_url("svg"),
            FakePage::with_snapshots(vec![vec![
                snapshot("/a/status/5", "alice"),
                snapshot("/a/status/5", "alice"),
                snapshot("/b/status/6", "bob"),
            ]]),
        );

        let batch = collector(3).collect(&session, "svg").await.unwrap();
        let ids: Vec<&str> = batch.iter().map(|r| r.tweet_id.as_str()).collect();
        assert_eq!(ids, vec!["5", "6"]);
    }

    #[tokio::test]
    async fn items_reappearing_across_scrolls_collected_once() {
        let session = FakeSession::new();
        session.add_page(
            &search_url("svg"),
            FakePage::with_snapshots(vec![
                vec![snapshot("/a/status/1", "a")],
                vec![snapshot("/a/status/1", "a"), snapshot("/b/status/2", "b")],
            ]),
        );

        let batch = collector(2).collect(&session, "svg").await.unwrap();
        let ids: Vec<&str> = batch.iter().map(|r| r.tweet_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert_eq!(session.scrolls(), 2);
    }

    #[tokio::test]
    async fn malformed_items_skipped_silently() {
        // Promoted placement: an anchor, but no /status/ id anywhere.
        let broken = snapshot("/promo/landing", "spam");

        let session = FakeSession::new();
        session.add_page(
            &search_url("svg"),
            FakePage::with_snapshots(vec![vec![broken, snapshot("/a/status/9", "a")]]),
        );

        let batch = collector(1).collect(&session, "svg").await.unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].tweet_id, "9");
    }

    #[tokio::test]
    async fn navigation_failure_is_an_error() {
        let session = FakeSession::new();
        session.fail_navigation(&search_url("svg"));

        assert!(collector(1).collect(&session, "svg").await.is_err());
    }
}
