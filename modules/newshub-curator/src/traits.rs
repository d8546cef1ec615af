// Trait abstractions for the curator's external collaborators.
//
// PageSession — the single shared browser page behind the page-driver
//   daemon. One session, serial use; every method is a suspension point
//   (navigate, query, click, scroll, settle).
// ModerationQueue — the remote sheet acting as moderation queue.
// AgentNotifier — the moderation-agent webhook.
//
// These enable deterministic testing with FakeSession, StaticQueue, and
// RecordingNotifier: no browser, no network. `cargo test` in seconds.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;

use gviz_client::SheetRow;
use newshub_common::{FeedItemSnapshot, PostRecord, PostStatus};
use pagedriver_client::{FieldSpec, PageDriverClient};

// ---------------------------------------------------------------------------
// PageSession
// ---------------------------------------------------------------------------

#[async_trait]
pub trait PageSession: Send + Sync {
    /// Navigate the page to a URL.
    async fn goto(&self, url: &str) -> Result<()>;

    /// Snapshot every currently-rendered feed item. Fields a given item
    /// lacks come back as `None` — absence is never an error.
    async fn feed_items(&self) -> Result<Vec<FeedItemSnapshot>>;

    /// Click the first element matching `selector`. `Ok(false)` means the
    /// control is not present on the page.
    async fn click(&self, selector: &str) -> Result<bool>;

    /// Scroll the page down to trigger further feed growth.
    async fn scroll_by(&self, pixels: u32) -> Result<()>;

    /// Wait for asynchronous rendering to settle. Test sessions override
    /// this to return immediately.
    async fn settle(&self, wait: Duration) {
        tokio::time::sleep(wait).await;
    }
}

// ---------------------------------------------------------------------------
// ModerationQueue
// ---------------------------------------------------------------------------

#[async_trait]
pub trait ModerationQueue: Send + Sync {
    /// Fetch every row of the moderation queue.
    async fn rows(&self) -> Result<Vec<SheetRow>>;
}

// ---------------------------------------------------------------------------
// AgentNotifier
// ---------------------------------------------------------------------------

/// Fire-and-forget notifications to the moderation agent. Failures are
/// logged by the implementation and never surfaced to the caller; the run
/// continues regardless.
#[async_trait]
pub trait AgentNotifier: Send + Sync {
    async fn add_posts(&self, posts: &[PostRecord]);

    async fn update_status(&self, tweet_id: &str, status: PostStatus);
}

// ---------------------------------------------------------------------------
// DriverSession — PageSession over the page-driver daemon
// ---------------------------------------------------------------------------

const FEED_ITEM_SELECTOR: &str = r#"article[data-testid="tweet"]"#;

pub struct DriverSession {
    client: PageDriverClient,
}

impl DriverSession {
    pub fn new(client: PageDriverClient) -> Self {
        Self { client }
    }

    fn feed_fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::attr("status_href", r#"a[href*="/status/"]"#, "href"),
            FieldSpec::attr("author_href", r#"div[data-testid="User-Name"] a"#, "href"),
            FieldSpec::text("text", r#"div[data-testid="tweetText"]"#),
            FieldSpec::attr("timestamp", "time", "datetime"),
        ]
    }
}

#[async_trait]
impl PageSession for DriverSession {
    async fn goto(&self, url: &str) -> Result<()> {
        Ok(self.client.goto(url).await?)
    }

    async fn feed_items(&self) -> Result<Vec<FeedItemSnapshot>> {
        let elements = self
            .client
            .scrape(FEED_ITEM_SELECTOR, &Self::feed_fields())
            .await?;

        Ok(elements
            .into_iter()
            .map(|mut el| FeedItemSnapshot {
                status_href: el.remove("status_href").flatten(),
                author_href: el.remove("author_href").flatten(),
                text: el.remove("text").flatten(),
                timestamp: el.remove("timestamp").flatten(),
            })
            .collect())
    }

    async fn click(&self, selector: &str) -> Result<bool> {
        Ok(self.client.click(selector).await?)
    }

    async fn scroll_by(&self, pixels: u32) -> Result<()> {
        Ok(self.client.scroll_by(pixels).await?)
    }
}
