//! Deterministic doubles for the collaborator traits: no browser, no
//! network, no sleeps.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use gviz_client::SheetRow;
use newshub_common::{FeedItemSnapshot, PostRecord, PostStatus};

use crate::traits::{AgentNotifier, ModerationQueue, PageSession};

/// A fully-populated feed item snapshot for `/author/status/<id>` hrefs.
pub fn snapshot(status_href: &str, author: &str) -> FeedItemSnapshot {
    FeedItemSnapshot {
        status_href: Some(status_href.to_string()),
        author_href: Some(format!("/{author}")),
        text: Some(format!("post by {author}")),
        timestamp: Some("2024-05-01T12:00:00.000Z".to_string()),
    }
}

/// Build a sheet row from label/value pairs.
pub fn row(cells: &[(&str, &str)]) -> SheetRow {
    cells
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

// ---------------------------------------------------------------------------
// FakeSession
// ---------------------------------------------------------------------------

/// One scripted page: a sequence of feed snapshots (one per `feed_items`
/// call, last repeating) and the set of clickable controls present on it.
#[derive(Default)]
pub struct FakePage {
    snapshots: Vec<Vec<FeedItemSnapshot>>,
    controls: HashSet<String>,
}

impl FakePage {
    pub fn with_snapshots(snapshots: Vec<Vec<FeedItemSnapshot>>) -> Self {
        Self {
            snapshots,
            controls: HashSet::new(),
        }
    }

    pub fn with_controls(selectors: &[&str]) -> Self {
        Self {
            snapshots: Vec::new(),
            controls: selectors.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Default)]
struct SessionState {
    pages: HashMap<String, FakePage>,
    nav_failures: HashSet<String>,
    current_url: Option<String>,
    feed_calls: HashMap<String, usize>,
    visited: Vec<String>,
    clicks: Vec<(String, String)>,
    scrolls: u32,
}

#[derive(Default)]
pub struct FakeSession {
    state: Mutex<SessionState>,
}

impl FakeSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_page(&self, url: &str, page: FakePage) {
        self.state.lock().unwrap().pages.insert(url.to_string(), page);
    }

    pub fn fail_navigation(&self, url: &str) {
        self.state
            .lock()
            .unwrap()
            .nav_failures
            .insert(url.to_string());
    }

    pub fn visited(&self) -> Vec<String> {
        self.state.lock().unwrap().visited.clone()
    }

    /// Recorded clicks as (page url, selector) pairs, in order.
    pub fn clicks(&self) -> Vec<(String, String)> {
        self.state.lock().unwrap().clicks.clone()
    }

    pub fn scrolls(&self) -> u32 {
        self.state.lock().unwrap().scrolls
    }
}

#[async_trait]
impl PageSession for FakeSession {
    async fn goto(&self, url: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.nav_failures.contains(url) {
            return Err(anyhow!("navigation failed: {url}"));
        }
        state.current_url = Some(url.to_string());
        state.visited.push(url.to_string());
        Ok(())
    }

    async fn feed_items(&self) -> Result<Vec<FeedItemSnapshot>> {
        let mut state = self.state.lock().unwrap();
        let Some(url) = state.current_url.clone() else {
            return Ok(Vec::new());
        };
        let call = *state.feed_calls.get(&url).unwrap_or(&0);
        state.feed_calls.insert(url.clone(), call + 1);

        let Some(page) = state.pages.get(&url) else {
            return Ok(Vec::new());
        };
        if page.snapshots.is_empty() {
            return Ok(Vec::new());
        }
        let idx = call.min(page.snapshots.len() - 1);
        Ok(page.snapshots[idx].clone())
    }

    async fn click(&self, selector: &str) -> Result<bool> {
        let mut state = self.state.lock().unwrap();
        let Some(url) = state.current_url.clone() else {
            return Ok(false);
        };
        let present = state
            .pages
            .get(&url)
            .map(|p| p.controls.contains(selector))
            .unwrap_or(false);
        if present {
            state.clicks.push((url, selector.to_string()));
        }
        Ok(present)
    }

    async fn scroll_by(&self, _pixels: u32) -> Result<()> {
        self.state.lock().unwrap().scrolls += 1;
        Ok(())
    }

    async fn settle(&self, _wait: Duration) {}
}

// ---------------------------------------------------------------------------
// StaticQueue / FailingQueue
// ---------------------------------------------------------------------------

pub struct StaticQueue {
    rows: Vec<SheetRow>,
}

impl StaticQueue {
    pub fn new(rows: Vec<SheetRow>) -> Self {
        Self { rows }
    }
}

#[async_trait]
impl ModerationQueue for StaticQueue {
    async fn rows(&self) -> Result<Vec<SheetRow>> {
        Ok(self.rows.clone())
    }
}

/// Queue whose fetch always fails, for degraded-run scenarios.
pub struct FailingQueue;

#[async_trait]
impl ModerationQueue for FailingQueue {
    async fn rows(&self) -> Result<Vec<SheetRow>> {
        Err(anyhow!("sheet unreachable"))
    }
}

// ---------------------------------------------------------------------------
// RecordingNotifier
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct RecordingNotifier {
    forwarded: Mutex<Vec<Vec<PostRecord>>>,
    status_updates: Mutex<Vec<(String, PostStatus)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Batches passed to `add_posts`, in order.
    pub fn forwarded(&self) -> Vec<Vec<PostRecord>> {
        self.forwarded.lock().unwrap().clone()
    }

    pub fn status_updates(&self) -> Vec<(String, PostStatus)> {
        self.status_updates.lock().unwrap().clone()
    }
}

#[async_trait]
impl AgentNotifier for RecordingNotifier {
    async fn add_posts(&self, posts: &[PostRecord]) {
        self.forwarded.lock().unwrap().push(posts.to_vec());
    }

    async fn update_status(&self, tweet_id: &str, status: PostStatus) {
        self.status_updates
            .lock()
            .unwrap()
            .push((tweet_id.to_string(), status));
    }
}
