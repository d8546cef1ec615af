//! Durable set of tweet ids already retweeted.
//!
//! Independent of the sheet and cheaper to consult: the sheet says what a
//! moderator approved, the ledger says what this machine already acted on.
//! Loaded once at run start, mutated in memory as retweets succeed, and
//! persisted once at run end. A crash between the two re-attempts the
//! retweet next run — accepted, since the alternative (persist before
//! acting) would silently drop posts.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

#[derive(Debug, Default)]
pub struct ProcessedLedger {
    ids: HashSet<String>,
}

impl ProcessedLedger {
    /// Load from a JSON array of id strings. An absent file is an empty
    /// ledger; a present-but-unreadable file is an error, because running
    /// with a silently-empty ledger would re-retweet everything in it.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!(path = %path.display(), "No ledger file, starting empty");
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading ledger {}", path.display()))?;
        let ids: HashSet<String> = serde_json::from_str(&raw)
            .with_context(|| format!("parsing ledger {}", path.display()))?;

        info!(path = %path.display(), count = ids.len(), "Ledger loaded");
        Ok(Self { ids })
    }

    pub fn contains(&self, tweet_id: &str) -> bool {
        self.ids.contains(tweet_id)
    }

    pub fn insert(&mut self, tweet_id: &str) {
        self.ids.insert(tweet_id.to_string());
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Overwrite the ledger file with the full current set, creating parent
    /// directories on first run. Ids are written sorted so successive runs
    /// diff cleanly.
    pub fn persist(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating ledger dir {}", parent.display()))?;
        }

        let mut ids: Vec<&String> = self.ids.iter().collect();
        ids.sort();
        let raw = serde_json::to_string(&ids)?;
        fs::write(path, raw).with_context(|| format!("writing ledger {}", path.display()))?;

        info!(path = %path.display(), count = self.ids.len(), "Ledger persisted");
        Ok(())
    }
}
