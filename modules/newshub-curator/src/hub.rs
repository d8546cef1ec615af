//! Run orchestrator: ledger → queue → retweets → discovery → reconcile →
//! forward → persist.
//!
//! Every stage degrades rather than aborts: an unreachable sheet means an
//! empty approved list and an empty known-id set, a dead query contributes
//! an empty batch, a failed retweet stays un-ledgered for the next run.
//! Nothing here prevents two overlapping runs (e.g. overlapping cron
//! schedules) from double-acting before the ledger lands on disk; that gap
//! is accepted, not guarded.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::{info, warn};
use uuid::Uuid;

use newshub_common::{ApprovedPost, Config, PostRecord, PostStatus};

use crate::collector::ScrollCollector;
use crate::ledger::ProcessedLedger;
use crate::reconciler::reconcile;
use crate::retweeter::{RetweetOutcome, Retweeter};
use crate::sheet;
use crate::stats::RunStats;
use crate::traits::{AgentNotifier, ModerationQueue, PageSession};

/// Pause between consecutive retweet attempts.
const ITEM_PAUSE: Duration = Duration::from_millis(3000);
/// Pause between consecutive search queries.
const QUERY_PAUSE: Duration = Duration::from_millis(2000);

pub struct Hub {
    session: Arc<dyn PageSession>,
    queue: Arc<dyn ModerationQueue>,
    notifier: Arc<dyn AgentNotifier>,
    collector: ScrollCollector,
    retweeter: Retweeter,
    queries: Vec<String>,
    ledger_path: PathBuf,
    dry_run: bool,
}

impl Hub {
    pub fn new(
        session: Arc<dyn PageSession>,
        queue: Arc<dyn ModerationQueue>,
        notifier: Arc<dyn AgentNotifier>,
        config: &Config,
        dry_run: bool,
    ) -> Self {
        Self {
            session,
            queue,
            notifier,
            collector: ScrollCollector::new(config),
            retweeter: Retweeter::new(),
            queries: config.search_queries.clone(),
            ledger_path: config.ledger_path.clone(),
            dry_run,
        }
    }

    pub async fn run(&self) -> Result<RunStats> {
        let run_id = Uuid::new_v4();
        info!(%run_id, dry_run = self.dry_run, "Curator run starting");

        let mut stats = RunStats::default();
        let mut ledger = ProcessedLedger::load(&self.ledger_path)?;

        let rows = match self.queue.rows().await {
            Ok(rows) => rows,
            Err(e) => {
                warn!(error = %e, "Sheet fetch failed, continuing with empty queue");
                Vec::new()
            }
        };
        let approved = sheet::approved_posts(&rows);
        let known_ids = sheet::known_ids(&rows);
        info!(
            known = known_ids.len(),
            approved = approved.len(),
            ledgered = ledger.len(),
            "Queue state"
        );

        self.retweet_approved(&approved, &mut ledger, &mut stats).await;

        let batches = self.discover(&mut stats).await;
        let reconciled = reconcile(batches, &known_ids);
        stats.dropped_known = reconciled.dropped_known;
        stats.dropped_duplicate = reconciled.dropped_duplicate;
        stats.posts_forwarded = reconciled.records.len() as u32;
        info!(count = reconciled.records.len(), "New unique posts");

        if !reconciled.records.is_empty() {
            if self.dry_run {
                info!(count = reconciled.records.len(), "Dry run: not forwarding posts");
            } else {
                self.notifier.add_posts(&reconciled.records).await;
            }
        }

        if self.dry_run {
            info!("Dry run: ledger left untouched");
        } else {
            ledger.persist(&self.ledger_path)?;
        }

        info!(%run_id, "Curator run complete");
        Ok(stats)
    }

    /// Retweet every approved post not already in the ledger. The ledger
    /// gate is absolute: whatever the sheet says, an id we've acted on is
    /// never acted on again.
    async fn retweet_approved(
        &self,
        approved: &[ApprovedPost],
        ledger: &mut ProcessedLedger,
        stats: &mut RunStats,
    ) {
        stats.approved_in_sheet = approved.len() as u32;

        for post in approved {
            if ledger.contains(&post.tweet_id) {
                stats.already_processed += 1;
                continue;
            }
            if self.dry_run {
                info!(tweet_id = post.tweet_id.as_str(), "Dry run: would retweet");
                continue;
            }

            info!(
                tweet_id = post.tweet_id.as_str(),
                url = post.tweet_url.as_str(),
                "Retweeting"
            );
            match self.retweeter.retweet(self.session.as_ref(), &post.tweet_url).await {
                RetweetOutcome::Completed => {
                    ledger.insert(&post.tweet_id);
                    self.notifier
                        .update_status(&post.tweet_id, PostStatus::Retweeted)
                        .await;
                    stats.retweeted += 1;
                    info!(tweet_id = post.tweet_id.as_str(), "Retweeted");
                }
                outcome => {
                    stats.retweet_failed += 1;
                    warn!(
                        tweet_id = post.tweet_id.as_str(),
                        %outcome,
                        "Retweet failed, will retry next run"
                    );
                }
            }
            self.session.settle(ITEM_PAUSE).await;
        }
    }

    /// One scroll-and-collect pass per configured query. A query whose
    /// navigation fails contributes an empty batch and the run moves on.
    async fn discover(&self, stats: &mut RunStats) -> Vec<Vec<PostRecord>> {
        let mut batches = Vec::with_capacity(self.queries.len());

        for query in &self.queries {
            info!(query = query.as_str(), "Searching");
            let batch = match self.collector.collect(self.session.as_ref(), query).await {
                Ok(batch) => batch,
                Err(e) => {
                    warn!(query = query.as_str(), error = %e, "Search failed, skipping query");
                    stats.queries_failed += 1;
                    Vec::new()
                }
            };
            stats.posts_discovered += batch.len() as u32;
            batches.push(batch);
            self.session.settle(QUERY_PAUSE).await;
        }

        batches
    }
}
