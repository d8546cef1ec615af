//! Moderation-queue views over raw sheet rows.

use std::collections::HashSet;

use anyhow::Result;
use async_trait::async_trait;

use gviz_client::{GvizClient, SheetRow};
use newshub_common::ApprovedPost;

use crate::traits::ModerationQueue;

const ID_COLUMN: &str = "tweet_id";
const URL_COLUMN: &str = "tweet_url";
const STATUS_COLUMN: &str = "status";
const STATUS_APPROVED: &str = "approved";

pub struct GvizQueue {
    client: GvizClient,
}

impl GvizQueue {
    pub fn new(sheet_id: &str) -> Self {
        Self {
            client: GvizClient::new(sheet_id),
        }
    }
}

#[async_trait]
impl ModerationQueue for GvizQueue {
    async fn rows(&self) -> Result<Vec<SheetRow>> {
        Ok(self.client.rows().await?)
    }
}

/// Rows a moderator marked approved, in sheet order. Rows without an id
/// are skipped — there is nothing to act on or ledger.
pub fn approved_posts(rows: &[SheetRow]) -> Vec<ApprovedPost> {
    rows.iter()
        .filter(|row| row.get(STATUS_COLUMN).map(String::as_str) == Some(STATUS_APPROVED))
        .filter_map(|row| {
            let tweet_id = row.get(ID_COLUMN)?.clone();
            if tweet_id.is_empty() {
                return None;
            }
            Some(ApprovedPost {
                tweet_id,
                tweet_url: row.get(URL_COLUMN).cloned().unwrap_or_default(),
            })
        })
        .collect()
}

/// Every id the sheet already knows, regardless of status. This is the set
/// that gates forwarding: a query rediscovering a trending post must not
/// re-report it.
pub fn known_ids(rows: &[SheetRow]) -> HashSet<String> {
    rows.iter()
        .filter_map(|row| row.get(ID_COLUMN))
        .filter(|id| !id.is_empty())
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::row;

    #[test]
    fn only_approved_rows_with_ids_are_actionable() {
        let rows = vec![
            row(&[("tweet_id", "111"), ("tweet_url", "u1"), ("status", "approved")]),
            row(&[("tweet_id", "222"), ("tweet_url", "u2"), ("status", "pending")]),
            row(&[("tweet_id", ""), ("tweet_url", "u3"), ("status", "approved")]),
            row(&[("tweet_id", "444"), ("tweet_url", "u4"), ("status", "rejected")]),
        ];

        let approved = approved_posts(&rows);
        assert_eq!(approved.len(), 1);
        assert_eq!(approved[0].tweet_id, "111");
        assert_eq!(approved[0].tweet_url, "u1");
    }

    #[test]
    fn known_ids_span_every_status() {
        let rows = vec![
            row(&[("tweet_id", "111"), ("status", "approved")]),
            row(&[("tweet_id", "222"), ("status", "pending")]),
            row(&[("tweet_id", ""), ("status", "pending")]),
            row(&[("status", "pending")]),
        ];

        let ids = known_ids(&rows);
        assert_eq!(ids.len(), 2);
        assert!(ids.contains("111"));
        assert!(ids.contains("222"));
    }
}
