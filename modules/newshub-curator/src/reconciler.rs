//! Cross-query reconciliation of discovery batches.
//!
//! Three identity sets exist in this system and they gate different things:
//! the page-local seen set (inside the collector) dedups a single scroll
//! pass; the externally-known set (every id already in the sheet) gates
//! *forwarding*; the processed ledger gates *acting* and is deliberately
//! not consulted here — an already-retweeted post that trends again may be
//! re-reported, it just won't be re-retweeted.

use std::collections::HashSet;

use newshub_common::PostRecord;

#[derive(Debug, Default)]
pub struct Reconciled {
    /// Genuinely-new records, in first-discovered order.
    pub records: Vec<PostRecord>,
    /// Dropped because the sheet already knows the id.
    pub dropped_known: u32,
    /// Dropped as a later cross-query duplicate.
    pub dropped_duplicate: u32,
}

/// Merge per-query batches (in query order) into the minimal set of new
/// records: drop ids the sheet already has, then keep only the first
/// occurrence of each remaining id. No ranking — first seen wins.
pub fn reconcile(batches: Vec<Vec<PostRecord>>, known_ids: &HashSet<String>) -> Reconciled {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Reconciled::default();

    for record in batches.into_iter().flatten() {
        if known_ids.contains(&record.tweet_id) {
            out.dropped_known += 1;
            continue;
        }
        if seen.insert(record.tweet_id.clone()) {
            out.records.push(record);
        } else {
            out.dropped_duplicate += 1;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use newshub_common::{PostRecord, PostStatus};

    fn record(id: &str, query: &str) -> PostRecord {
        PostRecord {
            tweet_id: id.to_string(),
            tweet_url: format!("https://x.com/u/status/{id}"),
            author_username: String::new(),
            text: String::new(),
            timestamp: String::new(),
            search_query: query.to_string(),
            submitted_at: String::new(),
            status: PostStatus::Pending,
        }
    }

    #[test]
    fn cross_query_duplicate_kept_once_first_query_wins() {
        let batches = vec![
            vec![record("7", "svg")],
            vec![record("7", "vector graphics"), record("8", "vector graphics")],
        ];
        let out = reconcile(batches, &HashSet::new());

        assert_eq!(out.records.len(), 2);
        assert_eq!(out.records[0].tweet_id, "7");
        assert_eq!(out.records[0].search_query, "svg");
        assert_eq!(out.dropped_duplicate, 1);
    }

    #[test]
    fn known_ids_never_forwarded() {
        let known: HashSet<String> = ["6".to_string()].into();
        let batches = vec![vec![record("5", "svg"), record("6", "svg")]];
        let out = reconcile(batches, &known);

        let ids: Vec<&str> = out.records.iter().map(|r| r.tweet_id.as_str()).collect();
        assert_eq!(ids, vec!["5"]);
        assert_eq!(out.dropped_known, 1);
    }

    #[test]
    fn known_id_dropped_every_time_it_is_rediscovered() {
        let known: HashSet<String> = ["6".to_string()].into();
        let batches = vec![
            vec![record("6", "svg")],
            vec![record("6", "vector graphics")],
            vec![record("6", "vector animation")],
        ];
        let out = reconcile(batches, &known);

        assert!(out.records.is_empty());
        assert_eq!(out.dropped_known, 3);
    }

    #[test]
    fn query_order_preserved() {
        let batches = vec![
            vec![record("2", "svg"), record("1", "svg")],
            vec![record("3", "vector graphics")],
        ];
        let out = reconcile(batches, &HashSet::new());
        let ids: Vec<&str> = out.records.iter().map(|r| r.tweet_id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1", "3"]);
    }

    #[test]
    fn empty_batches_reconcile_to_nothing() {
        let out = reconcile(vec![vec![], vec![]], &HashSet::new());
        assert!(out.records.is_empty());
    }
}
