//! The two-click retweet sequence for one approved post.

use std::time::Duration;

use anyhow::Result;
use tracing::warn;

use crate::traits::PageSession;

const RETWEET_BUTTON: &str = r#"button[data-testid="retweet"]"#;
const RETWEET_CONFIRM: &str = r#"div[data-testid="retweetConfirm"]"#;

const NAV_SETTLE: Duration = Duration::from_millis(2500);
const MENU_SETTLE: Duration = Duration::from_millis(800);
const CONFIRM_SETTLE: Duration = Duration::from_millis(1500);

/// Terminal state of one retweet attempt. Everything short of `Completed`
/// leaves the post un-ledgered, so a later run tries again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetweetOutcome {
    Completed,
    /// The retweet control never appeared (deleted post, protected
    /// account, interstitial).
    NoButton,
    /// The menu opened but the confirm control never appeared. The first
    /// click may still have applied server-side; see the warn this emits.
    NoConfirm,
    /// Transport-level fault anywhere in the sequence.
    Fault(String),
}

impl std::fmt::Display for RetweetOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RetweetOutcome::Completed => write!(f, "completed"),
            RetweetOutcome::NoButton => write!(f, "no retweet button"),
            RetweetOutcome::NoConfirm => write!(f, "no confirm button"),
            RetweetOutcome::Fault(msg) => write!(f, "fault: {msg}"),
        }
    }
}

#[derive(Default)]
pub struct Retweeter;

impl Retweeter {
    pub fn new() -> Self {
        Self
    }

    /// Run the navigate → retweet → confirm sequence against one post URL.
    ///
    /// Never returns an error: any fault is folded into the outcome so one
    /// bad post can't abort the rest of the approved queue.
    pub async fn retweet(&self, session: &dyn PageSession, url: &str) -> RetweetOutcome {
        match self.attempt(session, url).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(url, error = %e, "Retweet attempt faulted");
                RetweetOutcome::Fault(e.to_string())
            }
        }
    }

    async fn attempt(&self, session: &dyn PageSession, url: &str) -> Result<RetweetOutcome> {
        session.goto(url).await?;
        session.settle(NAV_SETTLE).await;

        if !session.click(RETWEET_BUTTON).await? {
            return Ok(RetweetOutcome::NoButton);
        }
        session.settle(MENU_SETTLE).await;

        if !session.click(RETWEET_CONFIRM).await? {
            // Known ambiguity: the first click may have gone through even
            // though the confirmation UI was never observed. We treat the
            // attempt as unconfirmed and leave it eligible for retry.
            warn!(
                url,
                "Retweet menu opened but confirm control missing; \
                 retweet may have applied without visible confirmation"
            );
            return Ok(RetweetOutcome::NoConfirm);
        }
        session.settle(CONFIRM_SETTLE).await;

        Ok(RetweetOutcome::Completed)
    }
}
