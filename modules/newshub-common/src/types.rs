use serde::{Deserialize, Serialize};

/// Maximum stored length of a post's text, in characters.
pub const MAX_TEXT_CHARS: usize = 500;

// --- Enums ---

/// Moderation status of a discovered post. The authoritative value lives in
/// the moderation sheet; locally-created records always start `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    Pending,
    Approved,
    Rejected,
    Retweeted,
}

impl std::fmt::Display for PostStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PostStatus::Pending => write!(f, "pending"),
            PostStatus::Approved => write!(f, "approved"),
            PostStatus::Rejected => write!(f, "rejected"),
            PostStatus::Retweeted => write!(f, "retweeted"),
        }
    }
}

// --- Core records ---

/// One discovered post, as forwarded to the moderation agent.
///
/// `tweet_id` is the sole identity key: two records with the same id are the
/// same post regardless of any other field difference (the feed re-renders
/// the same post across scrolls, and trending posts surface under several
/// search queries).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    pub tweet_id: String,
    pub tweet_url: String,
    /// Empty when the author link could not be resolved.
    pub author_username: String,
    /// Truncated to [`MAX_TEXT_CHARS`] characters.
    pub text: String,
    /// ISO-8601, or empty when the item carried no timestamp.
    pub timestamp: String,
    pub search_query: String,
    /// ISO-8601 capture time.
    pub submitted_at: String,
    pub status: PostStatus,
}

/// A sheet row approved for retweeting. Consumed within one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovedPost {
    pub tweet_id: String,
    pub tweet_url: String,
}

/// Raw per-item snapshot handed over by the page driver.
///
/// Every field is best-effort: a rendered feed item may be a promoted
/// placement, a partially-hydrated card, or otherwise missing any of these.
/// Absence is data, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedItemSnapshot {
    /// href of the first anchor containing a `/status/` path segment.
    pub status_href: Option<String>,
    /// href of the author link inside the user-name block.
    pub author_href: Option<String>,
    /// Inner text of the post body node.
    pub text: Option<String>,
    /// `datetime` attribute of the item's `<time>` element.
    pub timestamp: Option<String>,
}
