//! Fire-and-forget notifications to the moderation agent's webhook.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tracing::{info, warn};

use newshub_common::{PostRecord, PostStatus};

use crate::traits::AgentNotifier;

pub struct WebhookNotifier {
    client: reqwest::Client,
    url: String,
}

impl WebhookNotifier {
    pub fn new(url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            url: url.to_string(),
        }
    }

    async fn post(&self, body: &serde_json::Value) -> Result<(), reqwest::Error> {
        self.client
            .post(&self.url)
            .json(body)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[async_trait]
impl AgentNotifier for WebhookNotifier {
    async fn add_posts(&self, posts: &[PostRecord]) {
        if posts.is_empty() {
            return;
        }

        let body = json!({ "action": "add_tweets", "tweets": posts });
        match self.post(&body).await {
            Ok(()) => info!(count = posts.len(), "Sent posts to agent"),
            Err(e) => warn!(count = posts.len(), error = %e, "Webhook add_tweets failed"),
        }
    }

    async fn update_status(&self, tweet_id: &str, status: PostStatus) {
        let body = json!({
            "action": "update_status",
            "tweet_id": tweet_id,
            "status": status,
        });
        if let Err(e) = self.post(&body).await {
            warn!(tweet_id, %status, error = %e, "Webhook update_status failed");
        }
    }
}
