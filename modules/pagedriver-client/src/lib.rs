pub mod error;
pub mod types;

pub use error::{PageDriverError, Result};
pub use types::{Cookie, ElementData, FieldSpec, SessionSpec, Viewport};

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::json;

use types::{ClickResponse, ScrapeResponse};

/// Client for the page-driver daemon: a sidecar process holding a single
/// authenticated browser page and exposing navigation, element scraping,
/// clicking, and scrolling over HTTP. The session (and its auth cookies)
/// is a shared, serial resource; callers must not interleave requests.
pub struct PageDriverClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl PageDriverClient {
    pub fn new(base_url: &str, token: Option<&str>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.map(String::from),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        let mut endpoint = format!("{}{path}", self.base_url);
        if let Some(ref token) = self.token {
            endpoint.push_str(&format!("?token={token}"));
        }
        endpoint
    }

    async fn post<T: DeserializeOwned>(&self, path: &str, body: &serde_json::Value) -> Result<T> {
        let resp = self
            .client
            .post(self.endpoint(path))
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(PageDriverError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(resp.json().await?)
    }

    /// Replace the daemon's browser session: fresh page with the given
    /// cookies, viewport, and user agent.
    pub async fn create_session(&self, spec: &SessionSpec) -> Result<()> {
        let body = serde_json::to_value(spec).expect("SessionSpec serializes");
        let _: serde_json::Value = self.post("/session", &body).await?;
        tracing::info!(cookies = spec.cookies.len(), "Page driver session created");
        Ok(())
    }

    /// Navigate the session page to a URL.
    pub async fn goto(&self, url: &str) -> Result<()> {
        let resp = self
            .client
            .post(self.endpoint("/goto"))
            .header("Content-Type", "application/json")
            .json(&json!({ "url": url }))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(PageDriverError::Navigation {
                url: url.to_string(),
                message,
            });
        }
        Ok(())
    }

    /// For every element currently matching `selector`, resolve each field
    /// spec against it. Missing sub-elements and attributes come back as
    /// `null`, not as errors.
    pub async fn scrape(&self, selector: &str, fields: &[FieldSpec]) -> Result<Vec<ElementData>> {
        let body = json!({ "selector": selector, "fields": fields });
        let resp: ScrapeResponse = self.post("/scrape", &body).await?;
        Ok(resp.elements)
    }

    /// Click the first element matching `selector`. Returns `false` when no
    /// such element exists.
    pub async fn click(&self, selector: &str) -> Result<bool> {
        let body = json!({ "selector": selector });
        let resp: ClickResponse = self.post("/click", &body).await?;
        Ok(resp.clicked)
    }

    /// Scroll the page down by `pixels`.
    pub async fn scroll_by(&self, pixels: u32) -> Result<()> {
        let body = json!({ "y": pixels });
        let _: serde_json::Value = self.post("/scroll", &body).await?;
        Ok(())
    }
}
