use std::env;
use std::path::PathBuf;

use tracing::info;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Moderation sheet
    pub sheet_id: String,

    // Moderation agent webhook
    pub webhook_url: String,

    // Page driver daemon
    pub pagedriver_url: String,
    pub pagedriver_token: Option<String>,

    // x.com session cookies
    pub auth_token: String,
    pub ct0: String,
    pub kdt: String,
    pub twid: String,

    // Discovery
    pub search_queries: Vec<String>,
    pub scroll_count: u32,
    pub nav_settle_ms: u64,
    pub scroll_settle_ms: u64,

    // Local state
    pub ledger_path: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    /// Panics with a clear message if required vars are missing.
    pub fn from_env() -> Self {
        let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
        let default_ledger = PathBuf::from(home)
            .join("newshub")
            .join("processed_tweets.json");

        Self {
            sheet_id: required_env("SHEET_ID"),
            webhook_url: required_env("WEBHOOK_URL"),
            pagedriver_url: required_env("PAGEDRIVER_URL"),
            pagedriver_token: env::var("PAGEDRIVER_TOKEN").ok(),
            auth_token: required_env("X_AUTH_TOKEN"),
            ct0: required_env("X_CT0"),
            kdt: env::var("X_KDT").unwrap_or_default(),
            twid: env::var("X_TWID").unwrap_or_default(),
            search_queries: env::var("SEARCH_QUERIES")
                .map(|s| parse_queries(&s))
                .unwrap_or_else(|_| {
                    vec![
                        "svg".to_string(),
                        "vector graphics".to_string(),
                        "vector animation".to_string(),
                    ]
                }),
            scroll_count: env::var("SCROLL_COUNT")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .expect("SCROLL_COUNT must be a number"),
            nav_settle_ms: env::var("NAV_SETTLE_MS")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("NAV_SETTLE_MS must be a number"),
            scroll_settle_ms: env::var("SCROLL_SETTLE_MS")
                .unwrap_or_else(|_| "1500".to_string())
                .parse()
                .expect("SCROLL_SETTLE_MS must be a number"),
            ledger_path: env::var("LEDGER_PATH")
                .map(PathBuf::from)
                .unwrap_or(default_ledger),
        }
    }

    /// Log the effective configuration without leaking credentials.
    pub fn log_redacted(&self) {
        info!(
            sheet_id = self.sheet_id.as_str(),
            pagedriver_url = self.pagedriver_url.as_str(),
            queries = ?self.search_queries,
            scroll_count = self.scroll_count,
            ledger_path = %self.ledger_path.display(),
            "Config loaded"
        );
    }
}

fn required_env(key: &str) -> String {
    env::var(key).unwrap_or_else(|_| panic!("{key} environment variable is required"))
}

fn parse_queries(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|q| q.trim().to_string())
        .filter(|q| !q.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::parse_queries;

    #[test]
    fn queries_split_and_trimmed() {
        assert_eq!(
            parse_queries("svg, vector graphics ,vector animation"),
            vec!["svg", "vector graphics", "vector animation"]
        );
    }

    #[test]
    fn empty_segments_dropped() {
        assert_eq!(parse_queries("svg,,"), vec!["svg"]);
    }
}
