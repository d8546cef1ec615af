use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use newshub_common::Config;
use newshub_curator::hub::Hub;
use newshub_curator::sheet::GvizQueue;
use newshub_curator::traits::DriverSession;
use newshub_curator::webhook::WebhookNotifier;
use pagedriver_client::{Cookie, PageDriverClient, SessionSpec, Viewport};

const USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36";

/// Search-and-retweet curator. Runs once (cron-friendly) and exits.
#[derive(Parser)]
#[command(name = "newshub-curator")]
struct Cli {
    /// Comma-separated search queries, overriding SEARCH_QUERIES.
    #[arg(long)]
    queries: Option<String>,

    /// Scroll iterations per query, overriding SCROLL_COUNT.
    #[arg(long)]
    scroll_count: Option<u32>,

    /// Discover and log only: no retweets, no webhook posts, ledger untouched.
    #[arg(long)]
    dry_run: bool,
}

fn session_spec(config: &Config) -> SessionSpec {
    let mut cookies = vec![
        Cookie::new("auth_token", &config.auth_token, ".x.com"),
        Cookie::new("ct0", &config.ct0, ".x.com"),
    ];
    if !config.kdt.is_empty() {
        cookies.push(Cookie::new("kdt", &config.kdt, ".x.com"));
    }
    if !config.twid.is_empty() {
        cookies.push(Cookie::new("twid", &config.twid, ".x.com"));
    }

    SessionSpec {
        cookies,
        viewport: Viewport {
            width: 1280,
            height: 800,
        },
        user_agent: USER_AGENT.to_string(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("newshub_curator=info".parse()?)
                .add_directive("newshub_common=info".parse()?),
        )
        .init();

    info!("NewsHub Curator starting...");

    let cli = Cli::parse();
    let mut config = Config::from_env();
    if let Some(raw) = cli.queries {
        config.search_queries = raw
            .split(',')
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty())
            .collect();
    }
    if let Some(count) = cli.scroll_count {
        config.scroll_count = count;
    }
    config.log_redacted();

    let driver = PageDriverClient::new(&config.pagedriver_url, config.pagedriver_token.as_deref());
    driver.create_session(&session_spec(&config)).await?;

    let session = Arc::new(DriverSession::new(driver));
    let queue = Arc::new(GvizQueue::new(&config.sheet_id));
    let notifier = Arc::new(WebhookNotifier::new(&config.webhook_url));

    let hub = Hub::new(session, queue, notifier, &config, cli.dry_run);
    let stats = hub.run().await?;
    info!("{stats}");

    Ok(())
}
