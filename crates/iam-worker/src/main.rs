use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use iam_core::{Settings, StatusService, SystemClock};
use iam_slack::SlackClient;
use iam_worker::{DailyDigest, DigestWindow};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "iam_worker=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenv::dotenv().ok();

    tracing::info!("Starting iam digest worker");

    let settings = Settings::from_env()?;
    let store = iam_db::connect_store(settings.database_url.as_deref()).await?;
    let calendar = settings.calendar(Arc::new(SystemClock))?;
    let (start, end) = settings.digest_window()?;

    let digest = DailyDigest::new(
        Arc::new(StatusService::new(store, calendar)),
        SlackClient::new()?,
        settings.slack_webhook_url.clone(),
        DigestWindow::new(start, end),
    )?;

    // Start worker loop
    let mut ticker = interval(Duration::from_secs(60));

    loop {
        ticker.tick().await;

        match digest.tick().await {
            Ok(true) => tracing::info!("Digest sent"),
            Ok(false) => tracing::trace!("Outside digest window or already sent"),
            Err(e) => tracing::error!("Failed to send daily digest: {}", e),
        }
    }
}
