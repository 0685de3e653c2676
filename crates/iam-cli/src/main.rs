use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;

use cli::Cli;
use iam_core::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "iam=info,iam_api=info,iam_worker=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenv::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();

    let mut settings = Settings::from_env()?;
    if cli.database_url.is_some() {
        settings.database_url = cli.database_url.clone();
    }
    if let Some(timezone) = cli.timezone.clone() {
        settings.timezone = timezone;
    }
    tracing::debug!("Loaded settings: {:?}", settings);

    commands::execute(cli.command, settings).await
}
