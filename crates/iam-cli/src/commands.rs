use anyhow::{Context, Result};
use std::sync::Arc;

use crate::cli::Commands;
use iam_core::{Settings, Status, StatusService, SystemClock};
use iam_db::Database;
use iam_slack::SlackClient;
use iam_worker::{DailyDigest, DigestWindow};

pub async fn execute(command: Commands, mut settings: Settings) -> Result<()> {
    match command {
        Commands::Serve { port } => {
            if let Some(port) = port {
                settings.port = port;
            }
            iam_api::serve(&settings).await?;
        }

        Commands::InitDb => {
            let url = settings
                .database_url
                .as_deref()
                .context("DATABASE_URL must be set to initialize the database")?;

            println!("Initializing database...");
            let database = Database::new(url).await?;
            database.init_schema().await?;
            println!("✓ Database initialized");
        }

        Commands::DailyUpdate { force } => {
            let (start, end) = settings.digest_window()?;
            let digest = DailyDigest::new(
                Arc::new(service(&settings).await?),
                SlackClient::new()?,
                settings.slack_webhook_url.clone(),
                DigestWindow::new(start, end),
            )?;

            if force {
                digest.send_now().await?;
                println!("✓ Digest posted");
            } else if digest.tick().await? {
                println!("✓ Digest posted");
            } else {
                println!("Outside the digest window ({} - {}), nothing posted", start, end);
            }
        }

        Commands::Set {
            user_id,
            user_name,
            status,
            when,
        } => {
            let status = Status::parse(&status)?;
            let service = service(&settings).await?;

            let outcome = service
                .set_status(&user_id, &user_name, status, &when.join(" "))
                .await?;

            println!("✓ {}", outcome.message);
            for date in &outcome.dates {
                println!("  {} - {}", date, outcome.status);
            }
        }

        Commands::Today => {
            let service = service(&settings).await?;
            println!("Today's WFH/OOO statuses ({}):", service.today());
            println!("{}", service.today_report().await?);
        }

        Commands::Schedule => {
            let service = service(&settings).await?;
            let report = service.schedule_report().await?;

            println!("Upcoming WFH/OOO statuses:");
            if report.is_empty() {
                println!("  (none)");
            } else {
                println!("{}", report);
            }
        }

        Commands::History { user_id } => {
            let service = service(&settings).await?;
            let report = service.history_report(&user_id).await?;

            println!("WFH/OOO statuses for {} from the past month:", user_id);
            if report.is_empty() {
                println!("  (none)");
            } else {
                println!("{}", report);
            }
        }
    }

    Ok(())
}

/// Commands outside `serve` run in a short-lived process, so they always need
/// the database.
async fn service(settings: &Settings) -> Result<StatusService> {
    let store = iam_db::connect_store(settings.database_url.as_deref())
        .await
        .context("This command needs DATABASE_URL (or --database-url)")?;
    let calendar = settings.calendar(Arc::new(SystemClock))?;

    Ok(StatusService::new(store, calendar))
}
