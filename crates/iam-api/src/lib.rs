pub mod handlers;
pub mod routes;
pub mod state;

use anyhow::Result;
use std::sync::Arc;

use iam_core::{Settings, StatusService, SystemClock};
use iam_slack::{RequestVerifier, SlackClient};

pub use routes::create_router;
pub use state::ApiState;

/// Build the shared state from settings: store, team calendar, Slack client.
pub async fn build_state(settings: &Settings) -> Result<ApiState> {
    let store = iam_db::open_store(settings.database_url.as_deref()).await?;
    let calendar = settings.calendar(Arc::new(SystemClock))?;

    let verifier = RequestVerifier::new(
        settings.slack_signing_secret.clone(),
        settings.slack_verification_token.clone(),
        settings.slack_team_id.clone(),
    );

    if verifier.is_open() {
        tracing::warn!("No Slack signing secret, token or team id configured; accepting all requests");
    }

    Ok(ApiState {
        service: Arc::new(StatusService::new(store, calendar)),
        slack: SlackClient::new()?,
        verifier: Arc::new(verifier),
    })
}

/// Run the HTTP server until it fails.
pub async fn serve(settings: &Settings) -> Result<()> {
    let state = build_state(settings).await?;
    let app = create_router(state);

    let addr = settings.bind_address();
    tracing::info!("iam API server running on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
