use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;

use iam_core::{Command, Status, StatusService};
use iam_slack::{messages, SlackMessage, SlashCommand};

use crate::state::ApiState;

/// `POST /iam`
pub async fn handle_slash_command(
    State(state): State<ApiState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let timestamp = header(&headers, "x-slack-request-timestamp");
    let signature = header(&headers, "x-slack-signature");

    if let Err(e) =
        state
            .verifier
            .verify_signature(timestamp, signature, &body, Utc::now().timestamp())
    {
        tracing::warn!("Rejected slash command: {}", e);
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let slash = match SlashCommand::from_form(&body) {
        Ok(slash) => slash,
        Err(e) => {
            tracing::warn!("Malformed slash command: {}", e);
            return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
        }
    };

    if let Err(e) = state.verifier.verify_payload(&slash) {
        tracing::warn!("Rejected slash command from team {}: {}", slash.team_id, e);
        return StatusCode::BAD_REQUEST.into_response();
    }

    Json(dispatch(&state, slash).await).into_response()
}

/// Route a verified invocation to its subcommand.
pub async fn dispatch(state: &ApiState, slash: SlashCommand) -> SlackMessage {
    let command = Command::parse(&slash.text);

    tracing::info!(
        "/iam {} from {} ({})",
        command.name(),
        slash.user_name,
        slash.user_id
    );

    match command {
        Command::Set { status, options } => {
            // Confirmation goes out through response_url once written
            let state = state.clone();
            tokio::spawn(async move {
                log_status(state, slash, status, options).await;
            });

            messages::logging_ack()
        }
        Command::Today => match state.service.today_report().await {
            Ok(report) => messages::today(report),
            Err(e) => failure("today", e),
        },
        Command::Schedule => match state.service.schedule_report().await {
            Ok(report) => messages::schedule(&report),
            Err(e) => failure("schedule", e),
        },
        Command::History => match state.service.history_report(&slash.user_id).await {
            Ok(report) => messages::history(&report),
            Err(e) => failure("history", e),
        },
        Command::Version => messages::version(env!("CARGO_PKG_VERSION")),
        Command::Help => messages::help(),
        Command::Unknown(subcommand) => {
            tracing::debug!("Unknown subcommand: {}", subcommand);
            messages::unknown_subcommand()
        }
    }
}

async fn log_status(state: ApiState, slash: SlashCommand, status: Status, options: String) {
    let message = set_status_message(&state.service, &slash, status, &options).await;

    if let Err(e) = state.slack.respond(&slash.response_url, &message).await {
        tracing::error!("Failed to respond to Slack: {}", e);
    }
}

/// Apply a status update and build the follow-up message.
pub async fn set_status_message(
    service: &StatusService,
    slash: &SlashCommand,
    status: Status,
    options: &str,
) -> SlackMessage {
    match service
        .set_status(&slash.user_id, &slash.user_name, status, options)
        .await
    {
        Ok(outcome) => messages::status_set(outcome.message),
        Err(e) => failure("set status", e),
    }
}

fn failure(operation: &str, err: iam_core::Error) -> SlackMessage {
    tracing::error!("Failed to {}: {}", operation, err);
    messages::error(err)
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}
