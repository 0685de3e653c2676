use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{handlers, state::ApiState};

pub fn create_router(state: ApiState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health::health_check))

        // Slack slash command
        .route("/iam", post(handlers::slash::handle_slash_command))

        // Add state
        .with_state(state)

        // Request tracing
        .layer(TraceLayer::new_for_http())
}
