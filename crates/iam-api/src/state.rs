use std::sync::Arc;

#[derive(Clone)]
pub struct ApiState {
    pub service: Arc<iam_core::StatusService>,
    pub slack: iam_slack::SlackClient,
    pub verifier: Arc<iam_slack::RequestVerifier>,
}
