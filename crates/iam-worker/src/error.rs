use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No Slack webhook URL configured")]
    MissingWebhook,

    #[error(transparent)]
    Status(#[from] iam_core::Error),

    #[error(transparent)]
    Slack(#[from] iam_slack::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
