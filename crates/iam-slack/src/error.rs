use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Slack API error: {0}")]
    Api(String),

    #[error("Invalid Slack signature: {0}")]
    InvalidSignature(String),

    #[error("Request rejected: {0}")]
    Rejected(String),

    #[error("Invalid slash command payload: {0}")]
    InvalidPayload(String),

    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
