use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("DATABASE_URL must be set")]
    MissingDatabaseUrl,

    #[error("Invalid row: {0}")]
    InvalidRow(String),

    #[error("SQLx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<Error> for iam_core::Error {
    fn from(err: Error) -> Self {
        iam_core::Error::Storage(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
