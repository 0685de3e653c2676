use chrono::{DateTime, NaiveDate, Utc};
use iam_core::{Status, StatusEntry};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::Error;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StatusRecord {
    pub user_id: String,
    pub user_name: String,
    pub entry_date: NaiveDate,
    pub status: String,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<StatusRecord> for StatusEntry {
    type Error = Error;

    fn try_from(record: StatusRecord) -> Result<Self, Self::Error> {
        let status = Status::parse(&record.status).map_err(|_| {
            Error::InvalidRow(format!(
                "unknown status {:?} for {} on {}",
                record.status, record.user_id, record.entry_date
            ))
        })?;

        Ok(StatusEntry::new(
            record.user_id,
            record.user_name,
            record.entry_date,
            status,
        ))
    }
}
