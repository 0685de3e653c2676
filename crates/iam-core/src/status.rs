use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Working from home
    Wfh,
    /// Out of office (PTO, travel)
    Ooo,
    /// In office
    Ino,
}

impl Status {
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "wfh" => Ok(Status::Wfh),
            "ooo" => Ok(Status::Ooo),
            "ino" | "in" => Ok(Status::Ino),
            other => Err(Error::UnknownStatus(other.to_string())),
        }
    }

    /// Storage code
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Wfh => "wfh",
            Status::Ooo => "ooo",
            Status::Ino => "ino",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Status::Wfh => "WFH",
            Status::Ooo => "OOO",
            Status::Ino => "INO",
        }
    }

    /// WFH and OOO show up in team reports; INO only overrides them.
    pub fn is_away(&self) -> bool {
        matches!(self, Status::Wfh | Status::Ooo)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Status {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Status::parse(s)
    }
}

/// One row per (user_id, date); a later write for the same pair replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEntry {
    pub user_id: String,
    pub user_name: String,
    pub date: NaiveDate,
    pub status: Status,
}

impl StatusEntry {
    pub fn new(
        user_id: impl Into<String>,
        user_name: impl Into<String>,
        date: NaiveDate,
        status: Status,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            user_name: user_name.into(),
            date,
            status,
        }
    }

    pub fn key(&self) -> (String, NaiveDate) {
        (self.user_id.clone(), self.date)
    }
}
