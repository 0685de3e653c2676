//! Runtime settings, read from `IAM_*` environment variables.
//!
//! | variable                       | default        |
//! |--------------------------------|----------------|
//! | `IAM_HOST`                     | `0.0.0.0`      |
//! | `IAM_PORT`                     | `3000`         |
//! | `DATABASE_URL`                 | unset (`serve` only: in-memory store) |
//! | `IAM_TIMEZONE`                 | `US/Eastern`   |
//! | `IAM_SLACK_SIGNING_SECRET`     | unset          |
//! | `IAM_SLACK_VERIFICATION_TOKEN` | unset          |
//! | `IAM_SLACK_TEAM_ID`            | unset          |
//! | `IAM_SLACK_WEBHOOK_URL`        | unset          |
//! | `IAM_DIGEST_START`             | `08:50`        |
//! | `IAM_DIGEST_END`               | `09:10`        |

use chrono::NaiveTime;
use config::{Config, Environment};
use serde::Deserialize;
use std::sync::Arc;

use crate::{calendar::DEFAULT_TIMEZONE, Clock, Error, Result, TeamCalendar};

#[derive(Clone, Deserialize)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub database_url: Option<String>,
    pub timezone: String,
    pub slack_signing_secret: Option<String>,
    pub slack_verification_token: Option<String>,
    pub slack_team_id: Option<String>,
    pub slack_webhook_url: Option<String>,
    pub digest_start: String,
    pub digest_end: String,
}

impl Settings {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::load(Environment::with_prefix("IAM"), std::env::var("DATABASE_URL").ok())
    }

    fn load(env: Environment, database_url: Option<String>) -> Result<Self> {
        let settings: Settings = Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 3000)?
            .set_default("timezone", DEFAULT_TIMEZONE)?
            .set_default("digest_start", "08:50")?
            .set_default("digest_end", "09:10")?
            .add_source(env)
            .set_override_option("database_url", database_url)?
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        self.digest_window()?;
        self.timezone.parse::<chrono_tz::Tz>().map_err(|_| {
            Error::Config(format!("Unknown time zone: {}", self.timezone))
        })?;
        Ok(())
    }

    pub fn calendar(&self, clock: Arc<dyn Clock>) -> Result<TeamCalendar> {
        TeamCalendar::from_zone_name(&self.timezone, clock)
    }

    /// Local start and end of the daily digest window.
    pub fn digest_window(&self) -> Result<(NaiveTime, NaiveTime)> {
        let start = parse_clock_time(&self.digest_start)?;
        let end = parse_clock_time(&self.digest_end)?;

        if start > end {
            return Err(Error::Config(format!(
                "Digest window starts after it ends: {} > {}",
                self.digest_start, self.digest_end
            )));
        }

        Ok((start, end))
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_clock_time(value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map_err(|e| Error::Config(format!("Invalid time {:?}: {}", value, e)))
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn redacted(value: &Option<String>) -> &'static str {
            if value.is_some() {
                "[REDACTED]"
            } else {
                "None"
            }
        }

        f.debug_struct("Settings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database_url", &redacted(&self.database_url))
            .field("timezone", &self.timezone)
            .field("slack_signing_secret", &redacted(&self.slack_signing_secret))
            .field(
                "slack_verification_token",
                &redacted(&self.slack_verification_token),
            )
            .field("slack_team_id", &self.slack_team_id)
            .field("slack_webhook_url", &redacted(&self.slack_webhook_url))
            .field("digest_start", &self.digest_start)
            .field("digest_end", &self.digest_end)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let source: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix("IAM").source(Some(source))
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::load(env(&[]), None).unwrap();

        assert_eq!(settings.port, 3000);
        assert_eq!(settings.timezone, "US/Eastern");
        assert!(settings.database_url.is_none());
        assert_eq!(
            settings.digest_window().unwrap(),
            (
                NaiveTime::from_hms_opt(8, 50, 0).unwrap(),
                NaiveTime::from_hms_opt(9, 10, 0).unwrap()
            )
        );
    }

    #[test]
    fn test_environment_overrides() {
        let settings = Settings::load(
            env(&[
                ("IAM_PORT", "8080"),
                ("IAM_TIMEZONE", "Europe/Berlin"),
                ("IAM_SLACK_TEAM_ID", "T123"),
            ]),
            Some("postgres://localhost/iam".to_string()),
        )
        .unwrap();

        assert_eq!(settings.port, 8080);
        assert_eq!(settings.timezone, "Europe/Berlin");
        assert_eq!(settings.slack_team_id.as_deref(), Some("T123"));
        assert_eq!(
            settings.database_url.as_deref(),
            Some("postgres://localhost/iam")
        );
    }

    #[test]
    fn test_numeric_looking_secrets_kept_verbatim() {
        let settings = Settings::load(
            env(&[
                ("IAM_SLACK_SIGNING_SECRET", "0012e45"),
                ("IAM_SLACK_VERIFICATION_TOKEN", "007"),
                ("IAM_SLACK_TEAM_ID", "1.50"),
            ]),
            None,
        )
        .unwrap();

        assert_eq!(settings.slack_signing_secret.as_deref(), Some("0012e45"));
        assert_eq!(settings.slack_verification_token.as_deref(), Some("007"));
        assert_eq!(settings.slack_team_id.as_deref(), Some("1.50"));
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(Settings::load(env(&[("IAM_TIMEZONE", "Nowhere/Land")]), None).is_err());
        assert!(Settings::load(env(&[("IAM_DIGEST_START", "9am")]), None).is_err());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let settings = Settings::load(
            env(&[("IAM_SLACK_SIGNING_SECRET", "s3cr3t")]),
            None,
        )
        .unwrap();

        let debug = format!("{:?}", settings);
        assert!(!debug.contains("s3cr3t"));
        assert!(debug.contains("[REDACTED]"));
    }
}
