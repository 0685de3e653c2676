use chrono::{Months, NaiveDate};
use std::sync::Arc;

use crate::{
    calendar::TeamCalendar,
    dates::{parse_date_options, DateSelection},
    report, Error, Result, Status, StatusEntry, StatusStore,
};

/// How far ahead `schedule` looks and how far back `history` goes.
const REPORT_WINDOW: Months = Months::new(1);

/// Result of a status update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetOutcome {
    pub status: Status,
    pub selection: DateSelection,
    pub dates: Vec<NaiveDate>,
    pub message: String,
}

/// The `/iam` operations over a [`StatusStore`].
#[derive(Clone)]
pub struct StatusService {
    store: Arc<dyn StatusStore>,
    calendar: TeamCalendar,
}

impl StatusService {
    pub fn new(store: Arc<dyn StatusStore>, calendar: TeamCalendar) -> Self {
        Self { store, calendar }
    }

    pub fn calendar(&self) -> &TeamCalendar {
        &self.calendar
    }

    pub fn today(&self) -> NaiveDate {
        self.calendar.today()
    }

    /// Record `status` for every date named by `options` (today when empty).
    pub async fn set_status(
        &self,
        user_id: &str,
        user_name: &str,
        status: Status,
        options: &str,
    ) -> Result<SetOutcome> {
        let today = self.today();
        let selection = parse_date_options(options, today)?;
        let dates = selection.dates();

        for date in &dates {
            self.store
                .upsert(&StatusEntry::new(user_id, user_name, *date, status))
                .await?;
        }

        tracing::info!(
            "{} ({}) set {} for {} day(s)",
            user_name,
            user_id,
            status,
            dates.len()
        );

        let message = report::confirmation(user_name, status, &selection, today);

        Ok(SetOutcome {
            status,
            selection,
            dates,
            message,
        })
    }

    /// Away entries for today.
    pub async fn todays_statuses(&self) -> Result<Vec<StatusEntry>> {
        let entries = self.store.entries_on(self.today()).await?;
        Ok(away_only(entries))
    }

    pub async fn today_report(&self) -> Result<String> {
        Ok(report::today_lines(&self.todays_statuses().await?))
    }

    /// Away entries from today through one month ahead.
    pub async fn schedule(&self) -> Result<Vec<StatusEntry>> {
        let start = self.today();
        let end = start
            .checked_add_months(REPORT_WINDOW)
            .ok_or_else(|| Error::InvalidDate(format!("No date one month after {}", start)))?;

        let entries = self.store.entries_between(start, end).await?;
        Ok(away_only(entries))
    }

    pub async fn schedule_report(&self) -> Result<String> {
        Ok(report::schedule_lines(&self.schedule().await?))
    }

    /// The user's away entries from one month ago through today.
    pub async fn history(&self, user_id: &str) -> Result<Vec<StatusEntry>> {
        let end = self.today();
        let start = end
            .checked_sub_months(REPORT_WINDOW)
            .ok_or_else(|| Error::InvalidDate(format!("No date one month before {}", end)))?;

        let entries = self.store.user_entries_between(user_id, start, end).await?;
        Ok(away_only(entries))
    }

    pub async fn history_report(&self, user_id: &str) -> Result<String> {
        Ok(report::history_lines(&self.history(user_id).await?))
    }
}

fn away_only(entries: Vec<StatusEntry>) -> Vec<StatusEntry> {
    entries.into_iter().filter(|e| e.status.is_away()).collect()
}
