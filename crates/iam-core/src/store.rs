use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{Result, StatusEntry};

/// Persistence for status entries keyed by (user_id, date).
///
/// Date bounds are inclusive on both ends.
#[async_trait]
pub trait StatusStore: Send + Sync {
    /// Insert the entry, replacing any existing row for the same user and date.
    async fn upsert(&self, entry: &StatusEntry) -> Result<()>;

    async fn entries_on(&self, date: NaiveDate) -> Result<Vec<StatusEntry>>;

    async fn entries_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<StatusEntry>>;

    async fn user_entries_between(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<StatusEntry>>;
}

/// Process-local store, used when no database is configured.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<BTreeMap<(String, NaiveDate), StatusEntry>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    async fn filtered<F>(&self, keep: F) -> Vec<StatusEntry>
    where
        F: Fn(&StatusEntry) -> bool,
    {
        let entries = self.entries.read().await;
        let mut matching: Vec<StatusEntry> = entries.values().filter(|e| keep(*e)).cloned().collect();
        matching.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.user_name.cmp(&b.user_name)));
        matching
    }
}

#[async_trait]
impl StatusStore for MemoryStore {
    async fn upsert(&self, entry: &StatusEntry) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.insert(entry.key(), entry.clone());

        tracing::debug!(
            "Stored {} for {} on {}",
            entry.status,
            entry.user_id,
            entry.date
        );

        Ok(())
    }

    async fn entries_on(&self, date: NaiveDate) -> Result<Vec<StatusEntry>> {
        Ok(self.filtered(|e| e.date == date).await)
    }

    async fn entries_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<StatusEntry>> {
        Ok(self.filtered(|e| e.date >= start && e.date <= end).await)
    }

    async fn user_entries_between(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<StatusEntry>> {
        Ok(self
            .filtered(|e| e.user_id == user_id && e.date >= start && e.date <= end)
            .await)
    }
}
