use chrono::{NaiveDate, NaiveTime};
use std::sync::Arc;
use tokio::sync::Mutex;

use iam_core::StatusService;
use iam_slack::{messages, SlackClient};

use crate::{Error, Result};

/// Local time-of-day range, inclusive, in which the digest may go out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigestWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl DigestWindow {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, time: NaiveTime) -> bool {
        time >= self.start && time <= self.end
    }
}

/// Posts today's WFH/OOO statuses to the team channel once per day.
pub struct DailyDigest {
    service: Arc<StatusService>,
    slack: SlackClient,
    webhook_url: String,
    window: DigestWindow,
    last_sent: Mutex<Option<NaiveDate>>,
}

impl DailyDigest {
    pub fn new(
        service: Arc<StatusService>,
        slack: SlackClient,
        webhook_url: Option<String>,
        window: DigestWindow,
    ) -> Result<Self> {
        let webhook_url = webhook_url.ok_or(Error::MissingWebhook)?;

        Ok(Self {
            service,
            slack,
            webhook_url,
            window,
            last_sent: Mutex::new(None),
        })
    }

    /// Send the digest if the team-local time is inside the window and it has
    /// not gone out today. Returns whether a post was made.
    pub async fn tick(&self) -> Result<bool> {
        let calendar = self.service.calendar();
        let today = calendar.today();

        if !self.window.contains(calendar.local_time()) {
            return Ok(false);
        }

        let mut last_sent = self.last_sent.lock().await;
        if *last_sent == Some(today) {
            return Ok(false);
        }

        self.send_now().await?;
        *last_sent = Some(today);

        Ok(true)
    }

    /// Post the digest regardless of the window.
    pub async fn send_now(&self) -> Result<()> {
        let report = self.service.today_report().await?;

        self.slack
            .post_webhook(&self.webhook_url, &messages::digest(report))
            .await?;

        tracing::info!("Daily digest posted for {}", self.service.today());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use iam_core::{FixedClock, MemoryStore, Status, TeamCalendar};
    use serde_json::json;

    fn window() -> DigestWindow {
        DigestWindow::new(
            NaiveTime::from_hms_opt(8, 50, 0).unwrap(),
            NaiveTime::from_hms_opt(9, 10, 0).unwrap(),
        )
    }

    fn service_at(hour: u32, minute: u32) -> Arc<StatusService> {
        // 2026-10-19 is in EDT (UTC-4)
        let now = Utc.with_ymd_and_hms(2026, 10, 19, hour + 4, minute, 0).unwrap();
        let calendar = TeamCalendar::new(chrono_tz::US::Eastern, Arc::new(FixedClock(now)));
        Arc::new(StatusService::new(Arc::new(MemoryStore::new()), calendar))
    }

    #[test]
    fn test_window_is_inclusive() {
        let window = window();
        assert!(window.contains(NaiveTime::from_hms_opt(8, 50, 0).unwrap()));
        assert!(window.contains(NaiveTime::from_hms_opt(9, 10, 0).unwrap()));
        assert!(!window.contains(NaiveTime::from_hms_opt(9, 10, 1).unwrap()));
        assert!(!window.contains(NaiveTime::from_hms_opt(8, 0, 0).unwrap()));
    }

    #[test]
    fn test_requires_webhook() {
        let result = DailyDigest::new(service_at(9, 0), SlackClient::new().unwrap(), None, window());
        assert!(matches!(result, Err(Error::MissingWebhook)));
    }

    #[tokio::test]
    async fn test_tick_posts_once_inside_window() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/hook")
            .match_body(mockito::Matcher::Json(json!({
                "response_type": "in_channel",
                "text": "Today's WFH/OOO statuses:",
                "attachments": [{"text": "alice - WFH", "mrkdwn_in": ["text"]}]
            })))
            .with_status(200)
            .expect(1)
            .create_async()
            .await;

        let service = service_at(9, 0);
        service
            .set_status("U1", "alice", Status::Wfh, "")
            .await
            .unwrap();

        let digest = DailyDigest::new(
            service,
            SlackClient::new().unwrap(),
            Some(format!("{}/hook", server.url())),
            window(),
        )
        .unwrap();

        assert!(digest.tick().await.unwrap());
        assert!(!digest.tick().await.unwrap());

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_tick_outside_window_does_nothing() {
        let digest = DailyDigest::new(
            service_at(12, 0),
            SlackClient::new().unwrap(),
            Some("http://127.0.0.1:9/unreachable".to_string()),
            window(),
        )
        .unwrap();

        assert!(!digest.tick().await.unwrap());
    }

    #[tokio::test]
    async fn test_send_now_ignores_window() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/hook")
            .match_body(mockito::Matcher::PartialJson(json!({
                "response_type": "in_channel",
                "text": "Today's WFH/OOO statuses:"
            })))
            .with_status(200)
            .expect(2)
            .create_async()
            .await;

        let digest = DailyDigest::new(
            service_at(12, 0),
            SlackClient::new().unwrap(),
            Some(format!("{}/hook", server.url())),
            window(),
        )
        .unwrap();

        digest.send_now().await.unwrap();
        digest.send_now().await.unwrap();
        assert!(!digest.tick().await.unwrap());

        mock.assert_async().await;
    }
}
