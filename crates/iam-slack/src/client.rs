use reqwest::Client;
use std::time::Duration;

use crate::{Error, Result, SlackMessage};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Posts messages to slash-command `response_url`s and incoming webhooks.
#[derive(Clone)]
pub struct SlackClient {
    client: Client,
}

impl SlackClient {
    pub fn new() -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client })
    }

    /// Send a delayed response for a slash command.
    pub async fn respond(&self, response_url: &str, message: &SlackMessage) -> Result<()> {
        tracing::debug!("Responding to Slack response_url");
        self.post(response_url, message).await
    }

    /// Post to an incoming webhook.
    pub async fn post_webhook(&self, webhook_url: &str, message: &SlackMessage) -> Result<()> {
        tracing::info!("Posting to Slack webhook: {}", message.text);
        self.post(webhook_url, message).await
    }

    // Webhook and response URLs carry credentials, keep them out of errors.
    async fn post(&self, url: &str, message: &SlackMessage) -> Result<()> {
        let response = self
            .client
            .post(url)
            .json(message)
            .send()
            .await
            .map_err(|e| Error::Request(e.without_url()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api(format!("Slack returned {}: {}", status, body)));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages;
    use mockito::Matcher;
    use serde_json::json;

    #[tokio::test]
    async fn test_respond_posts_json() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/commands/T1/123")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({
                "response_type": "in_channel",
                "text": "alice is WFH today."
            })))
            .with_status(200)
            .with_body("ok")
            .create_async()
            .await;

        let client = SlackClient::new().unwrap();
        client
            .respond(
                &format!("{}/commands/T1/123", server.url()),
                &messages::status_set("alice is WFH today."),
            )
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_webhook_error_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/hook")
            .with_status(404)
            .with_body("no_service")
            .create_async()
            .await;

        let client = SlackClient::new().unwrap();
        let err = client
            .post_webhook(&format!("{}/hook", server.url()), &messages::digest("x"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Api(msg) if msg.contains("no_service")));
    }

    #[tokio::test]
    async fn test_errors_do_not_expose_webhook_path() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/services/T1/B1/hook-secret")
            .with_status(500)
            .with_body("oops")
            .create_async()
            .await;

        let client = SlackClient::new().unwrap();
        let err = client
            .post_webhook(
                &format!("{}/services/T1/B1/hook-secret", server.url()),
                &messages::digest("x"),
            )
            .await
            .unwrap_err();
        assert!(!err.to_string().contains("hook-secret"));

        let err = client
            .post_webhook("http://127.0.0.1:9/services/T1/B1/hook-secret", &messages::digest("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Request(_)));
        assert!(!err.to_string().contains("hook-secret"));
    }
}
