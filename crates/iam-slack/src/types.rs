use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
    /// Visible to everyone in the channel
    InChannel,
    /// Visible only to the invoking user
    Ephemeral,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mrkdwn_in: Vec<String>,
}

impl Attachment {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            mrkdwn_in: Vec::new(),
        }
    }

    pub fn markdown(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            mrkdwn_in: vec!["text".to_string()],
        }
    }
}

/// Body of a slash-command response, `response_url` post or incoming webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlackMessage {
    /// Slack treats a missing type as ephemeral
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_type: Option<ResponseType>,
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

impl SlackMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            response_type: None,
            text: text.into(),
            attachments: Vec::new(),
        }
    }

    pub fn in_channel(text: impl Into<String>) -> Self {
        Self::new(text).with_response_type(ResponseType::InChannel)
    }

    pub fn ephemeral(text: impl Into<String>) -> Self {
        Self::new(text).with_response_type(ResponseType::Ephemeral)
    }

    pub fn with_response_type(mut self, response_type: ResponseType) -> Self {
        self.response_type = Some(response_type);
        self
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }
}
