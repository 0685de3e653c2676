use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{Error, Result};

/// Form payload Slack posts for a slash command invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlashCommand {
    pub token: String,
    pub team_id: String,
    pub user_id: String,
    pub user_name: String,
    pub command: String,
    pub text: String,
    pub response_url: String,
    pub channel_id: Option<String>,
    pub trigger_id: Option<String>,
}

impl SlashCommand {
    /// Parse an `application/x-www-form-urlencoded` body.
    pub fn from_form(body: &[u8]) -> Result<Self> {
        let mut fields: HashMap<String, String> = url::form_urlencoded::parse(body)
            .into_owned()
            .collect();

        let mut required = |name: &str| {
            fields
                .remove(name)
                .ok_or_else(|| Error::InvalidPayload(format!("missing field `{}`", name)))
        };

        let command = SlashCommand {
            token: required("token")?,
            team_id: required("team_id")?,
            user_id: required("user_id")?,
            user_name: required("user_name")?,
            command: required("command")?,
            response_url: required("response_url")?,
            // bare `/iam` may arrive without a text field
            text: fields.remove("text").unwrap_or_default(),
            channel_id: fields.remove("channel_id"),
            trigger_id: fields.remove("trigger_id"),
        };

        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = "token=gIkuvaNzQIHg97ATvDxqgjtO&team_id=T0001&team_domain=example\
        &channel_id=C2147483705&channel_name=test&user_id=U2147483697&user_name=Steve\
        &command=%2Fiam&text=ooo+next+monday&response_url=https%3A%2F%2Fhooks.slack.com%2Fcommands%2F1234%2F5678\
        &trigger_id=13345224609.738474920.8088930838d88f008e0";

    #[test]
    fn test_parse_slash_command() {
        let command = SlashCommand::from_form(BODY.as_bytes()).unwrap();

        assert_eq!(command.team_id, "T0001");
        assert_eq!(command.user_name, "Steve");
        assert_eq!(command.command, "/iam");
        assert_eq!(command.text, "ooo next monday");
        assert_eq!(
            command.response_url,
            "https://hooks.slack.com/commands/1234/5678"
        );
        assert_eq!(command.channel_id.as_deref(), Some("C2147483705"));
    }

    #[test]
    fn test_missing_text_is_empty() {
        let body = "token=t&team_id=T&user_id=U&user_name=n&command=%2Fiam&response_url=http%3A%2F%2Flocalhost";
        let command = SlashCommand::from_form(body.as_bytes()).unwrap();
        assert_eq!(command.text, "");
        assert!(command.trigger_id.is_none());
    }

    #[test]
    fn test_missing_required_field() {
        let err = SlashCommand::from_form(b"token=t&team_id=T").unwrap_err();
        assert!(matches!(err, Error::InvalidPayload(msg) if msg.contains("user_id")));
    }
}
