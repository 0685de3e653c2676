//! Responses for each `/iam` subcommand.

use std::fmt::Display;

use crate::{Attachment, SlackMessage};

pub const HELP_TEXT: &str = "Use this command to set or check your status.";

pub const USAGE: &str = "Use `/iam [subcommand]` with one of the following subcommands:\n\
\t -`wfh` to set a working from home status or `ooo` to set out of office status \n\
\t  followed by a time (defaults to today). \n\
\t\t Multiple dates can be given using 'and' or a range using 'through' \n\
\t\t e.g. '2021-10-25 and 2021-10-26' or '2021-10-25 through 2021-10-29'\n\
\t\t Dates can be provided in a variety of natural formats, \n\
\t\t e.g. tomorrow, wednesday, 2019-03-12, etc.\n\
\t -`in` to set your status to in office (to override an earlier OOO or WFH).\n\
\t -`history` to check your recent history, \n\
\t -`today` to see everyone's status for the current day, \n\
\t -`schedule` to check scheduled OOO or WFH status. \n\
\t  e.g. `/iam wfh tomorrow and friday`, `/iam ooo 4/13/2019`, or `/iam schedule` \n\
\t -`version` to check the version of the bot \n\
\t -`help` to get this help message";

pub const TODAY_TITLE: &str = "Today's WFH/OOO statuses:";
pub const SCHEDULE_TITLE: &str = "Upcoming WFH/OOO statuses:";
pub const HISTORY_TITLE: &str = "My WFH/OOO status from the past month:";
pub const ERROR_TITLE: &str = "Oops! Something went wrong!";

const NOTHING_SCHEDULED: &str = "No WFH/OOO statuses scheduled for the next month.";
const NO_HISTORY: &str = "No WFH/OOO statuses in the past month.";

pub fn help() -> SlackMessage {
    SlackMessage::new(HELP_TEXT).with_attachment(Attachment::new(USAGE))
}

pub fn unknown_subcommand() -> SlackMessage {
    SlackMessage::new("Unknown subcommand!").with_attachment(Attachment::new(USAGE))
}

pub fn version(version: &str) -> SlackMessage {
    SlackMessage::new(version)
}

/// Immediate reply while the status update is processed.
pub fn logging_ack() -> SlackMessage {
    SlackMessage::ephemeral("logging...")
}

pub fn status_set(confirmation: impl Into<String>) -> SlackMessage {
    SlackMessage::in_channel(confirmation)
}

pub fn today(report: impl Into<String>) -> SlackMessage {
    SlackMessage::in_channel(TODAY_TITLE).with_attachment(Attachment::new(report))
}

/// Daily digest for the incoming webhook.
pub fn digest(report: impl Into<String>) -> SlackMessage {
    SlackMessage::in_channel(TODAY_TITLE).with_attachment(Attachment::markdown(report))
}

pub fn schedule(report: &str) -> SlackMessage {
    SlackMessage::in_channel(SCHEDULE_TITLE)
        .with_attachment(Attachment::new(or_placeholder(report, NOTHING_SCHEDULED)))
}

pub fn history(report: &str) -> SlackMessage {
    SlackMessage::new(HISTORY_TITLE).with_attachment(Attachment::new(or_placeholder(report, NO_HISTORY)))
}

pub fn error(err: impl Display) -> SlackMessage {
    SlackMessage::ephemeral(ERROR_TITLE).with_attachment(Attachment::new(err.to_string()))
}

fn or_placeholder(report: &str, placeholder: &str) -> String {
    if report.is_empty() {
        placeholder.to_string()
    } else {
        report.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ResponseType;

    #[test]
    fn test_help_lists_subcommands() {
        let message = help();
        assert_eq!(message.text, HELP_TEXT);
        assert!(message.response_type.is_none());
        for subcommand in ["`wfh`", "`ooo`", "`in`", "`history`", "`today`", "`schedule`", "`version`"] {
            assert!(message.attachments[0].text.contains(subcommand), "{}", subcommand);
        }
    }

    #[test]
    fn test_visibility() {
        assert_eq!(today("x").response_type, Some(ResponseType::InChannel));
        assert_eq!(schedule("x").response_type, Some(ResponseType::InChannel));
        assert_eq!(status_set("x").response_type, Some(ResponseType::InChannel));
        assert_eq!(logging_ack().response_type, Some(ResponseType::Ephemeral));
        assert_eq!(error("boom").response_type, Some(ResponseType::Ephemeral));
        assert!(history("x").response_type.is_none());
    }

    #[test]
    fn test_empty_reports_get_placeholders() {
        assert_eq!(schedule("").attachments[0].text, NOTHING_SCHEDULED);
        assert_eq!(history("").attachments[0].text, NO_HISTORY);
    }

    #[test]
    fn test_digest_is_markdown() {
        let message = digest("alice - WFH");
        assert_eq!(message.attachments[0].mrkdwn_in, vec!["text".to_string()]);
    }
}
