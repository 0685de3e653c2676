use crate::Status;

/// A parsed `/iam` invocation. The first word selects the subcommand,
/// everything after it is passed through as options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Set { status: Status, options: String },
    History,
    Today,
    Schedule,
    Version,
    Help,
    Unknown(String),
}

impl Command {
    pub fn parse(text: &str) -> Self {
        let text = text.trim();

        let (subcommand, options) = match text.split_once(char::is_whitespace) {
            Some((head, rest)) => (head.to_lowercase(), rest.trim().to_string()),
            None => (text.to_lowercase(), String::new()),
        };

        match subcommand.as_str() {
            "" | "help" => Command::Help,
            "wfh" | "ooo" | "in" | "ino" => match Status::parse(&subcommand) {
                Ok(status) => Command::Set { status, options },
                Err(_) => Command::Unknown(subcommand),
            },
            "history" => Command::History,
            "today" => Command::Today,
            "schedule" => Command::Schedule,
            "version" => Command::Version,
            _ => Command::Unknown(subcommand),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Command::Set { status, .. } => status.as_str(),
            Command::History => "history",
            Command::Today => "today",
            Command::Schedule => "schedule",
            Command::Version => "version",
            Command::Help => "help",
            Command::Unknown(name) => name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_commands_keep_options() {
        assert_eq!(
            Command::parse("WFH  next Monday "),
            Command::Set {
                status: Status::Wfh,
                options: "next Monday".to_string(),
            }
        );
        assert_eq!(
            Command::parse("in"),
            Command::Set {
                status: Status::Ino,
                options: String::new(),
            }
        );
    }

    #[test]
    fn test_query_commands() {
        assert_eq!(Command::parse("today"), Command::Today);
        assert_eq!(Command::parse(" Schedule"), Command::Schedule);
        assert_eq!(Command::parse("history"), Command::History);
        assert_eq!(Command::parse("version"), Command::Version);
    }

    #[test]
    fn test_help_and_unknown() {
        assert_eq!(Command::parse(""), Command::Help);
        assert_eq!(Command::parse("help me"), Command::Help);
        assert_eq!(
            Command::parse("lunch tomorrow"),
            Command::Unknown("lunch".to_string())
        );
    }
}
