use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "iam")]
#[command(about = "Team WFH/OOO status tracker for Slack", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Database URL (only `serve` runs without one, on an in-memory store)
    #[arg(long, env = "DATABASE_URL", global = true)]
    pub database_url: Option<String>,

    /// Team time zone, e.g. US/Eastern
    #[arg(long, env = "IAM_TIMEZONE", global = true)]
    pub timezone: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start API server
    Serve {
        /// Port to listen on
        #[arg(long)]
        port: Option<u16>,
    },

    /// Initialize database
    InitDb,

    /// Post today's statuses to the Slack webhook
    DailyUpdate {
        /// Post even outside the digest window
        #[arg(long)]
        force: bool,
    },

    /// Set a status for one or more dates
    Set {
        /// Slack user ID
        user_id: String,

        /// Display name
        user_name: String,

        /// wfh, ooo or in
        status: String,

        /// Date expression, e.g. "tomorrow" or "monday through friday"
        when: Vec<String>,
    },

    /// Show today's WFH/OOO statuses
    Today,

    /// Show upcoming WFH/OOO statuses
    Schedule,

    /// Show a user's statuses from the past month
    History {
        /// Slack user ID
        user_id: String,
    },
}
