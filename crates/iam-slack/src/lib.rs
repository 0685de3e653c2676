pub mod client;
pub mod error;
pub mod messages;
pub mod slash;
pub mod types;
pub mod verify;

// Re-exports
pub use client::SlackClient;
pub use error::{Error, Result};
pub use slash::SlashCommand;
pub use types::{Attachment, ResponseType, SlackMessage};
pub use verify::RequestVerifier;
