pub mod calendar;
pub mod command;
pub mod dates;
pub mod error;
pub mod report;
pub mod service;
pub mod settings;
pub mod status;
pub mod store;

// Re-exports
pub use calendar::{Clock, FixedClock, SystemClock, TeamCalendar};
pub use command::Command;
pub use dates::{parse_date, parse_date_options, DateSelection};
pub use error::{Error, Result};
pub use service::{SetOutcome, StatusService};
pub use settings::Settings;
pub use status::{Status, StatusEntry};
pub use store::{MemoryStore, StatusStore};
