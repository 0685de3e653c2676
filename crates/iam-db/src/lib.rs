pub mod error;
pub mod models;
pub mod repository;

// Re-exports
pub use error::{Error, Result};
pub use models::StatusRecord;
pub use repository::{connect_store, open_store, Database};
