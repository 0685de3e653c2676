pub mod digest;
pub mod error;

pub use digest::{DailyDigest, DigestWindow};
pub use error::{Error, Result};
