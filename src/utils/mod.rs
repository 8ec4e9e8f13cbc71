pub mod time;

pub use time::{normalize_timestamp, TimeError};
