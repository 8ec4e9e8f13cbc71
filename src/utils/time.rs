use chrono::{DateTime, NaiveDateTime};
use chrono_tz::Europe::Lisbon;
use chrono_tz::Tz;
use thiserror::Error;

/// Timestamp normalization errors
#[derive(Debug, Clone, Error)]
pub enum TimeError {
    /// The string matched neither of the two known STH timestamp layouts
    #[error("Timestamp matches neither known layout: {0}")]
    Format(String),
}

/// Normalize an STH `recvTime` string to Lisbon local time.
///
/// Input is UTC in one of two layouts, possibly ISO-styled with a `T`
/// separator and a trailing `Z`:
///   - `YYYY-MM-DD HH:MM:SS.ffffff`
///   - `YYYY-MM-DD HH:MM:SS`
///
/// The fractional-seconds layout is tried first, whole seconds on failure.
/// A string matching neither propagates as `TimeError::Format`; callers must
/// not commit a window containing it.
pub fn normalize_timestamp(raw: &str) -> Result<DateTime<Tz>, TimeError> {
    let cleaned = raw.replace('T', " ").replace('Z', "");

    let naive = NaiveDateTime::parse_from_str(&cleaned, "%Y-%m-%d %H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(&cleaned, "%Y-%m-%d %H:%M:%S"))
        .map_err(|_| TimeError::Format(raw.to_string()))?;

    Ok(naive.and_utc().with_timezone(&Lisbon))
}
