//! Timestamp parsing and the expiration window check.
//!
//! Stamps are written as wall time in the configured timezone together with
//! its UTC offset, so a wall time that repeats at a DST fold still names one
//! instant. Offset-less text written elsewhere is read as local wall time in
//! that same timezone: a repeated wall time takes the earliest instant, and
//! wall times skipped by a DST gap are rejected.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;

use super::error::VerificationError;
use super::types::StoredTimestamp;

const STAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%:z";
const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f%#z", "%Y-%m-%d %H:%M:%S%.f%:z"];
const LOCAL_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Render an instant the way `generate` stores it.
#[must_use]
pub fn format_timestamp(instant: DateTime<Utc>, timezone: Tz) -> String {
    instant
        .with_timezone(&timezone)
        .format(STAMP_FORMAT)
        .to_string()
}

/// Resolve a stored timestamp to an instant.
///
/// # Errors
///
/// Returns `InvalidTimestamp` for empty or unrecognized text, out-of-range
/// epoch values, and local times that do not exist in `timezone`.
pub fn parse_timestamp(
    stored: &StoredTimestamp,
    timezone: Tz,
) -> Result<DateTime<Utc>, VerificationError> {
    match stored {
        StoredTimestamp::Unix(seconds) => from_unix(*seconds),
        StoredTimestamp::Text(text) => parse_text(text.trim(), timezone),
    }
}

fn from_unix(seconds: i64) -> Result<DateTime<Utc>, VerificationError> {
    DateTime::from_timestamp(seconds, 0)
        .ok_or_else(|| VerificationError::InvalidTimestamp(format!("{seconds} out of range")))
}

fn parse_text(text: &str, timezone: Tz) -> Result<DateTime<Utc>, VerificationError> {
    if text.is_empty() {
        return Err(VerificationError::InvalidTimestamp("empty".to_string()));
    }

    if is_integer(text) {
        let seconds = text
            .parse::<i64>()
            .map_err(|err| VerificationError::InvalidTimestamp(format!("{text}: {err}")))?;
        return from_unix(seconds);
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Ok(instant.with_timezone(&Utc));
    }

    for format in OFFSET_FORMATS {
        if let Ok(instant) = DateTime::parse_from_str(text, format) {
            return Ok(instant.with_timezone(&Utc));
        }
    }

    let naive = LOCAL_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, DATE_FORMAT)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| VerificationError::InvalidTimestamp(format!("unrecognized: {text}")))?;

    timezone
        .from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| {
            VerificationError::InvalidTimestamp(format!("{text} does not exist in {timezone}"))
        })
}

fn is_integer(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Last instant at which a pair issued at `issued_at` is still accepted.
///
/// `None` when the window runs past the representable range.
#[must_use]
pub fn expiration(issued_at: DateTime<Utc>, expires_after_hours: u32) -> Option<DateTime<Utc>> {
    issued_at.checked_add_signed(TimeDelta::hours(i64::from(expires_after_hours)))
}

/// `now <= issued_at + expires_after_hours`, boundary included.
#[must_use]
pub fn is_before_expiration(
    issued_at: DateTime<Utc>,
    expires_after_hours: u32,
    now: DateTime<Utc>,
) -> bool {
    expiration(issued_at, expires_after_hours).map_or(true, |expires_at| now <= expires_at)
}
