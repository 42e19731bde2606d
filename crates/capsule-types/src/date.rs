//! Date text helpers.
//!
//! Dates cross the storage boundary as ISO-8601 text in UTC with millisecond
//! precision, e.g. `2022-07-07T12:18:49.497Z`. Years outside `0000..=9999`
//! use the expanded form with a sign and six digits, e.g.
//! `+010000-01-01T00:00:00.000Z` or `-000001-01-01T00:00:00.000Z`.

use chrono::{DateTime, Datelike, SecondsFormat, TimeZone, Utc};

use crate::error::TypeError;
use crate::value::Value;

const PLACEHOLDER_YEAR: i32 = 2000;

/// Render a date as round-trippable ISO-8601 text.
pub fn date_to_json(date: &DateTime<Utc>) -> String {
    let year = date.year();
    if (0..=9999).contains(&year) {
        return date.to_rfc3339_opts(SecondsFormat::Millis, true);
    }
    let sign = if year < 0 { '-' } else { '+' };
    format!(
        "{sign}{:06}-{}",
        year.unsigned_abs(),
        date.format("%m-%dT%H:%M:%S%.3fZ")
    )
}

/// Parse ISO-8601 text (any offset, four-digit or expanded year) back into a
/// UTC date.
pub fn date_from_json(text: &str) -> Result<DateTime<Utc>, TypeError> {
    let invalid = || TypeError::InvalidDate(text.to_string());
    match split_expanded_year(text) {
        Some((year, rest)) => {
            // Parse with an in-range leap year, then move to the real year.
            let dt = DateTime::parse_from_rfc3339(&format!("{PLACEHOLDER_YEAR:04}{rest}"))
                .map_err(|_| invalid())?;
            dt.with_year(year)
                .map(|dt| dt.with_timezone(&Utc))
                .ok_or_else(invalid)
        }
        None => DateTime::parse_from_rfc3339(text)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| invalid()),
    }
}

/// Split `±YYYYYY-…` into the signed year and the text from the first `-`.
fn split_expanded_year(text: &str) -> Option<(i32, &str)> {
    let sign = match text.as_bytes().first()? {
        b'+' => 1,
        b'-' => -1,
        _ => return None,
    };
    let digits = text.get(1..7)?;
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let rest = text.get(7..)?;
    if !rest.starts_with('-') {
        return None;
    }
    Some((sign * digits.parse::<i32>().ok()?, rest))
}

/// Build a date value from milliseconds since the UNIX epoch.
///
/// Out-of-range instants produce [`Value::InvalidDate`]. The representable
/// range is chrono's (about ±262,000 years), which is narrower than the
/// ±8.64e15 ms some runtimes accept, so e.g. `8_640_000_000_000_000` is
/// invalid here.
pub fn date_from_millis(millis: i64) -> Value {
    Utc.timestamp_millis_opt(millis)
        .single()
        .map_or(Value::InvalidDate, Value::Date)
}
