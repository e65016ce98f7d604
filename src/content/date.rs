//! Front-matter date parsing
//!
//! Dates must pin down an instant. A value with an explicit offset is taken
//! as written; a value without one is only accepted when the site declares a
//! timezone to interpret it in.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone};
use chrono_tz::Tz;

use super::error::ContentError;

/// Formats that carry an offset (tried after RFC 3339)
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S %z",
    "%Y-%m-%d %H:%M:%S%z",
    "%Y-%m-%d %H:%M:%S %:z",
    "%Y-%m-%d %H:%M %z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y/%m/%d %H:%M:%S %z",
];

/// Formats without an offset
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Parse a date string into an offset-aware timestamp
pub fn parse_date(s: &str, tz: Option<Tz>) -> Result<DateTime<FixedOffset>, ContentError> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt);
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
    }

    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| ContentError::InvalidDate(s.to_string()))?;

    let tz = tz.ok_or_else(|| ContentError::MissingOffset(s.to_string()))?;
    localize(&naive, tz).ok_or_else(|| ContentError::InvalidDate(s.to_string()))
}

/// Attach the zone's offset to a wall-clock time
fn localize(naive: &NaiveDateTime, tz: Tz) -> Option<DateTime<FixedOffset>> {
    // Gaps (spring forward) have no valid offset; ambiguous times take the earlier one
    let local = tz.from_local_datetime(naive).earliest()?;
    let offset = local.offset().fix();
    Some(local.with_timezone(&offset))
}

/// Current time in the site timezone, or in UTC when none is configured
pub fn now_in(tz: Option<Tz>) -> DateTime<FixedOffset> {
    let now = chrono::Utc::now();
    match tz {
        Some(tz) => {
            let local = now.with_timezone(&tz);
            local.with_timezone(&local.offset().fix())
        }
        None => now.fixed_offset(),
    }
}
