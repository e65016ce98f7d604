//! Date helper functions

use chrono::{DateTime, TimeZone};

/// Format a date using a Moment.js-style format string
///
/// # Examples
/// ```ignore
/// format_date(&date, "YYYY-MM-DD") // -> "2024-01-15"
/// ```
pub fn format_date<Tz: TimeZone>(date: &DateTime<Tz>, format: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let chrono_format = moment_to_chrono_format(format);
    date.format(&chrono_format).to_string()
}

/// Format a date in ISO 8601 / XML format
pub fn date_xml<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%Y-%m-%dT%H:%M:%S%:z").to_string()
}

/// Moment.js tokens, longest first so `MMMM` wins over `MM`
const MOMENT_TOKENS: &[(&str, &str)] = &[
    ("YYYY", "%Y"),
    ("MMMM", "%B"),
    ("DDDD", "%j"),
    ("dddd", "%A"),
    ("MMM", "%b"),
    ("ddd", "%a"),
    ("SSS", "%3f"),
    ("YY", "%y"),
    ("MM", "%m"),
    ("DD", "%d"),
    ("HH", "%H"),
    ("hh", "%I"),
    ("mm", "%M"),
    ("ss", "%S"),
    ("ZZ", "%z"),
    ("Z", "%:z"),
];

/// Translate a Moment.js format into a chrono one, token by token
fn moment_to_chrono_format(format: &str) -> String {
    let mut result = String::with_capacity(format.len() * 2);
    let mut rest = format;

    'scan: while let Some(c) = rest.chars().next() {
        for (token, spec) in MOMENT_TOKENS {
            if let Some(tail) = rest.strip_prefix(token) {
                result.push_str(spec);
                rest = tail;
                continue 'scan;
            }
        }
        if c == '%' {
            result.push_str("%%");
        } else {
            result.push(c);
        }
        rest = &rest[c.len_utf8()..];
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn date() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2025-08-01T15:02:08+02:00").unwrap()
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(&date(), "YYYY-MM-DD"), "2025-08-01");
        assert_eq!(format_date(&date(), "YYYY/MM/DD HH:mm"), "2025/08/01 15:02");
        assert_eq!(format_date(&date(), "MMM DD, YYYY"), "Aug 01, 2025");
    }

    #[test]
    fn test_date_xml_keeps_offset() {
        assert_eq!(date_xml(&date()), "2025-08-01T15:02:08+02:00");
    }

    #[test]
    fn test_moment_to_chrono() {
        assert_eq!(moment_to_chrono_format("YYYY-MM-DD"), "%Y-%m-%d");
        assert_eq!(moment_to_chrono_format("HH:mm:ss"), "%H:%M:%S");
        assert_eq!(moment_to_chrono_format("dddd, MMMM DD"), "%A, %B %d");
        assert_eq!(moment_to_chrono_format("100%"), "100%%");
    }
}
