//! Serde helpers for the backend's date and time encodings.
//!
//! The backend is not consistent about how it returns calendar dates: a DATE
//! column may come back as `2024-03-10` or as a full timestamp such as
//! `2024-03-10T00:00:00.000Z`. Times come back as `HH:MM:SS` while the client
//! sends `HH:MM`. Everything is normalized into chrono types on the way in.
//!
//! Timestamps are read in UTC, never in the machine's local zone. A backend
//! running east of UTC that stores local midnight sends
//! `2024-03-09T21:00:00.000Z` for the 10th, and this client files it under
//! the 9th. The day can therefore differ by one from what a local-time
//! reader would show.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Parse a calendar date from either `YYYY-MM-DD` or an RFC 3339 timestamp.
///
/// Timestamps are reduced to their UTC calendar date.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }

    // "2024-03-10 09:00:00" and similar
    s.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

/// Parse a time of day from `HH:MM:SS` or `HH:MM`.
pub fn parse_time(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .ok()
}

pub mod date {
    use super::*;

    pub fn serialize<S: Serializer>(date: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&date.format("%Y-%m-%d").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(d)?;
        parse_date(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date '{raw}'")))
    }
}

pub mod time {
    use super::*;

    pub fn serialize<S: Serializer>(time: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        parse_time(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid time '{raw}'")))
    }
}

/// Optional dates in query/filter structs.
pub mod opt_date {
    use super::*;

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(date) => super::date::serialize(date, s),
            None => s.serialize_none(),
        }
    }
}

/// Treat `null`, missing and blank strings the same way.
pub fn non_empty<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let value: Option<String> = Option::deserialize(d)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_dates() {
        assert_eq!(
            parse_date("2024-03-10"),
            NaiveDate::from_ymd_opt(2024, 3, 10)
        );
    }

    #[test]
    fn parses_timestamps_as_utc_dates() {
        assert_eq!(
            parse_date("2024-03-10T00:00:00Z"),
            NaiveDate::from_ymd_opt(2024, 3, 10)
        );
        assert_eq!(
            parse_date("2024-03-09T21:00:00.000Z"),
            NaiveDate::from_ymd_opt(2024, 3, 9)
        );
        assert_eq!(
            parse_date("2024-03-10T01:30:00+03:00"),
            NaiveDate::from_ymd_opt(2024, 3, 9)
        );
    }

    #[test]
    fn rejects_garbage_dates() {
        assert_eq!(parse_date("tomorrow"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn parses_times_with_and_without_seconds() {
        assert_eq!(parse_time("09:00:00"), NaiveTime::from_hms_opt(9, 0, 0));
        assert_eq!(parse_time("09:00"), NaiveTime::from_hms_opt(9, 0, 0));
        assert_eq!(parse_time("23:59:30"), NaiveTime::from_hms_opt(23, 59, 30));
        assert_eq!(parse_time("25:00"), None);
        assert_eq!(parse_time("noon"), None);
    }
}
