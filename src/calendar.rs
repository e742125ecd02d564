//! date parsing and calendar differences used by the loan calculators

use chrono::{DateTime, Datelike, FixedOffset, Months, NaiveDate, NaiveDateTime, TimeZone, Utc};
use log::warn;

use crate::errors::{Result, ValidationError};

/// parse an ISO-8601 timestamp or bare date as sent by the API
///
/// Accepts RFC 3339 (`2024-03-01T08:30:00Z`, `2024-03-01T11:30:00+03:00`),
/// a timestamp without offset (taken as UTC) and a plain `2024-03-01`
/// (midnight UTC).
pub fn parse_iso_date(raw: &str) -> Result<DateTime<Utc>> {
    parse_iso_date_with_offset(raw).map(|parsed| parsed.with_timezone(&Utc))
}

/// like `parse_iso_date`, keeping the offset the timestamp was written in
///
/// Calendar fields such as the year then read as the member saw them;
/// inputs without an offset are UTC.
pub fn parse_iso_date_with_offset(raw: &str) -> Result<DateTime<FixedOffset>> {
    let trimmed = raw.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed);
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(Utc.from_utc_datetime(&naive).fixed_offset());
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&midnight).fixed_offset());
        }
    }

    warn!("rejected date input {:?}", raw);
    Err(ValidationError::InvalidDate {
        message: format!("'{}' is not an ISO-8601 date", raw),
    }
    .into())
}

/// whole calendar months from `earlier` to `later`, zero if `later` is not after
///
/// A month counts once the same day-of-month and time is reached; month ends
/// clamp (Jan 31 plus one month is the last day of February).
pub fn whole_months_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> u32 {
    if later <= earlier {
        return 0;
    }

    let span = (later.year() - earlier.year()) * 12 + later.month() as i32
        - earlier.month() as i32;
    let mut months = span.max(0) as u32;

    while months > 0 {
        match earlier.checked_add_months(Months::new(months)) {
            Some(shifted) if shifted <= later => break,
            _ => months -= 1,
        }
    }

    months
}

/// whole elapsed days, truncated, zero if `later` is not after `earlier`
pub fn whole_days_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> u32 {
    let days = (later - earlier).num_days();
    if days <= 0 {
        0
    } else {
        u32::try_from(days).unwrap_or(u32::MAX)
    }
}

/// shift by calendar months, clamping to the month end
pub fn add_months(date: DateTime<Utc>, months: u32) -> DateTime<Utc> {
    date.checked_add_months(Months::new(months)).unwrap_or(date)
}

/// serde adapters for API dates, accepting everything `parse_iso_date` does
pub mod iso_date {
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.to_rfc3339())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_iso_date(&raw).map_err(de::Error::custom)
    }

    /// keeps the written offset, see `parse_iso_date_with_offset`
    pub mod with_offset {
        use chrono::{DateTime, FixedOffset};
        use serde::{de, Deserialize, Deserializer, Serializer};

        pub fn serialize<S>(date: &DateTime<FixedOffset>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_str(&date.to_rfc3339())
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
        where
            D: Deserializer<'de>,
        {
            let raw = String::deserialize(deserializer)?;
            crate::calendar::parse_iso_date_with_offset(&raw).map_err(de::Error::custom)
        }
    }

    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{de, Deserialize, Deserializer, Serializer};

        pub fn serialize<S>(date: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match date {
                Some(date) => serializer.serialize_some(&date.to_rfc3339()),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
        where
            D: Deserializer<'de>,
        {
            match Option::<String>::deserialize(deserializer)? {
                Some(raw) => crate::calendar::parse_iso_date(&raw)
                    .map(Some)
                    .map_err(de::Error::custom),
                None => Ok(None),
            }
        }
    }
}
