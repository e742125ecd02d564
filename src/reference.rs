use chrono::Datelike;
use log::warn;

use crate::errors::{Result, ValidationError};

const DEFAULT_SEQUENCE_WIDTH: usize = 4;

/// human-readable loan reference: `BIZ/2024/0007`
///
/// The year is read in whatever zone `application_date` carries, so pass the
/// date in the member's offset to get the year they applied in.
pub fn format_reference(alias: &str, application_date: impl Datelike, sequence: i64) -> Result<String> {
    format_reference_padded(alias, application_date, sequence, DEFAULT_SEQUENCE_WIDTH)
}

/// reference with a custom zero-padding width; longer sequences are never truncated
pub fn format_reference_padded(
    alias: &str,
    application_date: impl Datelike,
    sequence: i64,
    width: usize,
) -> Result<String> {
    if sequence < 0 {
        warn!("rejected negative loan sequence {}", sequence);
        return Err(ValidationError::InvalidSequenceNumber {
            value: sequence.to_string(),
        }
        .into());
    }

    Ok(format!(
        "{}/{}/{:0>width$}",
        alias.to_uppercase(),
        application_date.year(),
        sequence,
        width = width
    ))
}

/// accept a sequence number that arrived as a JSON double
pub fn sequence_from_f64(value: f64) -> Result<i64> {
    let invalid = || ValidationError::InvalidSequenceNumber {
        value: value.to_string(),
    };

    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value > i64::MAX as f64 {
        warn!("rejected loan sequence {}", value);
        return Err(invalid().into());
    }

    Ok(value as i64)
}
