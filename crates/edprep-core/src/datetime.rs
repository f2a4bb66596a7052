//! Timestamp parsing and length-of-stay derivation.
//!
//! Parsed timestamps are stored as `Datetime(ms)` columns. Parsing accepts
//! text in the layouts found in the source extracts as well as values that
//! are already datetimes, so reprocessing a cleaned table is a no-op.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use polars::prelude::{AnyValue, DataFrame, DataType, NamedFrom, Series, TimeUnit};
use tracing::warn;

use edprep_common::any_to_text;

use crate::columns::has_column;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Parse a timestamp; a bare date is taken as midnight.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(parsed);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

pub fn to_millis(value: NaiveDateTime) -> i64 {
    value.and_utc().timestamp_millis()
}

pub fn from_millis(millis: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp_millis(millis).map(|value| value.naive_utc())
}

fn unit_to_millis(value: i64, unit: TimeUnit) -> i64 {
    match unit {
        TimeUnit::Nanoseconds => value / 1_000_000,
        TimeUnit::Microseconds => value / 1_000,
        TimeUnit::Milliseconds => value,
    }
}

/// Milliseconds since the epoch for a datetime cell or a parseable text cell.
pub fn timestamp_millis(value: AnyValue<'_>) -> Option<i64> {
    match value {
        AnyValue::Null => None,
        AnyValue::Datetime(v, unit, _) => Some(unit_to_millis(v, unit)),
        other => any_to_text(other)
            .and_then(|text| parse_timestamp(&text))
            .map(to_millis),
    }
}

/// Timestamps of a column as epoch milliseconds, plus the count of
/// non-missing cells that could not be parsed.
pub fn datetime_column(df: &DataFrame, name: &str) -> Result<(Vec<Option<i64>>, usize)> {
    let series = df.column(name)?;
    let mut values = Vec::with_capacity(df.height());
    let mut unparsed = 0;
    for idx in 0..df.height() {
        let cell = series.get(idx).unwrap_or(AnyValue::Null);
        let is_missing = matches!(cell, AnyValue::Null);
        let parsed = timestamp_millis(cell);
        if parsed.is_none() && !is_missing {
            unparsed += 1;
        }
        values.push(parsed);
    }
    Ok((values, unparsed))
}

pub fn set_datetime_column(df: &mut DataFrame, name: &str, values: Vec<Option<i64>>) -> Result<()> {
    let series = Series::new(name.into(), values)
        .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?;
    df.with_column(series)?;
    Ok(())
}

/// Convert each present column to `Datetime(ms)`. Unparseable values become
/// null and are reported once per column.
pub fn parse_datetime_columns(df: &mut DataFrame, table: &str, columns: &[&str]) -> Result<()> {
    for column in columns {
        if !has_column(df, column) {
            continue;
        }
        let (values, unparsed) = datetime_column(df, column)?;
        if unparsed > 0 {
            warn!(
                table = %table,
                column = %column,
                unparsed_count = unparsed,
                "unparseable timestamps set to null"
            );
        }
        set_datetime_column(df, column, values)?;
    }
    Ok(())
}

/// Elapsed hours from `start` to `end`. Negative when the timestamps are
/// inverted.
pub fn hours_between(start: Option<i64>, end: Option<i64>) -> Option<f64> {
    match (start, end) {
        (Some(start), Some(end)) => Some((end - start) as f64 / MILLIS_PER_HOUR),
        _ => None,
    }
}

/// Write `target` as the hours between two datetime columns.
pub fn derive_los_hours(df: &mut DataFrame, start: &str, end: &str, target: &str) -> Result<()> {
    let (starts, _) = datetime_column(df, start)?;
    let (ends, _) = datetime_column(df, end)?;
    let hours: Vec<Option<f64>> = starts
        .into_iter()
        .zip(ends)
        .map(|(start, end)| hours_between(start, end))
        .collect();
    crate::columns::set_f64_column(df, target, hours)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_source_layouts() {
        let expected = NaiveDate::from_ymd_opt(2180, 7, 22)
            .and_then(|d| d.and_hms_opt(16, 24, 0))
            .unwrap();
        assert_eq!(parse_timestamp("2180-07-22 16:24:00"), Some(expected));
        assert_eq!(parse_timestamp("2180-07-22T16:24:00"), Some(expected));
        assert_eq!(parse_timestamp("2180-07-22 16:24"), Some(expected));
        assert_eq!(parse_timestamp("2180-07-22 16:24:00.000"), Some(expected));
    }

    #[test]
    fn bare_date_is_midnight() {
        let parsed = parse_timestamp("2180-07-22").unwrap();
        assert_eq!(parsed.to_string(), "2180-07-22 00:00:00");
    }

    #[test]
    fn garbage_is_none() {
        assert_eq!(parse_timestamp("not a date"), None);
        assert_eq!(parse_timestamp("2180-13-45 00:00:00"), None);
        assert_eq!(parse_timestamp(""), None);
    }

    #[test]
    fn negative_durations_are_kept() {
        let start = parse_timestamp("2020-01-01 12:00:00").map(to_millis);
        let end = parse_timestamp("2020-01-01 09:00:00").map(to_millis);
        assert_eq!(hours_between(start, end), Some(-3.0));
        assert_eq!(hours_between(start, None), None);
    }

    #[test]
    fn millis_round_trip() {
        let parsed = parse_timestamp("2020-01-01 00:00:30").unwrap();
        assert_eq!(from_millis(to_millis(parsed)), Some(parsed));
    }
}
