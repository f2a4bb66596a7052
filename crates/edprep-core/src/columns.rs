//! Column helpers shared by the table processors.
//!
//! Processors read a column into a plain `Vec`, transform it in Rust and
//! write it back with `with_column`, which replaces an existing column of
//! the same name or appends a new one.

use std::collections::BTreeMap;

use anyhow::Result;
use polars::prelude::{AnyValue, BooleanChunked, DataFrame, NamedFrom, NewChunkedArray, Series};

use edprep_common::{any_to_f64, any_to_i64, any_to_text};
use edprep_model::EdprepError;

pub fn has_column(df: &DataFrame, name: &str) -> bool {
    df.column(name).is_ok()
}

pub fn require_column(df: &DataFrame, table: &str, name: &str) -> Result<(), EdprepError> {
    if has_column(df, name) {
        Ok(())
    } else {
        Err(EdprepError::MissingColumn {
            table: table.to_string(),
            column: name.to_string(),
        })
    }
}

/// Trimmed text values; nulls and blanks are `None`.
pub fn text_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let series = df.column(name)?;
    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        values.push(any_to_text(series.get(idx).unwrap_or(AnyValue::Null)));
    }
    Ok(values)
}

pub fn numeric_column_f64(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let series = df.column(name)?;
    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        values.push(any_to_f64(series.get(idx).unwrap_or(AnyValue::Null)));
    }
    Ok(values)
}

pub fn numeric_column_i64(df: &DataFrame, name: &str) -> Result<Vec<Option<i64>>> {
    let series = df.column(name)?;
    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        values.push(any_to_i64(series.get(idx).unwrap_or(AnyValue::Null)));
    }
    Ok(values)
}

pub fn set_text_column(df: &mut DataFrame, name: &str, values: Vec<Option<String>>) -> Result<()> {
    let series = Series::new(name.into(), values);
    df.with_column(series)?;
    Ok(())
}

pub fn set_f64_column(df: &mut DataFrame, name: &str, values: Vec<Option<f64>>) -> Result<()> {
    let series = Series::new(name.into(), values);
    df.with_column(series)?;
    Ok(())
}

pub fn set_i64_column(df: &mut DataFrame, name: &str, values: Vec<Option<i64>>) -> Result<()> {
    let series = Series::new(name.into(), values);
    df.with_column(series)?;
    Ok(())
}

pub fn set_bool_column(df: &mut DataFrame, name: &str, values: Vec<bool>) -> Result<()> {
    let series = Series::new(name.into(), values);
    df.with_column(series)?;
    Ok(())
}

pub fn filter_rows(df: &mut DataFrame, keep: &[bool]) -> Result<()> {
    let mask = BooleanChunked::from_slice("keep".into(), keep);
    *df = df.filter(&mask)?;
    Ok(())
}

/// Drop each named column that exists; returns the names actually dropped.
pub fn drop_columns(df: &mut DataFrame, names: &[&str]) -> Result<Vec<String>> {
    let mut dropped = Vec::new();
    for name in names {
        if has_column(df, name) {
            df.drop_in_place(name)?;
            dropped.push((*name).to_string());
        }
    }
    Ok(dropped)
}

/// `true` where the column holds a value.
pub fn presence_flags(df: &DataFrame, name: &str) -> Result<Vec<bool>> {
    Ok(text_column(df, name)?
        .iter()
        .map(Option::is_some)
        .collect())
}

/// Most frequent non-missing value. Ties go to the lexicographically
/// smallest value.
pub fn column_mode(column: &str, values: &[Option<String>]) -> Result<String, EdprepError> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for value in values.iter().flatten() {
        *counts.entry(value.as_str()).or_default() += 1;
    }
    let mut best: Option<(&str, usize)> = None;
    for (value, count) in counts {
        if best.is_none_or(|(_, top)| count > top) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value.to_string())
        .ok_or_else(|| EdprepError::UndefinedMode {
            column: column.to_string(),
        })
}

/// Replace missing values with `fill`; returns the number of cells filled.
pub fn fill_missing(df: &mut DataFrame, name: &str, fill: &str) -> Result<usize> {
    let mut values = text_column(df, name)?;
    let mut filled = 0;
    for value in &mut values {
        if value.is_none() {
            *value = Some(fill.to_string());
            filled += 1;
        }
    }
    set_text_column(df, name, values)?;
    Ok(filled)
}

/// Fill missing values with the column's mode; returns the number filled.
///
/// An entirely missing column has no mode and fails with
/// [`EdprepError::UndefinedMode`].
pub fn impute_mode(df: &mut DataFrame, name: &str) -> Result<usize> {
    let values = text_column(df, name)?;
    if values.iter().all(Option::is_some) {
        return Ok(0);
    }
    let mode = column_mode(name, &values)?;
    fill_missing(df, name, &mode)
}

/// Write `<column>_grouped` from a lookup; unmapped and missing values
/// become `fill`.
pub fn map_to_group<F>(df: &mut DataFrame, column: &str, lookup: F, fill: &str) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let grouped: Vec<Option<String>> = text_column(df, column)?
        .iter()
        .map(|value| {
            Some(
                value
                    .as_deref()
                    .and_then(&lookup)
                    .unwrap_or_else(|| fill.to_string()),
            )
        })
        .collect();
    set_text_column(df, &format!("{column}_grouped"), grouped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn text_frame(name: &str, values: &[Option<&str>]) -> DataFrame {
        DataFrame::new(vec![Series::new(name.into(), values).into_column()]).unwrap()
    }

    #[test]
    fn mode_prefers_most_frequent_then_smallest() {
        let values = vec![Some("ES".to_string()), Some("EN".to_string()), None];
        assert_eq!(column_mode("language", &values).unwrap(), "EN");
        let values = vec![
            Some("ES".to_string()),
            Some("ES".to_string()),
            Some("EN".to_string()),
        ];
        assert_eq!(column_mode("language", &values).unwrap(), "ES");
    }

    #[test]
    fn mode_of_missing_column_is_undefined() {
        let err = column_mode("insurance", &[None, None]).unwrap_err();
        assert!(matches!(err, EdprepError::UndefinedMode { .. }));
    }

    #[test]
    fn impute_mode_fills_nulls() {
        let mut df = text_frame("language", &[Some("EN"), Some("EN"), Some("ES"), None]);
        assert_eq!(impute_mode(&mut df, "language").unwrap(), 1);
        let values = text_column(&df, "language").unwrap();
        assert_eq!(values[3].as_deref(), Some("EN"));
    }

    #[test]
    fn map_to_group_uses_fill_for_unmapped_and_missing() {
        let mut df = text_frame("unit", &[Some("A"), Some("B"), None]);
        map_to_group(
            &mut df,
            "unit",
            |value| (value == "A").then(|| "Alpha".to_string()),
            "Other",
        )
        .unwrap();
        let grouped = text_column(&df, "unit_grouped").unwrap();
        assert_eq!(
            grouped,
            vec![
                Some("Alpha".to_string()),
                Some("Other".to_string()),
                Some("Other".to_string())
            ]
        );
    }

    #[test]
    fn drop_columns_skips_absent() {
        let mut df = text_frame("seq_num", &[Some("1")]);
        let dropped = drop_columns(&mut df, &["seq_num", "description"]).unwrap();
        assert_eq!(dropped, vec!["seq_num"]);
        assert_eq!(df.width(), 0);
    }
}
