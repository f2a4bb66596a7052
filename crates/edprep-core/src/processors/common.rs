use anyhow::Result;
use polars::prelude::DataFrame;
use tracing::warn;

use edprep_model::{Gender, RaceGroup};
use edprep_standards::RaceMapping;

use crate::columns::{has_column, set_text_column, text_column};

pub(super) use crate::columns::{presence_flags, require_column, set_bool_column};
pub(super) use crate::datetime::{derive_los_hours, parse_datetime_columns};

/// Replace raw race values with their group label. Nulls stay null.
pub(super) fn group_race(df: &mut DataFrame, table: &str, mapping: &RaceMapping) -> Result<()> {
    if !has_column(df, "race") {
        return Ok(());
    }
    let mut unmapped = 0usize;
    let grouped: Vec<Option<String>> = text_column(df, "race")?
        .iter()
        .map(|value| {
            value.as_deref().map(|raw| {
                let group = mapping.group(raw);
                if group == RaceGroup::Unmapped {
                    unmapped += 1;
                }
                group.as_str().to_string()
            })
        })
        .collect();
    if unmapped > 0 {
        warn!(
            table = %table,
            unmapped_count = unmapped,
            "race values outside the race table marked Unmapped"
        );
    }
    set_text_column(df, "race", grouped)
}

/// Normalize `gender` to `F`, `M` or `U`. Nulls stay null.
pub(super) fn normalize_gender(df: &mut DataFrame) -> Result<()> {
    if !has_column(df, "gender") {
        return Ok(());
    }
    let normalized: Vec<Option<String>> = text_column(df, "gender")?
        .iter()
        .map(|value| {
            value
                .as_deref()
                .map(|raw| Gender::parse(raw).as_str().to_string())
        })
        .collect();
    set_text_column(df, "gender", normalized)
}

/// Write `target` as `true` where `source` holds a value. An absent source
/// column yields all `false`.
pub(super) fn flag_present(df: &mut DataFrame, source: &str, target: &str) -> Result<()> {
    let flags = if has_column(df, source) {
        presence_flags(df, source)?
    } else {
        vec![false; df.height()]
    };
    set_bool_column(df, target, flags)
}
