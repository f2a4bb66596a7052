//! ED vital signs: range validation, row dropping, pain forward-fill.

use std::sync::Arc;

use anyhow::Result;
use polars::prelude::DataFrame;
use tracing::{debug, warn};

use edprep_model::TableKind;
use edprep_standards::{PAIN_COLUMN, VitalBounds};

use crate::columns::{
    filter_rows, has_column, numeric_column_f64, set_f64_column, set_text_column, text_column,
};

use super::TableProcessor;
use super::common::require_column;

pub struct VitalSignsProcessor {
    bounds: Arc<VitalBounds>,
}

impl VitalSignsProcessor {
    pub fn new(bounds: Arc<VitalBounds>) -> Self {
        Self { bounds }
    }
}

/// Fill gaps with the most recent earlier value, in slice order. Leading
/// gaps stay empty.
pub fn forward_fill(values: &mut [Option<String>]) {
    let mut last: Option<String> = None;
    for value in values.iter_mut() {
        if value.is_some() {
            last.clone_from(value);
        } else {
            value.clone_from(&last);
        }
    }
}

impl TableProcessor for VitalSignsProcessor {
    fn table_name(&self) -> &'static str {
        TableKind::VitalSigns.as_str()
    }

    fn description(&self) -> &'static str {
        "Vital-sign range validation and pain forward-fill"
    }

    /// Out-of-range vitals become missing, rows missing any vital are
    /// dropped, then missing pain scores are forward-filled. The fill runs
    /// over the remaining rows in their input order, so callers must not
    /// reorder the frame beforehand.
    fn process(&self, df: &mut DataFrame) -> Result<()> {
        let table = self.table_name();
        let mut keep = vec![true; df.height()];
        for bound in self.bounds.iter() {
            require_column(df, table, bound.column)?;
            let mut out_of_range = 0usize;
            let values: Vec<Option<f64>> = numeric_column_f64(df, bound.column)?
                .into_iter()
                .map(|value| match value {
                    Some(v) if !bound.contains(v) => {
                        out_of_range += 1;
                        None
                    }
                    other => other,
                })
                .collect();
            for (flag, value) in keep.iter_mut().zip(&values) {
                *flag &= value.is_some();
            }
            if out_of_range > 0 {
                debug!(column = bound.column, out_of_range, "vital outside plausible range");
            }
            set_f64_column(df, bound.column, values)?;
        }

        let dropped = keep.iter().filter(|keep| !**keep).count();
        if dropped > 0 {
            warn!(
                table = %table,
                dropped_count = dropped,
                "vital-sign rows with missing or out-of-range values dropped"
            );
            filter_rows(df, &keep)?;
        }

        if has_column(df, PAIN_COLUMN) {
            let mut pain = text_column(df, PAIN_COLUMN)?;
            forward_fill(&mut pain);
            set_text_column(df, PAIN_COLUMN, pain)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_fill_keeps_leading_gaps() {
        let mut values = vec![
            None,
            Some("3".to_string()),
            None,
            None,
            Some("7".to_string()),
            None,
        ];
        forward_fill(&mut values);
        assert_eq!(
            values,
            vec![
                None,
                Some("3".to_string()),
                Some("3".to_string()),
                Some("3".to_string()),
                Some("7".to_string()),
                Some("7".to_string()),
            ]
        );
    }
}
