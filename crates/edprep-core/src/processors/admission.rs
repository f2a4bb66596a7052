//! Hospital admissions.

use std::sync::Arc;

use anyhow::Result;
use polars::prelude::DataFrame;
use tracing::{debug, info};

use edprep_model::TableKind;
use edprep_standards::RaceMapping;

use crate::columns::{drop_columns, fill_missing, has_column, impute_mode};

use super::TableProcessor;
use super::common::{
    derive_los_hours, flag_present, group_race, normalize_gender, parse_datetime_columns,
    require_column,
};

pub const ADMISSION_LOS_COLUMN: &str = "admission_los_hours";

const TIMESTAMP_COLUMNS: &[&str] = &["admittime", "dischtime", "edregtime", "edouttime", "deathtime"];

/// Categorical columns whose gaps are filled with the column mode.
const MODE_IMPUTED_COLUMNS: &[&str] = &["insurance", "marital_status", "language", "admission_location"];

const DROPPED_COLUMNS: &[&str] = &["admit_provider_id"];

pub struct AdmissionProcessor {
    race: Arc<RaceMapping>,
}

impl AdmissionProcessor {
    pub fn new(race: Arc<RaceMapping>) -> Self {
        Self { race }
    }
}

impl TableProcessor for AdmissionProcessor {
    fn table_name(&self) -> &'static str {
        TableKind::Admissions.as_str()
    }

    fn description(&self) -> &'static str {
        "Admission length of stay, mode imputation, death flag"
    }

    fn process(&self, df: &mut DataFrame) -> Result<()> {
        let table = self.table_name();
        require_column(df, table, "admittime")?;
        require_column(df, table, "dischtime")?;

        parse_datetime_columns(df, table, TIMESTAMP_COLUMNS)?;
        derive_los_hours(df, "admittime", "dischtime", ADMISSION_LOS_COLUMN)?;
        group_race(df, table, &self.race)?;
        normalize_gender(df)?;

        if has_column(df, "discharge_location") {
            let filled = fill_missing(df, "discharge_location", "Unknown")?;
            debug!(filled, "missing discharge_location set to Unknown");
        }
        for column in MODE_IMPUTED_COLUMNS {
            if !has_column(df, column) {
                continue;
            }
            let filled = impute_mode(df, column)?;
            if filled > 0 {
                info!(table = %table, column = %column, filled, "imputed missing values with mode");
            }
        }

        flag_present(df, "deathtime", "is_dead")?;
        drop_columns(df, DROPPED_COLUMNS)?;
        Ok(())
    }
}
