//! ED stays: timestamps, ED length of stay, race groups, admission flag.

use std::sync::Arc;

use anyhow::Result;
use polars::prelude::DataFrame;

use edprep_model::TableKind;
use edprep_standards::RaceMapping;

use super::TableProcessor;
use super::common::{
    derive_los_hours, flag_present, group_race, normalize_gender, parse_datetime_columns,
    require_column,
};

pub const ED_LOS_COLUMN: &str = "ed_los_hours";

pub struct EdStayProcessor {
    race: Arc<RaceMapping>,
}

impl EdStayProcessor {
    pub fn new(race: Arc<RaceMapping>) -> Self {
        Self { race }
    }
}

impl TableProcessor for EdStayProcessor {
    fn table_name(&self) -> &'static str {
        TableKind::EdStays.as_str()
    }

    fn description(&self) -> &'static str {
        "ED length of stay, race groups, admitted flag"
    }

    fn process(&self, df: &mut DataFrame) -> Result<()> {
        let table = self.table_name();
        for column in ["intime", "outtime", "hadm_id"] {
            require_column(df, table, column)?;
        }
        parse_datetime_columns(df, table, &["intime", "outtime"])?;
        derive_los_hours(df, "intime", "outtime", ED_LOS_COLUMN)?;
        group_race(df, table, &self.race)?;
        normalize_gender(df)?;
        flag_present(df, "hadm_id", "admitted")?;
        Ok(())
    }
}
