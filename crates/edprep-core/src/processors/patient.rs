//! Patients: date of death and death flag.

use anyhow::Result;
use polars::prelude::DataFrame;

use edprep_model::TableKind;

use super::TableProcessor;
use super::common::{flag_present, parse_datetime_columns, require_column};

pub struct PatientProcessor;

impl TableProcessor for PatientProcessor {
    fn table_name(&self) -> &'static str {
        TableKind::Patients.as_str()
    }

    fn description(&self) -> &'static str {
        "Date of death and death flag"
    }

    fn process(&self, df: &mut DataFrame) -> Result<()> {
        let table = self.table_name();
        require_column(df, table, "dod")?;
        parse_datetime_columns(df, table, &["dod"])?;
        flag_present(df, "dod", "is_dead")
    }
}
