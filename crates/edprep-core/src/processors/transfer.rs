//! Intra-hospital transfers.

use std::sync::Arc;

use anyhow::Result;
use polars::prelude::DataFrame;
use tracing::warn;

use edprep_model::{CareUnitGroup, TableKind};
use edprep_standards::CareUnitMapping;

use crate::columns::{filter_rows, map_to_group, set_f64_column, text_column};
use crate::datetime::{datetime_column, hours_between, set_datetime_column};

use super::TableProcessor;
use super::common::{parse_datetime_columns, require_column};

pub const LOS_COLUMN: &str = "los";

const DISCHARGE_EVENT: &str = "discharge";

pub struct TransferProcessor {
    care_units: Arc<CareUnitMapping>,
}

impl TransferProcessor {
    pub fn new(care_units: Arc<CareUnitMapping>) -> Self {
        Self { care_units }
    }
}

impl TableProcessor for TransferProcessor {
    fn table_name(&self) -> &'static str {
        TableKind::Transfers.as_str()
    }

    fn description(&self) -> &'static str {
        "Transfer length of stay, care-unit groups, discharge events"
    }

    fn process(&self, df: &mut DataFrame) -> Result<()> {
        let table = self.table_name();
        for column in ["intime", "outtime", "eventtype", "careunit"] {
            require_column(df, table, column)?;
        }
        parse_datetime_columns(df, table, &["intime", "outtime"])?;

        let (intimes, _) = datetime_column(df, "intime")?;
        let (mut outtimes, _) = datetime_column(df, "outtime")?;
        let events = text_column(df, "eventtype")?;
        let mut los: Vec<Option<f64>> = Vec::with_capacity(df.height());
        for (idx, event) in events.iter().enumerate() {
            let is_discharge = event
                .as_deref()
                .is_some_and(|event| event.eq_ignore_ascii_case(DISCHARGE_EVENT));
            if is_discharge {
                // A discharge has no duration.
                outtimes[idx] = intimes[idx];
                los.push(Some(0.0));
            } else {
                los.push(hours_between(intimes[idx], outtimes[idx]));
            }
        }
        let keep: Vec<bool> = los.iter().map(Option::is_some).collect();
        set_datetime_column(df, "outtime", outtimes)?;
        set_f64_column(df, LOS_COLUMN, los)?;

        let care_units = &self.care_units;
        map_to_group(
            df,
            "careunit",
            |unit| care_units.get(unit).map(|group| group.as_str().to_string()),
            CareUnitGroup::ObservationOther.as_str(),
        )?;

        let dropped = keep.iter().filter(|keep| !**keep).count();
        if dropped > 0 {
            warn!(
                table = %table,
                dropped_count = dropped,
                "transfer rows without a length of stay dropped"
            );
            filter_rows(df, &keep)?;
        }
        Ok(())
    }
}
