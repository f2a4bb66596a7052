//! ED triage: chief-complaint topics and acuity validation.

use std::sync::Arc;

use anyhow::{Result, ensure};
use polars::prelude::DataFrame;
use tracing::{debug, warn};

use edprep_model::{EdprepError, TableKind, TopicLabel};

use crate::columns::{
    drop_columns, has_column, numeric_column_i64, set_i64_column, set_text_column, text_column,
};
use crate::text::{TopicLabeler, tokenize_complaint};

use super::TableProcessor;

const COMPLAINT_COLUMN: &str = "chiefcomplaint";
pub const TOPIC_COLUMN: &str = "topic";
pub const TOPIC_LABEL_COLUMN: &str = "topic_label";

/// Highest triage acuity level.
const MAX_ACUITY: i64 = 5;

pub struct TriageProcessor {
    labeler: Arc<dyn TopicLabeler>,
}

impl TriageProcessor {
    pub fn new(labeler: Arc<dyn TopicLabeler>) -> Self {
        Self { labeler }
    }

    fn assign_topics(&self, df: &mut DataFrame) -> Result<()> {
        let documents: Vec<Vec<String>> = text_column(df, COMPLAINT_COLUMN)?
            .iter()
            .map(|text| text.as_deref().map(tokenize_complaint).unwrap_or_default())
            .collect();
        let topic_ids = self.labeler.label_topics(&documents)?;
        ensure!(
            topic_ids.len() == documents.len(),
            "topic labeler returned {} topics for {} documents",
            topic_ids.len(),
            documents.len()
        );

        let mut unlabeled = 0usize;
        let labels: Vec<Option<TopicLabel>> = topic_ids
            .into_iter()
            .map(|id| {
                let label = id.and_then(TopicLabel::from_topic_id);
                if label.is_none() {
                    unlabeled += 1;
                }
                label
            })
            .collect();
        if unlabeled > 0 {
            warn!(unlabeled_count = unlabeled, "triage rows without a topic");
        }

        let ordinals = labels.iter().map(|label| label.map(|l| l.ordinal())).collect();
        let names = labels
            .iter()
            .map(|label| label.map(|l| l.as_str().to_string()))
            .collect();
        set_i64_column(df, TOPIC_COLUMN, ordinals)?;
        set_text_column(df, TOPIC_LABEL_COLUMN, names)?;
        drop_columns(df, &[COMPLAINT_COLUMN])?;
        Ok(())
    }
}

impl TableProcessor for TriageProcessor {
    fn table_name(&self) -> &'static str {
        TableKind::Triage.as_str()
    }

    fn description(&self) -> &'static str {
        "Chief-complaint topics and ordinal acuity"
    }

    fn process(&self, df: &mut DataFrame) -> Result<()> {
        if has_column(df, COMPLAINT_COLUMN) {
            self.assign_topics(df)?;
        } else if has_column(df, TOPIC_COLUMN) {
            debug!("topics already assigned");
        } else {
            return Err(EdprepError::MissingColumn {
                table: self.table_name().to_string(),
                column: COMPLAINT_COLUMN.to_string(),
            }
            .into());
        }

        if has_column(df, "acuity") {
            let acuity: Vec<Option<i64>> = numeric_column_i64(df, "acuity")?
                .into_iter()
                .map(|level| level.filter(|level| (1..=MAX_ACUITY).contains(level)))
                .collect();
            set_i64_column(df, "acuity", acuity)?;
        }
        Ok(())
    }
}
