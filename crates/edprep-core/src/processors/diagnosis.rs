//! Diagnoses: ICD classification into the disease taxonomy.

use std::sync::Arc;

use anyhow::Result;
use polars::prelude::DataFrame;

use edprep_model::TableKind;

use crate::classifier::CodeClassifier;
use crate::diagnosis::DiagnosisTransformer;

use super::TableProcessor;

pub struct DiagnosisProcessor {
    transformer: DiagnosisTransformer,
}

impl DiagnosisProcessor {
    pub fn new(classifier: Arc<CodeClassifier>) -> Self {
        Self {
            transformer: DiagnosisTransformer::new(classifier),
        }
    }
}

impl TableProcessor for DiagnosisProcessor {
    fn table_name(&self) -> &'static str {
        TableKind::Diagnosis.as_str()
    }

    fn description(&self) -> &'static str {
        "ICD-9/ICD-10 classification into disease categories"
    }

    fn process(&self, df: &mut DataFrame) -> Result<()> {
        *df = self.transformer.transform(df)?;
        Ok(())
    }
}
