//! Diagnosis table classification and reconciliation.

use std::sync::Arc;

use anyhow::Result;
use polars::prelude::{DataFrame, IdxCa, IdxSize};
use tracing::{debug, warn};

use edprep_model::{Classification, IcdVersion, TableKind};

use crate::classifier::CodeClassifier;
use crate::columns::{
    drop_columns, numeric_column_i64, require_column, set_text_column, text_column,
};

const CODE_COLUMN: &str = "icd_code";
const VERSION_COLUMN: &str = "icd_version";

/// Working and free-text columns removed from the unified table.
const DROPPED_COLUMNS: &[&str] = &[
    "seq_num",
    "description",
    "subcategory_icd9",
    "subcategory_icd10",
    "icd_code_icd9",
];

/// Splits a diagnosis table by ICD version, classifies every code, and
/// reassembles one table with `category_code`, `category` and `subcategory`.
///
/// Output rows are the ICD-9 partition followed by the ICD-10 partition,
/// each in input order. Rows whose version is neither 9 nor 10 belong to
/// neither partition and are dropped.
#[derive(Debug, Clone)]
pub struct DiagnosisTransformer {
    classifier: Arc<CodeClassifier>,
}

impl DiagnosisTransformer {
    pub fn new(classifier: Arc<CodeClassifier>) -> Self {
        Self { classifier }
    }

    pub fn classifier(&self) -> &CodeClassifier {
        &self.classifier
    }

    pub fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        let table = TableKind::Diagnosis.as_str();
        require_column(df, table, CODE_COLUMN)?;
        require_column(df, table, VERSION_COLUMN)?;

        let versions: Vec<Option<IcdVersion>> = numeric_column_i64(df, VERSION_COLUMN)?
            .into_iter()
            .map(|version| version.and_then(IcdVersion::from_number))
            .collect();
        let mut icd9_rows = Vec::new();
        let mut icd10_rows = Vec::new();
        for (idx, version) in versions.iter().enumerate() {
            match version {
                Some(IcdVersion::Icd9) => icd9_rows.push(idx as IdxSize),
                Some(IcdVersion::Icd10) => icd10_rows.push(idx as IdxSize),
                None => {}
            }
        }
        let excluded = df.height() - icd9_rows.len() - icd10_rows.len();
        if excluded > 0 {
            warn!(
                table = %table,
                dropped_count = excluded,
                "diagnosis rows with an ICD version other than 9 or 10 excluded"
            );
        }
        debug!(
            icd9 = icd9_rows.len(),
            icd10 = icd10_rows.len(),
            "partitioned diagnosis rows"
        );

        let icd9_count = icd9_rows.len();
        let mut order = icd9_rows;
        order.extend(icd10_rows);
        let indices = IdxCa::from_vec("idx".into(), order);
        let mut out = df.take(&indices)?;

        let codes = text_column(&out, CODE_COLUMN)?;
        let mut category_codes = Vec::with_capacity(codes.len());
        let mut chapters = Vec::with_capacity(codes.len());
        let mut subcategory_icd9 = Vec::with_capacity(codes.len());
        let mut subcategory_icd10 = Vec::with_capacity(codes.len());
        for (row, code) in codes.iter().enumerate() {
            let version = if row < icd9_count {
                IcdVersion::Icd9
            } else {
                IcdVersion::Icd10
            };
            let Some(code) = code else {
                category_codes.push(None);
                chapters.push(None);
                subcategory_icd9.push(None);
                subcategory_icd10.push(None);
                continue;
            };
            let resolved = self.classifier.resolve(code, version);
            category_codes.push(Some(resolved.category_code));
            chapters.push(resolved.chapter);
            match version {
                IcdVersion::Icd9 => {
                    subcategory_icd9.push(resolved.subcategory);
                    subcategory_icd10.push(None);
                }
                IcdVersion::Icd10 => {
                    subcategory_icd9.push(None);
                    subcategory_icd10.push(resolved.subcategory);
                }
            }
        }

        let taxonomy = self.classifier.taxonomy();
        let categories: Vec<Option<String>> = chapters
            .iter()
            .map(|chapter| Some(taxonomy.resolve(chapter.as_deref()).to_string()))
            .collect();
        let subcategories: Vec<Option<String>> = subcategory_icd9
            .into_iter()
            .zip(subcategory_icd10)
            .map(|(icd9, icd10)| {
                Some(icd9.or(icd10).unwrap_or_else(|| Classification::FALLBACK.to_string()))
            })
            .collect();

        set_text_column(&mut out, "category_code", category_codes)?;
        set_text_column(&mut out, "category", categories)?;
        set_text_column(&mut out, "subcategory", subcategories)?;
        let dropped = drop_columns(&mut out, DROPPED_COLUMNS)?;
        if !dropped.is_empty() {
            debug!(columns = ?dropped, "dropped diagnosis working columns");
        }
        Ok(out)
    }
}
