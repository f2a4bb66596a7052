//! ICD-10 block reference, keyed by two-character letter code.

use std::collections::HashMap;
use std::path::Path;

use tracing::debug;

use crate::csv_utils::{get_field, get_optional, read_csv_rows, require_columns};
use crate::error::StandardsError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Icd10Block {
    pub category: Option<String>,
    pub block_title: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Icd10Reference {
    by_letter_code: HashMap<String, Icd10Block>,
}

/// First two characters of a code or block code.
pub fn letter_code(code: &str) -> String {
    code.trim().chars().take(2).collect()
}

impl Icd10Reference {
    /// Load the ICD-10 reference CSV (`block_code`, `category`, `block_title`).
    ///
    /// Rows are deduplicated on letter code; the first occurrence wins.
    pub fn load(path: &Path) -> Result<Self, StandardsError> {
        let rows = read_csv_rows(path)?;
        require_columns(path, &rows, &["block_code", "category", "block_title"])?;
        let mut by_letter_code = HashMap::new();
        for row in &rows {
            let key = letter_code(&get_field(row, "block_code"));
            if key.is_empty() {
                continue;
            }
            by_letter_code.entry(key).or_insert_with(|| Icd10Block {
                category: get_optional(row, "category"),
                block_title: get_optional(row, "block_title"),
            });
        }
        debug!(
            path = %path.display(),
            rows = rows.len(),
            letter_codes = by_letter_code.len(),
            "loaded ICD-10 reference"
        );
        Ok(Self { by_letter_code })
    }

    /// Build from `(block_code, category, block_title)` rows, first row per
    /// letter code wins.
    pub fn from_rows<'a>(rows: impl IntoIterator<Item = (&'a str, &'a str, &'a str)>) -> Self {
        let mut by_letter_code = HashMap::new();
        for (block_code, category, block_title) in rows {
            by_letter_code
                .entry(letter_code(block_code))
                .or_insert_with(|| Icd10Block {
                    category: Some(category.to_string()),
                    block_title: Some(block_title.to_string()),
                });
        }
        Self { by_letter_code }
    }

    pub fn get(&self, letter_code: &str) -> Option<&Icd10Block> {
        self.by_letter_code.get(letter_code)
    }

    pub fn len(&self) -> usize {
        self.by_letter_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_letter_code.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_block_per_letter_code_wins() {
        let reference = Icd10Reference::from_rows([
            ("I10-I16", "Diseases of the circulatory system", "Hypertensive diseases"),
            ("I11-I13", "Neoplasms", "Something else"),
            ("I20-I25", "Diseases of the circulatory system", "Ischaemic heart diseases"),
        ]);
        assert_eq!(reference.len(), 2);
        let block = reference.get("I1").expect("I1 block");
        assert_eq!(block.block_title.as_deref(), Some("Hypertensive diseases"));
        assert_eq!(
            block.category.as_deref(),
            Some("Diseases of the circulatory system")
        );
        assert!(reference.get("I3").is_none());
    }
}
