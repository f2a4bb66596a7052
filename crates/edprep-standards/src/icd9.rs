//! ICD-9 reference data: chapter ranges and the category-code lookup.

use std::collections::HashMap;
use std::path::Path;

use tracing::debug;

use crate::csv_utils::{get_field, get_optional, read_csv_rows, require_columns};
use crate::error::StandardsError;

/// ICD-9-CM chapters as `(name, range expression)`, in lookup order.
///
/// Names are the ICD-9 keys of the category taxonomy; the two supplementary
/// chapters have no taxonomy entry and resolve to `"Other"`.
pub const ICD9_CHAPTERS: &[(&str, &str)] = &[
    ("Infectious And Parasitic Diseases", "001-139"),
    ("Neoplasms", "140-239"),
    (
        "Endocrine, Nutritional And Metabolic Diseases, And Immunity Disorders",
        "240-279",
    ),
    ("Diseases Of Blood And Blood-Forming Organs", "280-289"),
    ("Mental Disorders", "290-319"),
    ("Diseases Of The Nervous System And Sense Organs", "320-389"),
    ("Diseases Of The Circulatory System", "390-459"),
    ("Diseases Of The Respiratory System", "460-519"),
    ("Diseases Of The Digestive System", "520-579"),
    ("Diseases Of The Genitourinary System", "580-629"),
    (
        "Complications Of Pregnancy, Childbirth, And The Puerperium",
        "630-679",
    ),
    ("Diseases Of The Skin And Subcutaneous Tissue", "680-709"),
    (
        "Diseases Of The Musculoskeletal System And Connective Tissue",
        "710-739",
    ),
    ("Congenital Anomalies", "740-759"),
    ("Certain Conditions Originating In The Perinatal Period", "760-779"),
    ("Symptoms, Signs, And Ill-Defined Conditions", "780-799"),
    ("Injury And Poisoning", "800-999"),
    (
        "Supplementary Classification Of Factors Influencing Health Status And Contact With Health Services",
        "V01-V91",
    ),
    // E-codes are matched on their four-character category.
    (
        "Supplementary Classification Of External Causes Of Injury And Poisoning",
        "E000-E999",
    ),
];

/// A named disease group with one or more range expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockDefinition {
    pub name: String,
    pub ranges: Vec<String>,
}

/// The built-in ICD-9 chapter blocks.
pub fn default_icd9_blocks() -> Vec<BlockDefinition> {
    ICD9_CHAPTERS
        .iter()
        .map(|(name, range)| BlockDefinition {
            name: (*name).to_string(),
            ranges: vec![(*range).to_string()],
        })
        .collect()
}

/// Load replacement chapter blocks from a CSV with `name` and `ranges`
/// columns. Multiple ranges in one cell are separated by `;`.
pub fn load_icd9_blocks(path: &Path) -> Result<Vec<BlockDefinition>, StandardsError> {
    let rows = read_csv_rows(path)?;
    require_columns(path, &rows, &["name", "ranges"])?;
    let mut blocks = Vec::with_capacity(rows.len());
    for row in &rows {
        let name = get_field(row, "name");
        let ranges: Vec<String> = get_field(row, "ranges")
            .split(';')
            .map(str::trim)
            .filter(|range| !range.is_empty())
            .map(str::to_string)
            .collect();
        if name.is_empty() || ranges.is_empty() {
            return Err(StandardsError::InvalidRange {
                expression: format!("{name}:{}", get_field(row, "ranges")),
            });
        }
        blocks.push(BlockDefinition { name, ranges });
    }
    debug!(path = %path.display(), blocks = blocks.len(), "loaded ICD-9 block overrides");
    Ok(blocks)
}

/// One row of the ICD-9 reference table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Icd9Entry {
    pub subcategory: Option<String>,
    /// Chapter name, when the reference table carries one.
    pub category: Option<String>,
}

/// ICD-9 category code -> reference entry.
#[derive(Debug, Clone, Default)]
pub struct Icd9Reference {
    entries: HashMap<String, Icd9Entry>,
}

impl Icd9Reference {
    /// Load the ICD-9 reference CSV (`icd_code`, `subcategory`, optional
    /// `category`). The first row for a code wins.
    pub fn load(path: &Path) -> Result<Self, StandardsError> {
        let rows = read_csv_rows(path)?;
        require_columns(path, &rows, &["icd_code", "subcategory"])?;
        let mut entries = HashMap::with_capacity(rows.len());
        for row in &rows {
            let code = get_field(row, "icd_code");
            if code.is_empty() {
                continue;
            }
            entries.entry(code).or_insert_with(|| Icd9Entry {
                subcategory: get_optional(row, "subcategory"),
                category: get_optional(row, "category"),
            });
        }
        debug!(path = %path.display(), codes = entries.len(), "loaded ICD-9 reference");
        Ok(Self { entries })
    }

    pub fn from_entries(entries: impl IntoIterator<Item = (String, Icd9Entry)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Exact match on the three-character category code.
    pub fn get(&self, category_code: &str) -> Option<&Icd9Entry> {
        self.entries.get(category_code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::CATEGORY_TABLE;

    #[test]
    fn clinical_chapters_are_taxonomy_keys() {
        let clinical = &ICD9_CHAPTERS[..ICD9_CHAPTERS.len() - 2];
        for (name, _) in clinical {
            assert!(
                CATEGORY_TABLE.iter().any(|(key, _)| key == name),
                "{name} missing from taxonomy"
            );
        }
    }

    #[test]
    fn default_blocks_have_one_range_each() {
        let blocks = default_icd9_blocks();
        assert_eq!(blocks.len(), 19);
        assert!(blocks.iter().all(|block| block.ranges.len() == 1));
        assert_eq!(blocks[6].ranges[0], "390-459");
    }
}
