//! Diagnosis code classification across ICD-9 and ICD-10.

use edprep_model::{Classification, IcdVersion};
use edprep_standards::{CategoryTaxonomy, Icd10Reference, Icd9Reference, letter_code};

use crate::range_map::RangeMap;

/// Lookup results for one code before the taxonomy is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCode {
    /// First three characters of the trimmed code.
    pub category_code: String,
    /// Chapter name from the reference table or the chapter ranges.
    pub chapter: Option<String>,
    /// Fine-grained label, `None` when the reference table has no entry.
    pub subcategory: Option<String>,
}

/// Classifies codes from either ICD generation into one taxonomy.
#[derive(Debug, Clone)]
pub struct CodeClassifier {
    icd9_blocks: RangeMap,
    icd9: Icd9Reference,
    icd10: Icd10Reference,
    taxonomy: CategoryTaxonomy,
}

fn category_code(code: &str) -> String {
    code.trim().chars().take(3).collect()
}

/// Key for the chapter ranges. ICD-9 external-cause codes (`E000`-`E999`)
/// have four-character categories; everything else uses three.
fn chapter_key(code: &str) -> String {
    let code = code.trim();
    let len = if code.starts_with(['E', 'e']) { 4 } else { 3 };
    code.chars().take(len).collect()
}

impl CodeClassifier {
    pub fn new(
        icd9_blocks: RangeMap,
        icd9: Icd9Reference,
        icd10: Icd10Reference,
        taxonomy: CategoryTaxonomy,
    ) -> Self {
        Self {
            icd9_blocks,
            icd9,
            icd10,
            taxonomy,
        }
    }

    pub fn taxonomy(&self) -> &CategoryTaxonomy {
        &self.taxonomy
    }

    /// Look up chapter and subcategory without applying the taxonomy.
    ///
    /// ICD-9 codes match the reference table exactly on their category code;
    /// the chapter falls back to the chapter ranges (possibly `"Unknown"`).
    /// ICD-10 codes match on their first two characters only.
    pub fn resolve(&self, code: &str, version: IcdVersion) -> ResolvedCode {
        let category_code = category_code(code);
        match version {
            IcdVersion::Icd9 => {
                let entry = self.icd9.get(&category_code);
                let chapter = entry
                    .and_then(|entry| entry.category.clone())
                    .unwrap_or_else(|| {
                        self.icd9_blocks.lookup(&chapter_key(code)).to_string()
                    });
                ResolvedCode {
                    chapter: Some(chapter),
                    subcategory: entry.and_then(|entry| entry.subcategory.clone()),
                    category_code,
                }
            }
            IcdVersion::Icd10 => {
                let block = self.icd10.get(&letter_code(&category_code));
                ResolvedCode {
                    chapter: block.and_then(|block| block.category.clone()),
                    subcategory: block.and_then(|block| block.block_title.clone()),
                    category_code,
                }
            }
        }
    }

    /// Classify a single code. Category and subcategory are always set:
    /// unmapped chapters and missing subcategories are `"Other"`.
    pub fn classify(&self, code: &str, version: IcdVersion) -> Classification {
        let resolved = self.resolve(code, version);
        Classification {
            category: self.taxonomy.resolve(resolved.chapter.as_deref()).to_string(),
            subcategory: resolved
                .subcategory
                .unwrap_or_else(|| Classification::FALLBACK.to_string()),
            category_code: resolved.category_code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edprep_standards::{Icd9Entry, default_icd9_blocks};

    fn classifier() -> CodeClassifier {
        let icd9 = Icd9Reference::from_entries([
            (
                "410".to_string(),
                Icd9Entry {
                    subcategory: Some("Acute myocardial infarction".to_string()),
                    category: None,
                },
            ),
            (
                "V58".to_string(),
                Icd9Entry {
                    subcategory: Some("Encounter for other procedures".to_string()),
                    category: Some("Injury And Poisoning".to_string()),
                },
            ),
        ]);
        let icd10 = Icd10Reference::from_rows([(
            "I20-I25",
            "Diseases of the circulatory system",
            "Ischaemic heart diseases",
        )]);
        CodeClassifier::new(
            RangeMap::from_blocks(&default_icd9_blocks()).unwrap(),
            icd9,
            icd10,
            CategoryTaxonomy::default(),
        )
    }

    #[test]
    fn icd9_uses_chapter_ranges_and_reference_subcategory() {
        let result = classifier().classify("41071", IcdVersion::Icd9);
        assert_eq!(result.category_code, "410");
        assert_eq!(result.category, "Circulatory System");
        assert_eq!(result.subcategory, "Acute myocardial infarction");
    }

    #[test]
    fn icd9_reference_category_overrides_ranges() {
        let result = classifier().classify("V5861", IcdVersion::Icd9);
        assert_eq!(result.category, "Injury & Poisoning");
    }

    #[test]
    fn icd9_without_reference_entry_falls_back() {
        let result = classifier().classify("4019", IcdVersion::Icd9);
        assert_eq!(result.category, "Circulatory System");
        assert_eq!(result.subcategory, "Other");

        let unknown = classifier().classify("V9999", IcdVersion::Icd9);
        assert_eq!(unknown.category, "Other");
        assert_eq!(unknown.subcategory, "Other");
    }

    #[test]
    fn icd9_external_cause_codes_use_four_character_chapter_key() {
        let mut blocks = RangeMap::new();
        blocks.insert("Injury And Poisoning", &["E000-E999"]).unwrap();
        let classifier = CodeClassifier::new(
            blocks,
            Icd9Reference::default(),
            Icd10Reference::default(),
            CategoryTaxonomy::default(),
        );
        for code in ["E0000", "E0090", "E8889"] {
            let result = classifier.classify(code, IcdVersion::Icd9);
            assert_eq!(result.category, "Injury & Poisoning", "{code}");
        }
        assert_eq!(classifier.resolve("E0000", IcdVersion::Icd9).category_code, "E00");
        assert_eq!(chapter_key(" 41071 "), "410");
    }

    #[test]
    fn icd10_uses_two_character_prefix() {
        let classifier = classifier();
        let a = classifier.classify("I214", IcdVersion::Icd10);
        let b = classifier.classify("I2510", IcdVersion::Icd10);
        assert_eq!(a.category, "Circulatory System");
        assert_eq!(a.subcategory, "Ischaemic heart diseases");
        assert_eq!((a.category, a.subcategory), (b.category, b.subcategory));
        assert_eq!(b.category_code, "I25");
    }

    #[test]
    fn icd10_without_block_is_other() {
        let result = classifier().classify("Z0000", IcdVersion::Icd10);
        assert_eq!(result.category, "Other");
        assert_eq!(result.subcategory, "Other");
    }
}
