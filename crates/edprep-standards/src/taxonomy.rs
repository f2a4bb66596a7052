//! Many-to-one mapping from ICD chapter names to coarse disease buckets.
//!
//! Keys span both the ICD-10 and ICD-9 chapter vocabularies. Changing an
//! entry silently changes classification results, so the table is kept
//! verbatim.

use std::collections::HashMap;

use edprep_model::Classification;

pub(crate) const CATEGORY_TABLE: &[(&str, &str)] = &[
    // ICD-10 chapters
    ("Certain infectious and parasitic diseases", "Infectious & Parasitic"),
    ("Neoplasms", "Neoplasms"),
    (
        "Diseases of the blood and blood-forming organs and certain disorders involving the immune mechanism",
        "Blood & Immune System",
    ),
    ("Endocrine, nutritional and metabolic diseases", "Endocrine & Metabolic"),
    ("Mental and behavioural disorders", "Mental & Behavioral"),
    ("Diseases of the nervous system", "Nervous System"),
    ("Diseases of the eye and adnexa", "Eye & Adnexa"),
    ("Diseases of the ear and mastoid process", "Ear & Mastoid"),
    ("Diseases of the circulatory system", "Circulatory System"),
    ("Diseases of the respiratory system", "Respiratory System"),
    ("Diseases of the digestive system", "Digestive System"),
    ("Diseases of the skin and subcutaneous tissue", "Skin & Subcutaneous"),
    (
        "Diseases of the musculoskeletal system and connective tissue",
        "Musculoskeletal & Connective",
    ),
    ("Diseases of the genitourinary system", "Genitourinary System"),
    ("Pregnancy, childbirth and the puerperium", "Pregnancy & Childbirth"),
    ("Certain conditions originating in the perinatal period", "Perinatal Conditions"),
    (
        "Congenital malformations, deformations and chromosomal abnormalities",
        "Congenital & Chromosomal",
    ),
    (
        "Symptoms, signs and abnormal clinical and laboratory findings, not elsewhere classified",
        "Symptoms & Abnormal Findings",
    ),
    (
        "Injury, poisoning and certain other consequences of external causes",
        "Injury & Poisoning",
    ),
    ("External causes of morbidity and mortality", "External Causes"),
    (
        "Factors influencing health status and contact with health services",
        "Health Factors & Services",
    ),
    ("Codes for special purposes", "Special Purposes"),
    // ICD-9 chapters
    ("Infectious And Parasitic Diseases", "Infectious & Parasitic"),
    (
        "Endocrine, Nutritional And Metabolic Diseases, And Immunity Disorders",
        "Endocrine & Metabolic",
    ),
    ("Diseases Of Blood And Blood-Forming Organs", "Blood & Immune System"),
    ("Mental Disorders", "Mental & Behavioral"),
    ("Diseases Of The Nervous System And Sense Organs", "Nervous System"),
    ("Diseases Of The Circulatory System", "Circulatory System"),
    ("Diseases Of The Respiratory System", "Respiratory System"),
    ("Diseases Of The Digestive System", "Digestive System"),
    ("Diseases Of The Genitourinary System", "Genitourinary System"),
    (
        "Complications Of Pregnancy, Childbirth, And The Puerperium",
        "Pregnancy & Childbirth",
    ),
    ("Diseases Of The Skin And Subcutaneous Tissue", "Skin & Subcutaneous"),
    (
        "Diseases Of The Musculoskeletal System And Connective Tissue",
        "Musculoskeletal & Connective",
    ),
    ("Congenital Anomalies", "Congenital & Chromosomal"),
    ("Certain Conditions Originating In The Perinatal Period", "Perinatal Conditions"),
    ("Symptoms, Signs, And Ill-Defined Conditions", "Symptoms & Abnormal Findings"),
    ("Injury And Poisoning", "Injury & Poisoning"),
];

/// Immutable disease-category taxonomy injected into the classifier.
#[derive(Debug, Clone)]
pub struct CategoryTaxonomy {
    buckets: HashMap<String, String>,
}

impl Default for CategoryTaxonomy {
    fn default() -> Self {
        Self::from_entries(CATEGORY_TABLE.iter().copied())
    }
}

impl CategoryTaxonomy {
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            buckets: entries
                .into_iter()
                .map(|(name, bucket)| (name.to_string(), bucket.to_string()))
                .collect(),
        }
    }

    /// Resolve a chapter name to its bucket; anything unmapped is `"Other"`.
    pub fn resolve(&self, chapter: Option<&str>) -> &str {
        chapter
            .and_then(|name| self.buckets.get(name))
            .map_or(Classification::FALLBACK, String::as_str)
    }

    /// Distinct bucket labels, sorted.
    pub fn buckets(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = self.buckets.values().map(String::as_str).collect();
        labels.sort_unstable();
        labels.dedup();
        labels
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy_shape() {
        let taxonomy = CategoryTaxonomy::default();
        assert_eq!(taxonomy.len(), 38);
        assert_eq!(taxonomy.buckets().len(), 22);
    }

    #[test]
    fn both_vocabularies_resolve_to_the_same_bucket() {
        let taxonomy = CategoryTaxonomy::default();
        assert_eq!(
            taxonomy.resolve(Some("Diseases of the circulatory system")),
            "Circulatory System"
        );
        assert_eq!(
            taxonomy.resolve(Some("Diseases Of The Circulatory System")),
            "Circulatory System"
        );
    }

    #[test]
    fn unmapped_names_become_other() {
        let taxonomy = CategoryTaxonomy::default();
        assert_eq!(taxonomy.resolve(Some("Unknown")), "Other");
        assert_eq!(taxonomy.resolve(Some("diseases of the circulatory system")), "Other");
        assert_eq!(taxonomy.resolve(None), "Other");
    }
}
