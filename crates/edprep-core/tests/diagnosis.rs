use std::sync::Arc;

use polars::prelude::*;
use proptest::prelude::*;

use edprep_core::columns::text_column;
use edprep_core::{CodeClassifier, DiagnosisTransformer, RangeMap};
use edprep_model::IcdVersion;
use edprep_standards::{
    CategoryTaxonomy, Icd10Reference, Icd9Entry, Icd9Reference, default_icd9_blocks,
};

fn classifier() -> Arc<CodeClassifier> {
    let icd9 = Icd9Reference::from_entries([(
        "786".to_string(),
        Icd9Entry {
            subcategory: Some("Symptoms involving respiratory system".to_string()),
            category: None,
        },
    )]);
    let icd10 = Icd10Reference::from_rows([
        (
            "R00-R09",
            "Symptoms, signs and abnormal clinical and laboratory findings, not elsewhere classified",
            "Symptoms and signs involving the circulatory and respiratory systems",
        ),
        (
            "S00-S09",
            "Injury, poisoning and certain other consequences of external causes",
            "Injuries to the head",
        ),
    ]);
    Arc::new(CodeClassifier::new(
        RangeMap::from_blocks(&default_icd9_blocks()).unwrap(),
        icd9,
        icd10,
        CategoryTaxonomy::default(),
    ))
}

fn diagnosis_frame() -> DataFrame {
    df! {
        "subject_id" => ["1", "2", "3", "4", "5"],
        "seq_num" => ["1", "1", "2", "1", "1"],
        "icd_code" => ["R079", "78650", "S0990XA", "4019", "Z0000"],
        "icd_version" => ["10", "9", "10", "9", "11"],
        "icd_title" => ["Chest pain", "Chest pain", "Head injury", "Hypertension", "Exam"],
    }
    .unwrap()
}

fn column(df: &DataFrame, name: &str) -> Vec<Option<String>> {
    text_column(df, name).unwrap()
}

#[test]
fn unknown_versions_are_excluded_and_the_rest_kept_once() {
    let transformer = DiagnosisTransformer::new(classifier());
    let out = transformer.transform(&diagnosis_frame()).unwrap();

    assert_eq!(out.height(), 4);
    let mut subjects: Vec<String> = column(&out, "subject_id").into_iter().flatten().collect();
    subjects.sort();
    assert_eq!(subjects, vec!["1", "2", "3", "4"]);
}

#[test]
fn icd9_partition_precedes_icd10_partition() {
    let transformer = DiagnosisTransformer::new(classifier());
    let out = transformer.transform(&diagnosis_frame()).unwrap();
    let codes: Vec<String> = column(&out, "icd_code").into_iter().flatten().collect();
    assert_eq!(codes, vec!["78650", "4019", "R079", "S0990XA"]);
}

#[test]
fn categories_and_subcategories_are_always_set() {
    let transformer = DiagnosisTransformer::new(classifier());
    let out = transformer.transform(&diagnosis_frame()).unwrap();

    assert_eq!(
        column(&out, "category_code"),
        vec![
            Some("786".to_string()),
            Some("401".to_string()),
            Some("R07".to_string()),
            Some("S09".to_string()),
        ]
    );
    assert_eq!(
        column(&out, "category"),
        vec![
            Some("Symptoms & Abnormal Findings".to_string()),
            Some("Circulatory System".to_string()),
            Some("Symptoms & Abnormal Findings".to_string()),
            Some("Injury & Poisoning".to_string()),
        ]
    );
    assert_eq!(
        column(&out, "subcategory"),
        vec![
            Some("Symptoms involving respiratory system".to_string()),
            Some("Other".to_string()),
            Some("Symptoms and signs involving the circulatory and respiratory systems".to_string()),
            Some("Injuries to the head".to_string()),
        ]
    );
}

#[test]
fn working_columns_are_dropped() {
    let transformer = DiagnosisTransformer::new(classifier());
    let out = transformer.transform(&diagnosis_frame()).unwrap();
    assert!(out.column("seq_num").is_err());
    assert!(out.column("icd_title").is_ok());
    assert!(out.column("subcategory_icd9").is_err());
}

#[test]
fn transformed_table_snapshot() {
    let transformer = DiagnosisTransformer::new(classifier());
    let out = transformer.transform(&diagnosis_frame()).unwrap();

    let names: Vec<String> = out
        .get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect();
    let mut lines = vec![names.join(" | ")];
    let columns: Vec<Vec<Option<String>>> = names.iter().map(|name| column(&out, name)).collect();
    for row in 0..out.height() {
        let cells: Vec<&str> = columns
            .iter()
            .map(|values| values[row].as_deref().unwrap_or("-"))
            .collect();
        lines.push(cells.join(" | "));
    }
    insta::assert_snapshot!(lines.join("\n"), @r"
    subject_id | icd_code | icd_version | icd_title | category_code | category | subcategory
    2 | 78650 | 9 | Chest pain | 786 | Symptoms & Abnormal Findings | Symptoms involving respiratory system
    4 | 4019 | 9 | Hypertension | 401 | Circulatory System | Other
    1 | R079 | 10 | Chest pain | R07 | Symptoms & Abnormal Findings | Symptoms and signs involving the circulatory and respiratory systems
    3 | S0990XA | 10 | Head injury | S09 | Injury & Poisoning | Injuries to the head
    ");
}

#[test]
fn missing_version_column_is_an_error() {
    let df = df! { "icd_code" => ["R079"] }.unwrap();
    let transformer = DiagnosisTransformer::new(classifier());
    let err = transformer.transform(&df).unwrap_err();
    assert!(err.to_string().contains("icd_version"));
}

#[test]
fn transform_is_idempotent() {
    let transformer = DiagnosisTransformer::new(classifier());
    let once = transformer.transform(&diagnosis_frame()).unwrap();
    let twice = transformer.transform(&once).unwrap();
    assert!(once.equals_missing(&twice));
}

proptest! {
    #[test]
    fn icd10_codes_sharing_a_prefix_classify_identically(
        prefix in "[A-Z][0-9]",
        tail_a in "[0-9A-Z]{1,5}",
        tail_b in "[0-9A-Z]{1,5}",
    ) {
        let classifier = classifier();
        let a = classifier.classify(&format!("{prefix}{tail_a}"), IcdVersion::Icd10);
        let b = classifier.classify(&format!("{prefix}{tail_b}"), IcdVersion::Icd10);
        prop_assert_eq!(a.category, b.category);
        prop_assert_eq!(a.subcategory, b.subcategory);
    }

    #[test]
    fn every_icd9_code_gets_a_non_empty_category(code in "[0-9]{3}[0-9]{0,2}") {
        let result = classifier().classify(&code, IcdVersion::Icd9);
        prop_assert!(!result.category.is_empty());
        prop_assert!(!result.subcategory.is_empty());
    }
}
