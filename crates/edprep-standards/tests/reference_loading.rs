use std::fs;

use edprep_standards::{Icd10Reference, Icd9Reference, StandardsError, load_icd9_blocks};

#[test]
fn loads_icd9_reference_with_optional_category() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("icd9_codes.csv");
    fs::write(
        &path,
        "icd_code,subcategory,category,description\n\
         401,Essential hypertension,,High blood pressure\n\
         786,Respiratory symptoms,\"Symptoms, Signs, And Ill-Defined Conditions\",\n\
         401,Duplicate,,\n",
    )
    .expect("write");

    let reference = Icd9Reference::load(&path).expect("load icd9");
    assert_eq!(reference.len(), 2);
    let hypertension = reference.get("401").expect("401");
    assert_eq!(
        hypertension.subcategory.as_deref(),
        Some("Essential hypertension")
    );
    assert_eq!(hypertension.category, None);
    assert_eq!(
        reference.get("786").and_then(|e| e.category.as_deref()),
        Some("Symptoms, Signs, And Ill-Defined Conditions")
    );
}

#[test]
fn loads_icd10_reference_deduplicated_on_letter_code() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("icd10_codes.csv");
    fs::write(
        &path,
        "block_code,category,block_title\n\
         R00-R09,\"Symptoms, signs and abnormal clinical and laboratory findings, not elsewhere classified\",Symptoms involving the circulatory and respiratory systems\n\
         R05-R06,Duplicate,Duplicate\n\
         S00-S09,\"Injury, poisoning and certain other consequences of external causes\",Injuries to the head\n",
    )
    .expect("write");

    let reference = Icd10Reference::load(&path).expect("load icd10");
    assert_eq!(reference.len(), 2);
    assert_eq!(
        reference.get("R0").and_then(|b| b.block_title.as_deref()),
        Some("Symptoms involving the circulatory and respiratory systems")
    );
}

#[test]
fn missing_reference_column_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("icd10_codes.csv");
    fs::write(&path, "code,title\nI10,Hypertension\n").expect("write");

    let err = Icd10Reference::load(&path).unwrap_err();
    match err {
        StandardsError::MissingColumn { column, .. } => assert_eq!(column, "block_code"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_reference_file_is_an_io_error() {
    let err = Icd9Reference::load(std::path::Path::new("/nonexistent/icd9.csv")).unwrap_err();
    assert!(matches!(err, StandardsError::Io { .. }));
}

#[test]
fn block_override_splits_ranges() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("blocks.csv");
    fs::write(&path, "name,ranges\nCardiac,390-398; 410-414\nSingle,V30\n").expect("write");

    let blocks = load_icd9_blocks(&path).expect("load blocks");
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].ranges, vec!["390-398", "410-414"]);
    assert_eq!(blocks[1].ranges, vec!["V30"]);
}
