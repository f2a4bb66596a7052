use std::sync::Arc;

use anyhow::Result;
use polars::prelude::*;

use edprep_core::columns::text_column;
use edprep_core::{
    CodeClassifier, ProcessStatus, RangeMap, ReferenceData, TableProcessor, TopicLabeler,
    build_default_registry, process_table,
};
use edprep_model::{CareUnitGroup, RaceGroup};
use edprep_standards::{
    CareUnitMapping, CategoryTaxonomy, Icd10Reference, Icd9Reference, RaceMapping, VitalBound,
    VitalBounds, default_icd9_blocks,
};

fn reference() -> ReferenceData {
    ReferenceData::new(CodeClassifier::new(
        RangeMap::from_blocks(&default_icd9_blocks()).unwrap(),
        Icd9Reference::default(),
        Icd10Reference::default(),
        CategoryTaxonomy::default(),
    ))
}

struct NoTopics;

impl TopicLabeler for NoTopics {
    fn label_topics(&self, documents: &[Vec<String>]) -> Result<Vec<Option<usize>>> {
        Ok(vec![None; documents.len()])
    }
}

#[test]
fn default_registry_lists_processors() {
    let registry = build_default_registry(&reference());
    let listing = registry
        .descriptions()
        .into_iter()
        .map(|(table, description)| format!("{table}: {description}"))
        .collect::<Vec<_>>()
        .join("\n");
    insta::assert_snapshot!(listing, @r"
    admissions: Admission length of stay, mode imputation, death flag
    diagnosis: ICD-9/ICD-10 classification into disease categories
    edstays: ED length of stay, race groups, admitted flag
    patients: Date of death and death flag
    transfers: Transfer length of stay, care-unit groups, discharge events
    vitalsigns: Vital-sign range validation and pain forward-fill
    ");
}

#[test]
fn triage_is_registered_with_a_labeler() {
    let registry = build_default_registry(&reference());
    assert!(!registry.is_registered("triage"));
    let registry = registry.with_topic_labeler(Arc::new(NoTopics));
    assert!(registry.is_registered("triage"));
    assert_eq!(registry.len(), 7);
}

#[test]
fn lookup_is_case_insensitive() {
    let registry = build_default_registry(&reference());
    for name in ["edstays", "EDSTAYS", "EdStays"] {
        let processor = registry.get(name).expect("processor");
        assert_eq!(processor.table_name(), "edstays");
    }
}

#[test]
fn unregistered_tables_pass_through() {
    let registry = build_default_registry(&reference());
    let mut df = df! { "subject_id" => ["1"], "drug" => ["aspirin"] }.unwrap();
    let before = df.clone();
    let status = process_table(&registry, "medrecon", &mut df).unwrap();
    assert_eq!(status, ProcessStatus::PassedThrough);
    assert!(df.equals_missing(&before));
}

#[test]
fn disabled_tables_are_skipped() {
    let mut registry = build_default_registry(&reference());
    registry.disable("PATIENTS");
    assert!(registry.is_disabled("patients"));
    assert!(registry.get("patients").is_none());

    let mut df = df! { "dod" => ["2180-01-01"] }.unwrap();
    let status = process_table(&registry, "patients", &mut df).unwrap();
    assert_eq!(status, ProcessStatus::Disabled);
    assert!(df.column("is_dead").is_err());

    registry.enable("patients");
    let status = process_table(&registry, "patients", &mut df).unwrap();
    assert_eq!(status, ProcessStatus::Processed);
    assert!(df.column("is_dead").is_ok());
}

struct MarkerProcessor;

impl TableProcessor for MarkerProcessor {
    fn table_name(&self) -> &'static str {
        "edstays"
    }

    fn process(&self, df: &mut DataFrame) -> Result<()> {
        let marker = Series::new("marker".into(), vec!["processed"; df.height()]);
        df.with_column(marker)?;
        Ok(())
    }
}

#[test]
fn registering_replaces_existing_processor() {
    let mut registry = build_default_registry(&reference());
    registry.register(Arc::new(MarkerProcessor));
    let mut df = df! { "subject_id" => ["1", "2"] }.unwrap();
    process_table(&registry, "edstays", &mut df).unwrap();
    assert!(df.column("marker").is_ok());
    assert_eq!(registry.get("edstays").unwrap().description(), "Table processor");
}

fn texts(df: &DataFrame, name: &str) -> Vec<Option<String>> {
    text_column(df, name).unwrap()
}

fn owned(values: &[&str]) -> Vec<Option<String>> {
    values.iter().map(|v| Some((*v).to_string())).collect()
}

fn swapped_reference() -> ReferenceData {
    reference()
        .with_race(RaceMapping::from_entries([("MARTIAN", RaceGroup::Asian)]))
        .with_care_units(CareUnitMapping::from_entries([(
            "Rooftop",
            CareUnitGroup::IntensiveCare,
        )]))
        .with_vital_bounds(VitalBounds::new(vec![VitalBound::new(
            "heartrate", 20.0, 400.0,
        )]))
}

fn stays() -> DataFrame {
    df! {
        "subject_id" => ["1", "2"],
        "hadm_id" => ["10", "11"],
        "intime" => ["2180-07-22 16:24:00", "2180-07-22 16:24:00"],
        "outtime" => ["2180-07-22 18:24:00", "2180-07-22 18:24:00"],
        "race" => ["MARTIAN", "WHITE - RUSSIAN"],
    }
    .unwrap()
}

fn unit_transfers() -> DataFrame {
    df! {
        "eventtype" => ["admit", "transfer"],
        "careunit" => ["Rooftop", "Medicine"],
        "intime" => ["2020-01-01 00:00:00", "2020-01-02 00:00:00"],
        "outtime" => ["2020-01-02 00:00:00", "2020-01-03 00:00:00"],
    }
    .unwrap()
}

fn heartrates() -> DataFrame {
    df! {
        "stay_id" => ["1", "2"],
        "heartrate" => ["80", "300"],
    }
    .unwrap()
}

#[test]
fn swapped_race_table_changes_edstay_groups() {
    let mut default_df = stays();
    process_table(&build_default_registry(&reference()), "edstays", &mut default_df).unwrap();
    assert_eq!(
        texts(&default_df, "race"),
        owned(&["Unmapped", "White/European Descent"])
    );

    let mut swapped_df = stays();
    process_table(
        &build_default_registry(&swapped_reference()),
        "edstays",
        &mut swapped_df,
    )
    .unwrap();
    assert_eq!(texts(&swapped_df, "race"), owned(&["Asian", "Unmapped"]));
}

#[test]
fn swapped_care_unit_table_changes_transfer_groups() {
    let mut default_df = unit_transfers();
    process_table(&build_default_registry(&reference()), "transfers", &mut default_df).unwrap();
    assert_eq!(
        texts(&default_df, "careunit_grouped"),
        owned(&["Observation/Other", "Medical"])
    );

    let mut swapped_df = unit_transfers();
    process_table(
        &build_default_registry(&swapped_reference()),
        "transfers",
        &mut swapped_df,
    )
    .unwrap();
    assert_eq!(
        texts(&swapped_df, "careunit_grouped"),
        owned(&["Intensive Care", "Observation/Other"])
    );
}

#[test]
fn swapped_vital_bounds_change_which_rows_survive() {
    let swapped = build_default_registry(&swapped_reference());
    let mut df = heartrates();
    process_table(&swapped, "vitalsigns", &mut df).unwrap();
    assert_eq!(texts(&df, "stay_id"), owned(&["1", "2"]));

    // The built-in table needs every vital column.
    let mut df = heartrates();
    let err = process_table(&build_default_registry(&reference()), "vitalsigns", &mut df)
        .unwrap_err();
    assert!(err.to_string().contains("temperature"));
}
