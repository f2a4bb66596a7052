#![deny(unsafe_code)]

pub mod careunit;
pub mod config;
pub mod csv_utils;
pub mod error;
pub mod icd10;
pub mod icd9;
pub mod race;
pub mod stopwords;
pub mod taxonomy;
pub mod vitals;

pub use crate::careunit::CareUnitMapping;
pub use crate::config::{DEFAULT_CONFIG_FILE, default_pipeline_config, load_pipeline_config};
pub use crate::error::StandardsError;
pub use crate::icd10::{Icd10Block, Icd10Reference, letter_code};
pub use crate::icd9::{
    BlockDefinition, ICD9_CHAPTERS, Icd9Entry, Icd9Reference, default_icd9_blocks,
    load_icd9_blocks,
};
pub use crate::race::RaceMapping;
pub use crate::stopwords::{ENGLISH_STOP_WORDS, is_stop_word};
pub use crate::taxonomy::CategoryTaxonomy;
pub use crate::vitals::{PAIN_COLUMN, VitalBound, VitalBounds};
