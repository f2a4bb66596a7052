//! Per-table cleaning and derivation.
//!
//! | Table | Processor | Key operations |
//! |-------|-----------|----------------|
//! | edstays | [`EdStayProcessor`] | `ed_los_hours`, race groups, `admitted` |
//! | admissions | [`AdmissionProcessor`] | `admission_los_hours`, mode imputation, `is_dead` |
//! | transfers | [`TransferProcessor`] | `los`, `careunit_grouped`, discharge events |
//! | patients | [`PatientProcessor`] | `dod`, `is_dead` |
//! | vitalsigns | [`VitalSignsProcessor`] | range validation, pain forward-fill |
//! | diagnosis | [`DiagnosisProcessor`] | ICD classification |
//! | triage | [`TriageProcessor`] | complaint topics, ordinal acuity |

mod admission;
mod common;
mod diagnosis;
mod edstay;
mod patient;
mod processor_trait;
mod transfer;
mod triage;
mod vitalsigns;

pub use admission::{ADMISSION_LOS_COLUMN, AdmissionProcessor};
pub use diagnosis::DiagnosisProcessor;
pub use edstay::{ED_LOS_COLUMN, EdStayProcessor};
pub use patient::PatientProcessor;
pub use processor_trait::{
    PASSTHROUGH_TABLE, PassthroughProcessor, ProcessStatus, TableProcessor,
    TableProcessorRegistry, build_default_registry, process_table,
};
pub use transfer::{LOS_COLUMN, TransferProcessor};
pub use triage::{TOPIC_COLUMN, TOPIC_LABEL_COLUMN, TriageProcessor};
pub use vitalsigns::{VitalSignsProcessor, forward_fill};
