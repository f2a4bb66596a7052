//! Diagnosis classification and per-table cleaning engine.
//!
//! Raw tables arrive as all-text Polars frames. Each table has a
//! [`TableProcessor`] that parses, validates, derives and categorizes its
//! columns in place; the [`TableProcessorRegistry`] maps table names to
//! processors. Diagnosis codes from both ICD generations are classified into
//! one disease taxonomy by the [`CodeClassifier`].

pub mod classifier;
pub mod columns;
pub mod datetime;
pub mod diagnosis;
pub mod processors;
pub mod range_map;
pub mod reference;
pub mod text;

pub use classifier::{CodeClassifier, ResolvedCode};
pub use diagnosis::DiagnosisTransformer;
pub use processors::{
    AdmissionProcessor, DiagnosisProcessor, EdStayProcessor, PassthroughProcessor,
    PatientProcessor, ProcessStatus, TableProcessor, TableProcessorRegistry, TransferProcessor,
    TriageProcessor, VitalSignsProcessor, build_default_registry, process_table,
};
pub use range_map::{CodeRange, RangeMap, UNKNOWN_CATEGORY};
pub use reference::ReferenceData;
pub use text::{TopicLabeler, tokenize_complaint};
