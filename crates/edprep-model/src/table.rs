//! Source table identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The raw tables the pipeline knows about.
///
/// Names match the keys of the `[tables]` section of the pipeline
/// configuration and the output file stems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TableKind {
    EdStays,
    Admissions,
    Transfers,
    Diagnosis,
    Triage,
    VitalSigns,
    Patients,
    MedRecon,
}

impl TableKind {
    pub const ALL: [TableKind; 8] = [
        TableKind::EdStays,
        TableKind::Admissions,
        TableKind::Transfers,
        TableKind::Diagnosis,
        TableKind::Triage,
        TableKind::VitalSigns,
        TableKind::Patients,
        TableKind::MedRecon,
    ];

    /// Returns the configuration key for this table.
    pub fn as_str(&self) -> &'static str {
        match self {
            TableKind::EdStays => "edstays",
            TableKind::Admissions => "admissions",
            TableKind::Transfers => "transfers",
            TableKind::Diagnosis => "diagnosis",
            TableKind::Triage => "triage",
            TableKind::VitalSigns => "vitalsigns",
            TableKind::Patients => "patients",
            TableKind::MedRecon => "medrecon",
        }
    }

    /// Returns a human-readable description of the table.
    pub fn description(&self) -> &'static str {
        match self {
            TableKind::EdStays => "Emergency department stays",
            TableKind::Admissions => "Hospital admissions",
            TableKind::Transfers => "Intra-hospital transfers",
            TableKind::Diagnosis => "ED diagnoses (ICD-9 and ICD-10)",
            TableKind::Triage => "ED triage assessments",
            TableKind::VitalSigns => "ED vital sign observations",
            TableKind::Patients => "Patient demographics",
            TableKind::MedRecon => "Medication reconciliation",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TableKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        TableKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| format!("Unknown table: {s}"))
    }
}
