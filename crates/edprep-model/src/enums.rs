//! Type-safe enumerations for categorical fields.
//!
//! Source tables carry these values as free text. Each enum has an explicit
//! catch-all variant so an unmapped value is a visible branch rather than a
//! silent fallthrough.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Generation of the ICD coding standard a diagnosis code belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IcdVersion {
    /// ICD-9: numeric-dotted codes (`"4019"`, `"V5861"`, `"E8889"`).
    Icd9,
    /// ICD-10: alphanumeric codes (`"I10"`, `"R079"`).
    Icd10,
}

impl IcdVersion {
    /// Maps the numeric `icd_version` field. Anything but 9 or 10 is `None`.
    pub fn from_number(version: i64) -> Option<Self> {
        match version {
            9 => Some(IcdVersion::Icd9),
            10 => Some(IcdVersion::Icd10),
            _ => None,
        }
    }

    pub fn as_number(&self) -> i64 {
        match self {
            IcdVersion::Icd9 => 9,
            IcdVersion::Icd10 => 10,
        }
    }
}

impl fmt::Display for IcdVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ICD-{}", self.as_number())
    }
}

/// Coarse race/ethnicity bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RaceGroup {
    WhiteEuropean,
    BlackAfrican,
    HispanicLatino,
    Asian,
    NativeAmericanPacificIslander,
    MixedOrOther,
    /// A recorded value that the race table does not cover.
    Unmapped,
}

impl RaceGroup {
    pub const GROUPS: [RaceGroup; 6] = [
        RaceGroup::WhiteEuropean,
        RaceGroup::BlackAfrican,
        RaceGroup::HispanicLatino,
        RaceGroup::Asian,
        RaceGroup::NativeAmericanPacificIslander,
        RaceGroup::MixedOrOther,
    ];

    /// Returns the label written to output tables.
    pub fn as_str(&self) -> &'static str {
        match self {
            RaceGroup::WhiteEuropean => "White/European Descent",
            RaceGroup::BlackAfrican => "Black/African Descent",
            RaceGroup::HispanicLatino => "Hispanic/Latino",
            RaceGroup::Asian => "Asian",
            RaceGroup::NativeAmericanPacificIslander => "Native American/Pacific Islander",
            RaceGroup::MixedOrOther => "Mixed or Other",
            RaceGroup::Unmapped => "Unmapped",
        }
    }

    /// Recognizes an already-grouped label (exact match).
    pub fn from_label(label: &str) -> Option<Self> {
        RaceGroup::GROUPS
            .into_iter()
            .chain(std::iter::once(RaceGroup::Unmapped))
            .find(|group| group.as_str() == label)
    }
}

impl fmt::Display for RaceGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Coarse grouping of hospital care units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CareUnitGroup {
    IntensiveCare,
    Emergency,
    Medical,
    Surgical,
    ObstetricsNeonatal,
    /// Observation units and anything the care-unit table does not cover.
    ObservationOther,
}

impl CareUnitGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            CareUnitGroup::IntensiveCare => "Intensive Care",
            CareUnitGroup::Emergency => "Emergency",
            CareUnitGroup::Medical => "Medical",
            CareUnitGroup::Surgical => "Surgical",
            CareUnitGroup::ObstetricsNeonatal => "Obstetrics & Neonatal",
            CareUnitGroup::ObservationOther => "Observation/Other",
        }
    }
}

impl fmt::Display for CareUnitGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Administrative gender as recorded on ED stays and patients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Female,
    Male,
    Unknown,
}

impl Gender {
    /// Returns the single-letter code used in the source tables.
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Female => "F",
            Gender::Male => "M",
            Gender::Unknown => "U",
        }
    }

    /// Unrecognized values become `Gender::Unknown`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_uppercase().as_str() {
            "F" | "FEMALE" => Gender::Female,
            "M" | "MALE" => Gender::Male,
            _ => Gender::Unknown,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Chief-complaint topic assigned by the external topic model.
///
/// Topic ids from the model are zero-based; the ordinal written to the
/// triage table is one-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TopicLabel {
    GeneralPainWeakness,
    RespiratoryTrauma,
    InjuryAlcohol,
    AbdominalChestPain,
    LimbHeadPain,
}

impl TopicLabel {
    pub const ALL: [TopicLabel; 5] = [
        TopicLabel::GeneralPainWeakness,
        TopicLabel::RespiratoryTrauma,
        TopicLabel::InjuryAlcohol,
        TopicLabel::AbdominalChestPain,
        TopicLabel::LimbHeadPain,
    ];

    /// Maps a zero-based model topic id.
    pub fn from_topic_id(id: usize) -> Option<Self> {
        TopicLabel::ALL.get(id).copied()
    }

    /// One-based ordinal (1..=5).
    pub fn ordinal(&self) -> i64 {
        match self {
            TopicLabel::GeneralPainWeakness => 1,
            TopicLabel::RespiratoryTrauma => 2,
            TopicLabel::InjuryAlcohol => 3,
            TopicLabel::AbdominalChestPain => 4,
            TopicLabel::LimbHeadPain => 5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TopicLabel::GeneralPainWeakness => "General Pain & Weakness",
            TopicLabel::RespiratoryTrauma => "Respiratory & Trauma Symptoms",
            TopicLabel::InjuryAlcohol => "Injury & Alcohol-Related Issues",
            TopicLabel::AbdominalChestPain => "Abdominal & Chest Pain",
            TopicLabel::LimbHeadPain => "Limb & Head Pain",
        }
    }
}

impl fmt::Display for TopicLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
