//! Care-unit names to coarse [`CareUnitGroup`] buckets.

use std::collections::HashMap;

use edprep_model::CareUnitGroup;

const CARE_UNIT_TABLE: &[(&str, CareUnitGroup)] = &[
    ("Medical Intensive Care Unit (MICU)", CareUnitGroup::IntensiveCare),
    ("Medical/Surgical Intensive Care Unit (MICU/SICU)", CareUnitGroup::IntensiveCare),
    ("Surgical Intensive Care Unit (SICU)", CareUnitGroup::IntensiveCare),
    ("Trauma SICU (TSICU)", CareUnitGroup::IntensiveCare),
    ("Cardiac Vascular Intensive Care Unit (CVICU)", CareUnitGroup::IntensiveCare),
    ("Coronary Care Unit (CCU)", CareUnitGroup::IntensiveCare),
    ("Neuro Surgical Intensive Care Unit (Neuro SICU)", CareUnitGroup::IntensiveCare),
    ("Neuro Intermediate", CareUnitGroup::IntensiveCare),
    ("Neuro Stepdown", CareUnitGroup::IntensiveCare),
    ("Emergency Department", CareUnitGroup::Emergency),
    ("Emergency Department Observation", CareUnitGroup::Emergency),
    ("Medicine", CareUnitGroup::Medical),
    ("Medicine/Cardiology", CareUnitGroup::Medical),
    ("Medicine/Cardiology Intermediate", CareUnitGroup::Medical),
    ("Cardiology", CareUnitGroup::Medical),
    ("Cardiology Surgery Intermediate", CareUnitGroup::Medical),
    ("Neurology", CareUnitGroup::Medical),
    ("Hematology/Oncology", CareUnitGroup::Medical),
    ("Hematology/Oncology Intermediate", CareUnitGroup::Medical),
    ("Oncology", CareUnitGroup::Medical),
    ("Transplant", CareUnitGroup::Medical),
    ("Psychiatry", CareUnitGroup::Medical),
    ("Surgery", CareUnitGroup::Surgical),
    ("Surgery/Trauma", CareUnitGroup::Surgical),
    ("Surgery/Pancreatic/Biliary/Bariatric", CareUnitGroup::Surgical),
    ("Surgery/Vascular/Intermediate", CareUnitGroup::Surgical),
    ("Med/Surg", CareUnitGroup::Surgical),
    ("Med/Surg/GYN", CareUnitGroup::Surgical),
    ("Med/Surg/Trauma", CareUnitGroup::Surgical),
    ("Cardiac Surgery", CareUnitGroup::Surgical),
    ("Thoracic Surgery", CareUnitGroup::Surgical),
    ("Vascular", CareUnitGroup::Surgical),
    ("PACU", CareUnitGroup::Surgical),
    ("Labor & Delivery", CareUnitGroup::ObstetricsNeonatal),
    ("Obstetrics (Postpartum & Antepartum)", CareUnitGroup::ObstetricsNeonatal),
    ("Obstetrics Antepartum", CareUnitGroup::ObstetricsNeonatal),
    ("Obstetrics Postpartum", CareUnitGroup::ObstetricsNeonatal),
    ("Neonatal Intensive Care Unit (NICU)", CareUnitGroup::ObstetricsNeonatal),
    ("Special Care Nursery (SCN)", CareUnitGroup::ObstetricsNeonatal),
    ("Nursery - Well Babies", CareUnitGroup::ObstetricsNeonatal),
    ("Observation", CareUnitGroup::ObservationOther),
    ("Discharge Lounge", CareUnitGroup::ObservationOther),
    ("Unknown", CareUnitGroup::ObservationOther),
];

/// Immutable care-unit lookup injected into the transfer processor.
#[derive(Debug, Clone)]
pub struct CareUnitMapping {
    entries: HashMap<String, CareUnitGroup>,
}

impl Default for CareUnitMapping {
    fn default() -> Self {
        Self::from_entries(CARE_UNIT_TABLE.iter().map(|(raw, group)| (*raw, *group)))
    }
}

impl CareUnitMapping {
    pub fn from_entries<'a>(
        entries: impl IntoIterator<Item = (&'a str, CareUnitGroup)>,
    ) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(raw, group)| (raw.to_string(), group))
                .collect(),
        }
    }

    /// Exact lookup; `None` when the unit is not in the table.
    pub fn get(&self, careunit: &str) -> Option<CareUnitGroup> {
        self.entries.get(careunit.trim()).copied()
    }

    /// Lookup with the `Observation/Other` fallback.
    pub fn group(&self, careunit: &str) -> CareUnitGroup {
        self.get(careunit).unwrap_or(CareUnitGroup::ObservationOther)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
