//! Raw race/ethnicity strings to coarse [`RaceGroup`] buckets.

use std::collections::HashMap;

use edprep_model::RaceGroup;

const RACE_TABLE: &[(&str, RaceGroup)] = &[
    ("WHITE", RaceGroup::WhiteEuropean),
    ("WHITE - RUSSIAN", RaceGroup::WhiteEuropean),
    ("WHITE - OTHER EUROPEAN", RaceGroup::WhiteEuropean),
    ("WHITE - BRAZILIAN", RaceGroup::WhiteEuropean),
    ("WHITE - EASTERN EUROPEAN", RaceGroup::WhiteEuropean),
    ("PORTUGUESE", RaceGroup::WhiteEuropean),
    ("BLACK/AFRICAN AMERICAN", RaceGroup::BlackAfrican),
    ("BLACK/CAPE VERDEAN", RaceGroup::BlackAfrican),
    ("BLACK/AFRICAN", RaceGroup::BlackAfrican),
    ("BLACK/CARIBBEAN ISLAND", RaceGroup::BlackAfrican),
    ("HISPANIC OR LATINO", RaceGroup::HispanicLatino),
    ("HISPANIC/LATINO - PUERTO RICAN", RaceGroup::HispanicLatino),
    ("HISPANIC/LATINO - DOMINICAN", RaceGroup::HispanicLatino),
    ("HISPANIC/LATINO - SALVADORAN", RaceGroup::HispanicLatino),
    ("HISPANIC/LATINO - GUATEMALAN", RaceGroup::HispanicLatino),
    ("HISPANIC/LATINO - MEXICAN", RaceGroup::HispanicLatino),
    ("HISPANIC/LATINO - CUBAN", RaceGroup::HispanicLatino),
    ("HISPANIC/LATINO - HONDURAN", RaceGroup::HispanicLatino),
    ("HISPANIC/LATINO - CENTRAL AMERICAN", RaceGroup::HispanicLatino),
    ("HISPANIC/LATINO - COLUMBIAN", RaceGroup::HispanicLatino),
    ("SOUTH AMERICAN", RaceGroup::HispanicLatino),
    ("ASIAN", RaceGroup::Asian),
    ("ASIAN - CHINESE", RaceGroup::Asian),
    ("ASIAN - SOUTH EAST ASIAN", RaceGroup::Asian),
    ("ASIAN - KOREAN", RaceGroup::Asian),
    ("ASIAN - ASIAN INDIAN", RaceGroup::Asian),
    (
        "NATIVE HAWAIIAN OR OTHER PACIFIC ISLANDER",
        RaceGroup::NativeAmericanPacificIslander,
    ),
    (
        "AMERICAN INDIAN/ALASKA NATIVE",
        RaceGroup::NativeAmericanPacificIslander,
    ),
    ("MULTIPLE RACE/ETHNICITY", RaceGroup::MixedOrOther),
    ("OTHER", RaceGroup::MixedOrOther),
    ("UNABLE TO OBTAIN", RaceGroup::MixedOrOther),
    ("UNKNOWN", RaceGroup::MixedOrOther),
    ("PATIENT DECLINED TO ANSWER", RaceGroup::MixedOrOther),
];

/// Immutable race lookup injected into the ED stay and admission processors.
#[derive(Debug, Clone)]
pub struct RaceMapping {
    entries: HashMap<String, RaceGroup>,
}

impl Default for RaceMapping {
    fn default() -> Self {
        Self::from_entries(RACE_TABLE.iter().map(|(raw, group)| (*raw, *group)))
    }
}

impl RaceMapping {
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = (&'a str, RaceGroup)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(raw, group)| (raw.to_string(), group))
                .collect(),
        }
    }

    /// Group a raw race value.
    ///
    /// Values that already carry a group label are returned unchanged so that
    /// reprocessing a cleaned table is a no-op. Anything else not in the table
    /// is [`RaceGroup::Unmapped`].
    pub fn group(&self, raw: &str) -> RaceGroup {
        let raw = raw.trim();
        if let Some(group) = self.entries.get(raw) {
            return *group;
        }
        RaceGroup::from_label(raw).unwrap_or(RaceGroup::Unmapped)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
