//! Lookup tables shared by the processors of one pipeline run.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use edprep_model::PipelineConfig;
use edprep_standards::{
    CareUnitMapping, CategoryTaxonomy, Icd10Reference, Icd9Reference, RaceMapping, VitalBounds,
    default_icd9_blocks, load_icd9_blocks,
};

use crate::classifier::CodeClassifier;
use crate::range_map::RangeMap;

/// Immutable reference data injected into processors at construction.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    pub classifier: Arc<CodeClassifier>,
    pub race: Arc<RaceMapping>,
    pub care_units: Arc<CareUnitMapping>,
    pub vital_bounds: Arc<VitalBounds>,
}

impl ReferenceData {
    /// Reference data around `classifier` with the built-in race, care-unit
    /// and vital-sign tables.
    pub fn new(classifier: CodeClassifier) -> Self {
        Self {
            classifier: Arc::new(classifier),
            race: Arc::new(RaceMapping::default()),
            care_units: Arc::new(CareUnitMapping::default()),
            vital_bounds: Arc::new(VitalBounds::default()),
        }
    }

    /// Load the ICD reference tables named in `config`. A missing or
    /// malformed reference file fails here, before any table is processed.
    pub fn load(config: &PipelineConfig) -> Result<Self> {
        let blocks = match config.icd9_blocks_path() {
            Some(path) => load_icd9_blocks(&path)
                .with_context(|| format!("load ICD-9 blocks: {}", path.display()))?,
            None => default_icd9_blocks(),
        };
        let icd9_blocks = RangeMap::from_blocks(&blocks).context("build ICD-9 chapter ranges")?;

        let icd9_path = config.icd9_codes_path();
        let icd9 = Icd9Reference::load(&icd9_path)
            .with_context(|| format!("load ICD-9 reference: {}", icd9_path.display()))?;
        let icd10_path = config.icd10_codes_path();
        let icd10 = Icd10Reference::load(&icd10_path)
            .with_context(|| format!("load ICD-10 reference: {}", icd10_path.display()))?;
        info!(
            icd9_codes = icd9.len(),
            icd10_letter_codes = icd10.len(),
            icd9_ranges = icd9_blocks.len(),
            "loaded reference tables"
        );

        Ok(Self::new(CodeClassifier::new(
            icd9_blocks,
            icd9,
            icd10,
            CategoryTaxonomy::default(),
        )))
    }

    #[must_use]
    pub fn with_race(mut self, race: RaceMapping) -> Self {
        self.race = Arc::new(race);
        self
    }

    #[must_use]
    pub fn with_care_units(mut self, care_units: CareUnitMapping) -> Self {
        self.care_units = Arc::new(care_units);
        self
    }

    #[must_use]
    pub fn with_vital_bounds(mut self, vital_bounds: VitalBounds) -> Self {
        self.vital_bounds = Arc::new(vital_bounds);
        self
    }
}
