//! Pipeline configuration.
//!
//! The configuration names where every raw table and reference table lives.
//! Static lookup tables (race, care unit, disease taxonomy) are compiled in
//! and are not part of this file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Environment variable that overrides `data_dir`.
pub const DATA_DIR_ENV_VAR: &str = "EDPREP_DATA_DIR";

/// Top-level pipeline configuration, usually read from `edprep.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Base directory that relative table paths resolve against.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Directory that cleaned tables are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Table name -> file path.
    #[serde(default)]
    pub tables: BTreeMap<String, PathBuf>,
    pub reference: ReferencePaths,
}

/// Locations of the reference tables used by diagnosis classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferencePaths {
    /// ICD-9 category code -> subcategory lookup.
    pub icd9_codes: PathBuf,
    /// ICD-10 block lookup (`block_code`, `category`, `block_title`).
    pub icd10_codes: PathBuf,
    /// Optional replacement for the built-in ICD-9 chapter ranges.
    #[serde(default)]
    pub icd9_blocks: Option<PathBuf>,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("../Data")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

impl PipelineConfig {
    /// Resolve a configured path: absolute paths are kept, relative paths
    /// are joined onto `data_dir`.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.data_dir.join(path)
        }
    }

    /// Resolved path of a configured table (case-insensitive name match).
    pub fn table_path(&self, name: &str) -> Option<PathBuf> {
        self.tables
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, path)| self.resolve_path(path))
    }

    /// Table names in configuration order (sorted).
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    pub fn icd9_codes_path(&self) -> PathBuf {
        self.resolve_path(&self.reference.icd9_codes)
    }

    pub fn icd10_codes_path(&self) -> PathBuf {
        self.resolve_path(&self.reference.icd10_codes)
    }

    pub fn icd9_blocks_path(&self) -> Option<PathBuf> {
        self.reference
            .icd9_blocks
            .as_deref()
            .map(|path| self.resolve_path(path))
    }

    /// Replace `data_dir`, e.g. from [`DATA_DIR_ENV_VAR`].
    #[must_use]
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }
}
