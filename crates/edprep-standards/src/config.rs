//! Loading the TOML pipeline configuration.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use edprep_model::{DATA_DIR_ENV_VAR, PipelineConfig, ReferencePaths};
use tracing::debug;

use crate::error::StandardsError;

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "edprep.toml";

const DEFAULT_TABLES: &[(&str, &str)] = &[
    ("edstays", "ED/edstays.csv"),
    ("admissions", "HOSP/admissions.csv"),
    ("transfers", "HOSP/transfers.csv"),
    ("diagnosis", "ED/diagnosis.csv"),
    ("triage", "ED/triage.csv"),
    ("vitalsigns", "ED/vitalsign.csv"),
    ("medrecon", "ED/medrecon.csv"),
    ("patients", "HOSP/patients.csv"),
];

/// The built-in layout of the ED and hospital modules under `../Data`.
pub fn default_pipeline_config() -> PipelineConfig {
    PipelineConfig {
        data_dir: PathBuf::from("../Data"),
        output_dir: PathBuf::from("output"),
        tables: DEFAULT_TABLES
            .iter()
            .map(|(name, path)| ((*name).to_string(), PathBuf::from(path)))
            .collect::<BTreeMap<_, _>>(),
        reference: ReferencePaths {
            icd9_codes: PathBuf::from("icd9_codes.csv"),
            icd10_codes: PathBuf::from("icd10_codes.csv"),
            icd9_blocks: None,
        },
    }
}

/// Load the pipeline configuration.
///
/// With an explicit path the file must exist. Without one,
/// [`DEFAULT_CONFIG_FILE`] is used when present and the built-in layout
/// otherwise. `EDPREP_DATA_DIR` overrides `data_dir` in every case.
pub fn load_pipeline_config(path: Option<&Path>) -> Result<PipelineConfig, StandardsError> {
    let config = match path {
        Some(path) => read_config_file(path)?,
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                read_config_file(default_path)?
            } else {
                debug!("no config file found, using built-in table layout");
                default_pipeline_config()
            }
        }
    };
    Ok(apply_env_override(config))
}

fn read_config_file(path: &Path) -> Result<PipelineConfig, StandardsError> {
    let text = std::fs::read_to_string(path).map_err(|e| StandardsError::io(path, e))?;
    let config = toml::from_str(&text).map_err(|source| StandardsError::Toml {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "loaded pipeline config");
    Ok(config)
}

fn apply_env_override(config: PipelineConfig) -> PipelineConfig {
    match std::env::var(DATA_DIR_ENV_VAR) {
        Ok(dir) if !dir.trim().is_empty() => {
            debug!(data_dir = %dir, "data directory overridden from environment");
            config.with_data_dir(dir)
        }
        _ => config,
    }
}
