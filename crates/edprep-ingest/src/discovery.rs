//! Resolving the configured table paths against disk.

use std::path::PathBuf;

use anyhow::Result;
use edprep_model::{EdprepError, PipelineConfig, TableKind};
use tracing::warn;

/// One configured source table.
#[derive(Debug, Clone)]
pub struct TableSource {
    /// Configuration key (e.g. `"edstays"`).
    pub name: String,
    /// Known table kind, `None` for tables the pipeline passes through.
    pub kind: Option<TableKind>,
    /// Resolved path.
    pub path: PathBuf,
    pub exists: bool,
}

/// Resolve every configured table, or only `only` when given.
///
/// Naming a table that is not configured is an error. Missing files are
/// reported through `exists` and a warning, not an error, so the caller can
/// decide whether to skip them.
pub fn resolve_table_sources(
    config: &PipelineConfig,
    only: Option<&str>,
) -> Result<Vec<TableSource>> {
    let mut sources = Vec::new();
    for (name, path) in &config.tables {
        if let Some(filter) = only
            && !name.eq_ignore_ascii_case(filter)
        {
            continue;
        }
        let path = config.resolve_path(path);
        let exists = path.is_file();
        if !exists {
            warn!(table = %name, path = %path.display(), "configured table file not found");
        }
        sources.push(TableSource {
            name: name.clone(),
            kind: name.parse().ok(),
            path,
            exists,
        });
    }
    if let Some(filter) = only
        && sources.is_empty()
    {
        return Err(EdprepError::UnknownTable(filter.to_string()).into());
    }
    Ok(sources)
}
