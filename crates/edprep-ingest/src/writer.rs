//! Persisting cleaned tables.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::*;
use tracing::info;

/// Timestamp layout for written tables; `read_table` plus the datetime
/// parser accept it back.
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Write `df` as CSV with a header, creating parent directories.
pub fn write_table(df: &mut DataFrame, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir: {}", parent.display()))?;
    }
    let mut file =
        File::create(path).with_context(|| format!("create output: {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .with_datetime_format(Some(DATETIME_FORMAT.to_string()))
        .finish(df)
        .with_context(|| format!("write table: {}", path.display()))?;
    info!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "wrote table"
    );
    Ok(())
}
