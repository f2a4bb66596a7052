//! Reading delimited source tables into Polars frames.
//!
//! Every column is loaded as text. Typing is the job of the table
//! processors, which know which columns are timestamps, numbers or codes.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use polars::prelude::*;
use tracing::debug;

fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').trim().to_string()
}

fn normalize_cell(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Read a CSV file with a header row into a `DataFrame` of `String` columns.
///
/// Empty cells become null and a BOM on the first header is stripped.
pub fn read_table(path: &Path) -> Result<DataFrame> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("open table: {}", path.display()))?;
    let df = read_table_from_reader(file)
        .with_context(|| format!("read table: {}", path.display()))?;
    debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "loaded table"
    );
    Ok(df)
}

/// Same as [`read_table`] over any reader.
pub fn read_table_from_reader<R: Read>(source: R) -> Result<DataFrame> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(source);
    let headers: Vec<String> = reader
        .headers()
        .context("read headers")?
        .iter()
        .map(normalize_header)
        .collect();

    let mut values: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];
    for (line, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("read record {}", line + 1))?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        for (idx, column) in values.iter_mut().enumerate() {
            column.push(record.get(idx).and_then(normalize_cell));
        }
    }

    let columns: Vec<Column> = headers
        .iter()
        .zip(values)
        .map(|(name, column)| Series::new(name.as_str().into(), column).into_column())
        .collect();
    DataFrame::new(columns).context("build frame")
}
