//! Shared CSV utilities for loading reference tables.

use std::collections::BTreeMap;
use std::path::Path;

use csv::ReaderBuilder;

use crate::error::StandardsError;

/// A CSV row keyed by header name.
pub type CsvRow = BTreeMap<String, String>;

/// Read a CSV file into a vector of row maps.
///
/// Each row is represented as a BTreeMap with column headers as keys.
/// Handles BOM characters and trims whitespace from values.
pub fn read_csv_rows(path: &Path) -> Result<Vec<CsvRow>, StandardsError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|err| match err.into_kind() {
            csv::ErrorKind::Io(source) => StandardsError::io(path, source),
            other => StandardsError::Csv {
                path: path.to_path_buf(),
                message: format!("{other:?}"),
            },
        })?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|err| StandardsError::csv(path, &err))?
        .iter()
        .map(|header| header.trim_matches('\u{feff}').trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|err| StandardsError::csv(path, &err))?;
        let mut row = BTreeMap::new();
        for (idx, value) in record.iter().enumerate() {
            let key = headers.get(idx).cloned().unwrap_or_default();
            row.insert(key, value.trim().to_string());
        }
        rows.push(row);
    }
    Ok(rows)
}

/// Fail when the rows lack any of `columns`. An empty table passes.
pub fn require_columns(
    path: &Path,
    rows: &[CsvRow],
    columns: &[&str],
) -> Result<(), StandardsError> {
    let Some(first) = rows.first() else {
        return Ok(());
    };
    for column in columns {
        if !first.contains_key(*column) {
            return Err(StandardsError::MissingColumn {
                path: path.to_path_buf(),
                column: (*column).to_string(),
            });
        }
    }
    Ok(())
}

/// Get a field value from a row, returning empty string if not present.
pub fn get_field(row: &CsvRow, key: &str) -> String {
    row.get(key).cloned().unwrap_or_default()
}

/// Get an optional field value from a row (None if empty or missing).
pub fn get_optional(row: &CsvRow, key: &str) -> Option<String> {
    row.get(key).filter(|v| !v.is_empty()).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn strips_bom_and_trims_values() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("codes.csv");
        let mut file = std::fs::File::create(&path).expect("create");
        write!(file, "\u{feff}icd_code,subcategory\n 401 , Hypertension \n").expect("write");

        let rows = read_csv_rows(&path).expect("read rows");
        assert_eq!(rows.len(), 1);
        assert_eq!(get_field(&rows[0], "icd_code"), "401");
        assert_eq!(get_optional(&rows[0], "subcategory").as_deref(), Some("Hypertension"));
        assert_eq!(get_optional(&rows[0], "category"), None);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = read_csv_rows(Path::new("/nonexistent/codes.csv")).unwrap_err();
        assert!(matches!(err, StandardsError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/codes.csv"));
    }
}
