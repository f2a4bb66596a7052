use std::path::PathBuf;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct RunResult {
    pub output_dir: PathBuf,
    pub dry_run: bool,
    pub tables: Vec<TableSummary>,
    pub errors: Vec<String>,
    pub has_errors: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableSummary {
    pub table: String,
    pub description: String,
    pub status: TableStatus,
    pub rows_in: usize,
    pub rows_out: usize,
    pub columns: usize,
    pub output: Option<PathBuf>,
}

/// Outcome of one table in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableStatus {
    Processed,
    PassedThrough,
    Disabled,
    Missing,
    Failed,
}

impl TableStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TableStatus::Processed => "processed",
            TableStatus::PassedThrough => "passed through",
            TableStatus::Disabled => "disabled",
            TableStatus::Missing => "missing",
            TableStatus::Failed => "failed",
        }
    }
}

impl From<edprep_core::ProcessStatus> for TableStatus {
    fn from(status: edprep_core::ProcessStatus) -> Self {
        match status {
            edprep_core::ProcessStatus::Processed => TableStatus::Processed,
            edprep_core::ProcessStatus::PassedThrough => TableStatus::PassedThrough,
            edprep_core::ProcessStatus::Disabled => TableStatus::Disabled,
        }
    }
}
