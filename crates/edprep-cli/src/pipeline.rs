//! Run orchestration: read, process and write every configured table.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use polars::prelude::DataFrame;
use tracing::{Level, info, info_span, trace, warn};

use edprep_core::{TableProcessorRegistry, process_table};
use edprep_ingest::{TableSource, read_table, resolve_table_sources, write_table};
use edprep_model::PipelineConfig;

use crate::logging::redact_value;
use crate::types::{RunResult, TableStatus, TableSummary};

/// File written next to the cleaned tables describing the run.
pub const RUN_SUMMARY_FILE: &str = "run_summary.json";

const PROGRESS_TEMPLATE: &str = "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}";

/// Options for one pipeline run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub output_dir: PathBuf,
    /// Restrict the run to one configured table.
    pub only: Option<String>,
    pub dry_run: bool,
    pub show_progress: bool,
}

impl RunOptions {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            only: None,
            dry_run: false,
            show_progress: false,
        }
    }
}

/// Process every configured table through `registry`.
///
/// A failing table is recorded in the result and the run continues with the
/// next one. Missing input files are skipped.
pub fn run_pipeline(
    config: &PipelineConfig,
    registry: &TableProcessorRegistry,
    options: &RunOptions,
) -> Result<RunResult> {
    let sources = resolve_table_sources(config, options.only.as_deref())?;
    let progress = progress_bar(sources.len() as u64, options.show_progress);
    let mut tables = Vec::with_capacity(sources.len());
    let mut errors = Vec::new();

    for source in &sources {
        progress.set_message(source.name.clone());
        match process_source(source, registry, options) {
            Ok(summary) => tables.push(summary),
            Err(error) => {
                warn!(table = %source.name, "table failed: {error:#}");
                errors.push(format!("{}: {error:#}", source.name));
                tables.push(TableSummary {
                    table: source.name.clone(),
                    description: describe(source).to_string(),
                    status: TableStatus::Failed,
                    rows_in: 0,
                    rows_out: 0,
                    columns: 0,
                    output: None,
                });
            }
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    let result = RunResult {
        output_dir: options.output_dir.clone(),
        dry_run: options.dry_run,
        has_errors: !errors.is_empty(),
        tables,
        errors,
    };
    if !options.dry_run {
        write_run_summary(&result, &options.output_dir.join(RUN_SUMMARY_FILE))?;
    }
    Ok(result)
}

/// Read, process and (unless dry-run) write one table.
pub fn process_source(
    source: &TableSource,
    registry: &TableProcessorRegistry,
    options: &RunOptions,
) -> Result<TableSummary> {
    let span = info_span!("table", table = %source.name);
    let _guard = span.enter();
    let mut summary = TableSummary {
        table: source.name.clone(),
        description: describe(source).to_string(),
        status: TableStatus::Missing,
        rows_in: 0,
        rows_out: 0,
        columns: 0,
        output: None,
    };
    if !source.exists {
        return Ok(summary);
    }
    if registry.is_disabled(&source.name) {
        info!("table disabled, skipping");
        summary.status = TableStatus::Disabled;
        return Ok(summary);
    }

    let start = Instant::now();
    let mut df = read_table(&source.path)?;
    summary.rows_in = df.height();
    if tracing::enabled!(Level::TRACE)
        && let Some(subject) = first_subject(&df)
    {
        trace!(subject_id = redact_value(&subject), "first row");
    }

    let status = process_table(registry, &source.name, &mut df)
        .with_context(|| format!("process table {}", source.name))?;
    summary.status = status.into();
    summary.rows_out = df.height();
    summary.columns = df.width();

    if !options.dry_run {
        let path = options.output_dir.join(format!("{}.csv", source.name));
        write_table(&mut df, &path)?;
        summary.output = Some(path);
    }
    info!(
        rows_in = summary.rows_in,
        rows_out = summary.rows_out,
        columns = summary.columns,
        status = summary.status.as_str(),
        duration_ms = start.elapsed().as_millis(),
        "table complete"
    );
    Ok(summary)
}

/// Write the run result as pretty-printed JSON.
pub fn write_run_summary(result: &RunResult, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir: {}", parent.display()))?;
    }
    let file =
        File::create(path).with_context(|| format!("create run summary: {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), result)
        .with_context(|| format!("write run summary: {}", path.display()))?;
    Ok(())
}

fn describe(source: &TableSource) -> &'static str {
    source
        .kind
        .map_or("Unrecognized table", |kind| kind.description())
}

fn first_subject(df: &DataFrame) -> Option<String> {
    let column = df.column("subject_id").ok()?;
    column.str().ok()?.get(0).map(str::to_string)
}

fn progress_bar(len: u64, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(len);
    let style = ProgressStyle::with_template(PROGRESS_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    bar.set_style(style);
    bar
}
