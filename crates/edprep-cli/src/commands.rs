use std::io::{self, IsTerminal};
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{info, info_span};

use edprep_cli::pipeline::{RunOptions, run_pipeline};
use edprep_cli::types::RunResult;
use edprep_core::{
    CodeClassifier, RangeMap, ReferenceData, TableProcessorRegistry, build_default_registry,
};
use edprep_model::{PipelineConfig, TableKind};
use edprep_standards::{
    CategoryTaxonomy, Icd9Reference, Icd10Reference, default_icd9_blocks, load_pipeline_config,
};

use crate::cli::RunArgs;
use crate::summary::apply_table_style;

fn load_config(path: Option<&Path>) -> Result<PipelineConfig> {
    load_pipeline_config(path).context("load pipeline config")
}

pub fn run_tables(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let registry = listing_registry()?;

    let mut table = Table::new();
    table.set_header(vec!["Table", "Processor", "File", "Found"]);
    apply_table_style(&mut table);
    for name in config.table_names() {
        let processor = match registry.get(name) {
            Some(processor) if registry.is_registered(name) => processor.description(),
            Some(_) => "Passthrough (copied unchanged)",
            None => "Disabled",
        };
        let path = config.table_path(name).unwrap_or_default();
        let found = if path.is_file() { "yes" } else { "no" };
        table.add_row(vec![
            name.to_string(),
            processor.to_string(),
            path.display().to_string(),
            found.to_string(),
        ]);
    }
    let triage = TableKind::Triage.as_str();
    if config.tables.contains_key(triage) && !registry.is_registered(triage) {
        println!("Triage topics need a topic model; without one triage is copied unchanged.");
    }
    println!("{table}");
    Ok(())
}

pub fn run(args: &RunArgs, config_path: Option<&Path>) -> Result<RunResult> {
    let config = load_config(config_path)?;
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| config.output_dir.clone());
    let run_span = info_span!("run", output_dir = %output_dir.display());
    let _run_guard = run_span.enter();

    let start = Instant::now();
    let reference = ReferenceData::load(&config)?;
    let registry = build_default_registry(&reference);
    info!(
        processors = registry.len(),
        duration_ms = start.elapsed().as_millis(),
        "reference data loaded"
    );

    let options = RunOptions {
        output_dir,
        only: args.table.clone(),
        dry_run: args.dry_run,
        show_progress: io::stderr().is_terminal(),
    };
    let result = run_pipeline(&config, &registry, &options)?;
    info!(
        tables = result.tables.len(),
        errors = result.errors.len(),
        duration_ms = start.elapsed().as_millis(),
        "run complete"
    );
    Ok(result)
}

/// Registry used only for listing; the reference lookups stay empty.
fn listing_registry() -> Result<TableProcessorRegistry> {
    let blocks = RangeMap::from_blocks(&default_icd9_blocks()).context("build ICD-9 ranges")?;
    let classifier = CodeClassifier::new(
        blocks,
        Icd9Reference::default(),
        Icd10Reference::default(),
        CategoryTaxonomy::default(),
    );
    Ok(build_default_registry(&ReferenceData::new(classifier)))
}
