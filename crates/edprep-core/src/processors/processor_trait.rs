//! Table processor trait and registry.
//!
//! Each source table has one [`TableProcessor`]. The
//! [`TableProcessorRegistry`] maps table names to processors so adding a
//! table type never touches the dispatch code.
//!
//! # Example
//!
//! ```ignore
//! use edprep_core::{ReferenceData, build_default_registry, process_table};
//!
//! let registry = build_default_registry(&reference);
//! let status = process_table(&registry, "edstays", &mut df)?;
//! ```

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use anyhow::Result;
use polars::prelude::DataFrame;
use tracing::warn;

use crate::reference::ReferenceData;
use crate::text::TopicLabeler;

use super::{
    AdmissionProcessor, DiagnosisProcessor, EdStayProcessor, PatientProcessor, TransferProcessor,
    TriageProcessor, VitalSignsProcessor,
};

/// Cleaning and derivation rules for one source table.
///
/// Processors transform the frame in place and must be idempotent:
/// processing an already-processed frame leaves it unchanged.
pub trait TableProcessor: Send + Sync {
    /// Configuration key of the table this processor handles (e.g. `"edstays"`).
    fn table_name(&self) -> &'static str;

    /// Returns a human-readable description of the processor.
    fn description(&self) -> &'static str {
        "Table processor"
    }

    /// Process a table in place.
    ///
    /// # Errors
    ///
    /// Returns an error when a required column is missing or a derivation
    /// is undefined (e.g. the mode of an entirely missing column).
    fn process(&self, df: &mut DataFrame) -> Result<()>;
}

/// Table name used by the fallback processor.
pub const PASSTHROUGH_TABLE: &str = "*";

/// Fallback for tables without a registered processor.
pub struct PassthroughProcessor;

impl TableProcessor for PassthroughProcessor {
    fn table_name(&self) -> &'static str {
        PASSTHROUGH_TABLE
    }

    fn description(&self) -> &'static str {
        "Passes unknown tables through unchanged"
    }

    fn process(&self, df: &mut DataFrame) -> Result<()> {
        warn!(
            rows = df.height(),
            "no processor registered, table passed through unchanged"
        );
        Ok(())
    }
}

/// Registry of table processors keyed by lowercase table name.
///
/// Lookups are case-insensitive. Unregistered names resolve to the
/// passthrough processor; disabled names resolve to nothing.
pub struct TableProcessorRegistry {
    processors: HashMap<String, Arc<dyn TableProcessor>>,
    disabled: HashSet<String>,
    default_processor: Arc<dyn TableProcessor>,
}

impl Default for TableProcessorRegistry {
    fn default() -> Self {
        Self::new(Arc::new(PassthroughProcessor))
    }
}

impl TableProcessorRegistry {
    /// Creates an empty registry with the given fallback processor.
    pub fn new(default_processor: Arc<dyn TableProcessor>) -> Self {
        Self {
            processors: HashMap::new(),
            disabled: HashSet::new(),
            default_processor,
        }
    }

    /// Registers a processor for its table, replacing any existing one.
    pub fn register(&mut self, processor: Arc<dyn TableProcessor>) {
        self.processors
            .insert(processor.table_name().to_lowercase(), processor);
    }

    /// Registers the triage processor around `labeler`.
    #[must_use]
    pub fn with_topic_labeler(mut self, labeler: Arc<dyn TopicLabeler>) -> Self {
        self.register(Arc::new(TriageProcessor::new(labeler)));
        self
    }

    pub fn get(&self, table: &str) -> Option<Arc<dyn TableProcessor>> {
        let key = table.to_lowercase();
        if self.disabled.contains(&key) {
            return None;
        }
        Some(
            self.processors
                .get(&key)
                .cloned()
                .unwrap_or_else(|| Arc::clone(&self.default_processor)),
        )
    }

    pub fn disable(&mut self, table: &str) {
        self.disabled.insert(table.to_lowercase());
    }

    pub fn enable(&mut self, table: &str) {
        self.disabled.remove(&table.to_lowercase());
    }

    pub fn is_disabled(&self, table: &str) -> bool {
        self.disabled.contains(&table.to_lowercase())
    }

    pub fn is_registered(&self, table: &str) -> bool {
        self.processors.contains_key(&table.to_lowercase())
    }

    /// Registered table names, sorted.
    pub fn registered_tables(&self) -> Vec<String> {
        let mut tables: Vec<String> = self.processors.keys().cloned().collect();
        tables.sort();
        tables
    }

    /// `(table, description)` for every registered processor, sorted by table.
    pub fn descriptions(&self) -> Vec<(String, &'static str)> {
        self.registered_tables()
            .into_iter()
            .filter_map(|table| {
                let description = self.processors.get(&table)?.description();
                Some((table, description))
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.processors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }
}

/// Registry with every processor that needs only reference data.
///
/// Triage needs a topic model and is added with
/// [`TableProcessorRegistry::with_topic_labeler`].
pub fn build_default_registry(reference: &ReferenceData) -> TableProcessorRegistry {
    let mut registry = TableProcessorRegistry::default();
    registry.register(Arc::new(EdStayProcessor::new(Arc::clone(&reference.race))));
    registry.register(Arc::new(AdmissionProcessor::new(Arc::clone(
        &reference.race,
    ))));
    registry.register(Arc::new(TransferProcessor::new(Arc::clone(
        &reference.care_units,
    ))));
    registry.register(Arc::new(PatientProcessor));
    registry.register(Arc::new(VitalSignsProcessor::new(Arc::clone(
        &reference.vital_bounds,
    ))));
    registry.register(Arc::new(DiagnosisProcessor::new(Arc::clone(
        &reference.classifier,
    ))));
    registry
}

/// How a table was handled by [`process_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessStatus {
    Processed,
    PassedThrough,
    Disabled,
}

impl ProcessStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessStatus::Processed => "processed",
            ProcessStatus::PassedThrough => "passed through",
            ProcessStatus::Disabled => "disabled",
        }
    }
}

/// Apply the registry's processor for `table` to `df`.
pub fn process_table(
    registry: &TableProcessorRegistry,
    table: &str,
    df: &mut DataFrame,
) -> Result<ProcessStatus> {
    let Some(processor) = registry.get(table) else {
        return Ok(ProcessStatus::Disabled);
    };
    processor.process(df)?;
    if processor.table_name() == PASSTHROUGH_TABLE {
        Ok(ProcessStatus::PassedThrough)
    } else {
        Ok(ProcessStatus::Processed)
    }
}
