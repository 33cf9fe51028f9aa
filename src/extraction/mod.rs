//! Field value extraction module
//!
//! This module contains the traversal, the frequency table, run configuration,
//! statistics and the run coordinator.

pub mod config;
pub mod coordinator;
pub mod limits;
pub mod progress;
pub mod stats;
pub mod table;
pub mod traverser;

pub use config::{ExtractionRequest, KeyingMode, RunConfig, SortMode};
pub use coordinator::{Host, RunCoordinator, RunOutcome};
pub use progress::{CancellationToken, NoProgress, ProgressSink};
pub use stats::{PerformanceTracker, RunStatistics};
pub use table::{FrequencyTable, TableEntry, ValueKey};
pub use traverser::{BatchBoundary, Step, TraversalSummary, Traverser};

use crate::error::{ExtractError, ExtractResult};
use serde_json::Value;

/// Collect every value stored under `field_name` with the default configuration
pub fn extract_values<'a>(document: &'a Value, field_name: &str) -> ExtractResult<FrequencyTable<'a>> {
    extract_values_with(
        document,
        field_name,
        &RunConfig::default(),
        &mut NoProgress,
        &CancellationToken::new(),
    )
}

/// Collect every value stored under `field_name`, forwarding progress to
/// `progress` and stopping early if `cancel` fires
pub fn extract_values_with<'a>(
    document: &'a Value,
    field_name: &str,
    config: &RunConfig,
    progress: &mut dyn ProgressSink,
    cancel: &CancellationToken,
) -> ExtractResult<FrequencyTable<'a>> {
    if field_name.is_empty() {
        return Err(ExtractError::invalid_request("field name must not be empty"));
    }
    config.validate().map_err(ExtractError::invalid_request)?;

    Traverser::new(document, field_name, config)
        .with_cancellation(cancel.clone())
        .run_to_completion(progress)
}
