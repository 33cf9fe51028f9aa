//! JSON field value extractor
//!
//! Walks a JSON document, collects every value stored under a chosen field
//! name at any depth, counts how often each distinct value occurs and renders
//! a sorted report.

pub mod cli;
pub mod error;
pub mod extraction;
pub mod formatter;
pub mod parser;

// Re-export commonly used types
pub use error::{ExtractError, ExtractErrorKind, ExtractResult, ParseError};
pub use extraction::{
    extract_values, extract_values_with, CancellationToken, ExtractionRequest, FrequencyTable,
    Host, KeyingMode, RunConfig, RunCoordinator, RunOutcome, SortMode,
};
pub use formatter::{format_report, Report, ReportFormatter};
pub use parser::{Document, JsonSource};

/// Extract `field_name` from `json` and render the report with default settings
pub fn extract_report(json: &serde_json::Value, field_name: &str) -> ExtractResult<Vec<String>> {
    let table = extract_values(json, field_name)?;
    Ok(format_report(&table, SortMode::None, extraction::config::DEFAULT_SEPARATOR))
}
