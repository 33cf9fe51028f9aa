//! Configuration options for field value extraction

use crate::error::{ExtractError, ExtractResult};
use serde::{Deserialize, Serialize};

/// Default number of array elements processed between suspension points
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// Documents larger than this surface progress
pub const DEFAULT_LARGE_INPUT_THRESHOLD: usize = 5 * 1024 * 1024;

/// Default separator between a value and its count
pub const DEFAULT_SEPARATOR: &str = ",";

/// Ordering of distinct values in the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// First-occurrence order
    #[default]
    None,
    /// Ascending by rendered value
    Ascending,
    /// Descending by rendered value
    Descending,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::None => "none",
            SortMode::Ascending => "asc",
            SortMode::Descending => "desc",
        }
    }

    /// Label shown in the interactive picker
    pub fn label(&self) -> &'static str {
        match self {
            SortMode::None => "不排序",
            SortMode::Ascending => "升序排序",
            SortMode::Descending => "降序排序",
        }
    }

    pub fn all() -> [SortMode; 3] {
        [SortMode::None, SortMode::Ascending, SortMode::Descending]
    }

    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "none" | "" => Ok(SortMode::None),
            "asc" | "ascending" => Ok(SortMode::Ascending),
            "desc" | "descending" => Ok(SortMode::Descending),
            other => Err(format!(
                "Invalid sort mode '{}'. Use 'none', 'asc', or 'desc'",
                other
            )),
        }
    }
}

/// How composite values (objects and arrays) are told apart in the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyingMode {
    /// Structurally equal composites share one entry
    #[default]
    Structural,
    /// Every composite node is its own entry, even if equal to another
    Identity,
}

/// The user-supplied parameters of one extraction run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRequest {
    field_name: String,
    sort_mode: SortMode,
    separator: String,
}

impl ExtractionRequest {
    /// Build a request, rejecting an empty field name
    pub fn new(
        field_name: impl Into<String>,
        sort_mode: SortMode,
        separator: impl Into<String>,
    ) -> ExtractResult<Self> {
        let field_name = field_name.into();
        if field_name.is_empty() {
            return Err(ExtractError::invalid_request("field name must not be empty"));
        }

        Ok(Self {
            field_name,
            sort_mode,
            separator: separator.into(),
        })
    }

    /// Request with no sorting and the default separator
    pub fn for_field(field_name: impl Into<String>) -> ExtractResult<Self> {
        Self::new(field_name, SortMode::None, DEFAULT_SEPARATOR)
    }

    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    pub fn sort_mode(&self) -> SortMode {
        self.sort_mode
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }
}

/// Tuning knobs for a run, independent of what is being extracted
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Array elements per batch; a suspension point follows each batch
    pub batch_size: usize,
    /// Inputs above this many bytes surface progress
    pub large_input_threshold: usize,
    /// Composite value keying strategy
    pub keying: KeyingMode,
    /// Maximum nesting depth, unbounded when `None`
    pub max_depth: Option<usize>,
    /// Maximum document size in bytes
    pub memory_limit: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            large_input_threshold: DEFAULT_LARGE_INPUT_THRESHOLD,
            keying: KeyingMode::Structural,
            max_depth: None,
            memory_limit: 100 * 1024 * 1024, // 100MB
        }
    }
}

impl RunConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Always surface progress, whatever the input size
    pub fn always_report_progress() -> Self {
        Self {
            large_input_threshold: 0,
            ..Default::default()
        }
    }

    /// Set batch size
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Set the size above which progress is surfaced
    pub fn with_large_input_threshold(mut self, bytes: usize) -> Self {
        self.large_input_threshold = bytes;
        self
    }

    /// Set keying strategy
    pub fn with_keying(mut self, keying: KeyingMode) -> Self {
        self.keying = keying;
        self
    }

    /// Set maximum nesting depth
    pub fn with_max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set memory limit
    pub fn with_memory_limit(mut self, limit_bytes: usize) -> Self {
        self.memory_limit = limit_bytes;
        self
    }

    /// Whether a document of `bytes` size counts as large
    pub fn is_large_input(&self, bytes: usize) -> bool {
        bytes > self.large_input_threshold
    }

    /// Validate configuration consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.batch_size == 0 {
            return Err("Batch size must be at least 1".to_string());
        }

        if self.memory_limit < 1024 {
            return Err("Memory limit must be at least 1KB".to_string());
        }

        if let Some(depth) = self.max_depth {
            if depth == 0 {
                return Err("Max depth must be at least 1".to_string());
            }
        }

        Ok(())
    }
}
