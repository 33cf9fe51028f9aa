//! Report formatting module
//!
//! Turns a [`FrequencyTable`] into the textual report:
//!
//! ```text
//! 提取结果：
//! --------------------
//! x,出现 2 次
//! y,出现 1 次
//! --------------------
//! 统计信息：
//! - 不同值的数量：2
//! - 字段总出现次数：3
//! - 所有值：x,y
//! ```
//!
//! Formatting is pure: the same table and settings always give the same lines.

pub mod collate;
pub mod render;

use crate::extraction::config::{ExtractionRequest, SortMode, DEFAULT_SEPARATOR};
use crate::extraction::table::FrequencyTable;
use serde::Serialize;
use serde_json::Value;

pub use collate::locale_compare;
pub use render::render_value;

pub const RESULT_HEADER: &str = "提取结果：";
pub const STATS_HEADER: &str = "统计信息：";
pub const DIVIDER_WIDTH: usize = 20;

/// One distinct value in report order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportEntry {
    /// The value as it appeared in the document
    pub value: Value,
    /// The value's natural string form
    pub display: String,
    pub count: usize,
}

/// Totals printed in the statistics block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub distinct_values: usize,
    pub total_occurrences: usize,
}

/// A rendered report, both as lines and as structured data
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_name: Option<String>,
    pub sort_mode: SortMode,
    pub separator: String,
    pub entries: Vec<ReportEntry>,
    pub summary: ReportSummary,
    #[serde(skip)]
    pub lines: Vec<String>,
}

impl Report {
    /// The report text, one line per element of `lines`
    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }

    /// Structured report as pretty-printed JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Sorts and renders frequency tables
#[derive(Debug, Clone)]
pub struct ReportFormatter {
    field_name: Option<String>,
    sort_mode: SortMode,
    separator: String,
}

impl Default for ReportFormatter {
    fn default() -> Self {
        Self::new(SortMode::None, DEFAULT_SEPARATOR)
    }
}

impl ReportFormatter {
    pub fn new(sort_mode: SortMode, separator: impl Into<String>) -> Self {
        Self {
            field_name: None,
            sort_mode,
            separator: separator.into(),
        }
    }

    /// Formatter using the sort mode, separator and field name of `request`
    pub fn for_request(request: &ExtractionRequest) -> Self {
        Self {
            field_name: Some(request.field_name().to_string()),
            sort_mode: request.sort_mode(),
            separator: request.separator().to_string(),
        }
    }

    /// Build the report for `table`
    pub fn format(&self, table: &FrequencyTable<'_>) -> Report {
        let mut entries: Vec<ReportEntry> = table
            .entries()
            .map(|entry| ReportEntry {
                value: entry.value.clone(),
                display: entry.rendered(),
                count: entry.count,
            })
            .collect();
        sort_entries(&mut entries, self.sort_mode);

        let summary = ReportSummary {
            distinct_values: entries.len(),
            total_occurrences: entries.iter().map(|entry| entry.count).sum(),
        };
        let lines = self.render_lines(&entries, summary);

        Report {
            field_name: self.field_name.clone(),
            sort_mode: self.sort_mode,
            separator: self.separator.clone(),
            entries,
            summary,
            lines,
        }
    }

    fn render_lines(&self, entries: &[ReportEntry], summary: ReportSummary) -> Vec<String> {
        let divider = "-".repeat(DIVIDER_WIDTH);
        let mut lines = Vec::with_capacity(entries.len() + 8);

        lines.push(RESULT_HEADER.to_string());
        lines.push(divider.clone());
        lines.extend(
            entries
                .iter()
                .map(|entry| format!("{}{}出现 {} 次", entry.display, self.separator, entry.count)),
        );
        lines.push(divider);

        let all_values: Vec<&str> = entries.iter().map(|entry| entry.display.as_str()).collect();
        lines.push(STATS_HEADER.to_string());
        lines.push(format!("- 不同值的数量：{}", summary.distinct_values));
        lines.push(format!("- 字段总出现次数：{}", summary.total_occurrences));
        lines.push(format!("- 所有值：{}", all_values.join(&self.separator)));

        lines
    }
}

/// Order entries for the report. Sorting is stable, so entries whose
/// renderings compare equal keep their first-occurrence order.
pub fn sort_entries(entries: &mut [ReportEntry], sort_mode: SortMode) {
    match sort_mode {
        SortMode::None => {}
        SortMode::Ascending => {
            entries.sort_by(|a, b| locale_compare(&a.display, &b.display));
        }
        SortMode::Descending => {
            entries.sort_by(|a, b| locale_compare(&b.display, &a.display));
        }
    }
}

/// Render `table` as report lines
pub fn format_report(table: &FrequencyTable<'_>, sort_mode: SortMode, separator: &str) -> Vec<String> {
    ReportFormatter::new(sort_mode, separator).format(table).lines
}
