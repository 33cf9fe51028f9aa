//! Run coordination: parse, prompt, traverse, format, display
//!
//! The coordinator owns no host state. Everything it needs from the outside
//! world (prompts, progress surface, result display) comes through [`Host`].

use crate::error::{ErrorCategory, ExtractError, ExtractResult};
use crate::extraction::config::{ExtractionRequest, RunConfig, SortMode, DEFAULT_SEPARATOR};
use crate::extraction::limits;
use crate::extraction::progress::CancellationToken;
use crate::extraction::stats::{PerformanceTracker, RunStatistics};
use crate::extraction::table::FrequencyTable;
use crate::extraction::traverser::{Step, TraversalSummary, Traverser};
use crate::formatter::{Report, ReportFormatter};
use crate::parser::Document;
use serde_json::Value;

/// Title passed to [`Host::begin_progress`] for large inputs
pub const LARGE_INPUT_TITLE: &str = "正在处理大文件...";

/// Surfaces a run needs from its environment.
///
/// Each prompt returns `None` when the user declines to answer, which ends
/// the run as [`RunOutcome::Cancelled`].
pub trait Host {
    fn prompt_field_name(&mut self) -> Option<String>;

    fn pick_sort_mode(&mut self) -> Option<SortMode>;

    fn prompt_separator(&mut self, default: &str) -> Option<String>;

    /// Called before traversal of a large input
    fn begin_progress(&mut self, _title: &str) {}

    /// Called at every suspension point. `progress` is only set for large
    /// inputs, and only at batches of arrays with no array ancestor.
    fn on_yield(&mut self, _progress: Option<f64>) {}

    /// Called after traversal of a large input, whether it succeeded or not
    fn end_progress(&mut self) {}

    fn show_report(&mut self, document: &Document, report: &Report) -> ExtractResult<()>;

    fn show_error(&mut self, message: &str);
}

/// How a run ended
#[derive(Debug)]
pub enum RunOutcome {
    Completed {
        report: Report,
        statistics: RunStatistics,
    },
    /// The user declined a prompt or cancelled traversal
    Cancelled,
    /// The error has already been shown to the host
    Failed(ExtractError),
}

impl RunOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, RunOutcome::Completed { .. })
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, RunOutcome::Cancelled)
    }
}

/// Linear pipeline for one extraction run
#[derive(Debug, Clone, Default)]
pub struct RunCoordinator {
    config: RunConfig,
    cancel: CancellationToken,
}

impl RunCoordinator {
    pub fn new(config: RunConfig) -> Self {
        Self {
            config,
            cancel: CancellationToken::new(),
        }
    }

    /// Handle for stopping the run at its next suspension point
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Run the whole pipeline against `document`, reporting through `host`
    pub fn run(&self, host: &mut dyn Host, document: &Document) -> RunOutcome {
        match self.execute(host, document) {
            Ok(Some((report, statistics))) => RunOutcome::Completed { report, statistics },
            Ok(None) => {
                log::info!("run on {} cancelled at a prompt", document.identifier);
                RunOutcome::Cancelled
            }
            Err(err) => match err.category() {
                ErrorCategory::UserCancelled => {
                    log::info!("run on {} cancelled during traversal", document.identifier);
                    RunOutcome::Cancelled
                }
                ErrorCategory::InvalidInput | ErrorCategory::RuntimeFailure => {
                    log::error!("run on {} failed: {}", document.identifier, err);
                    host.show_error(&err.detailed_message());
                    RunOutcome::Failed(err)
                }
            },
        }
    }

    fn execute(
        &self,
        host: &mut dyn Host,
        document: &Document,
    ) -> ExtractResult<Option<(Report, RunStatistics)>> {
        let tracker = PerformanceTracker::start();
        self.config.validate().map_err(ExtractError::invalid_request)?;
        limits::check_document_size(document, &self.config)?;

        let json = document.parse()?;
        log::debug!("parsed {} ({} bytes)", document.identifier, document.byte_len());

        let Some(request) = collect_request(host)? else {
            return Ok(None);
        };

        let large = self.config.is_large_input(document.byte_len());
        if large {
            host.begin_progress(LARGE_INPUT_TITLE);
        }
        let traversal = self.traverse(host, &json, &request, large);
        if large {
            host.end_progress();
        }
        let (table, summary) = traversal?;

        let report = ReportFormatter::for_request(&request).format(&table);
        let statistics = tracker.finish(document.byte_len() as u64, summary, table.len());
        log::debug!("{}", statistics.summary());

        host.show_report(document, &report)?;
        Ok(Some((report, statistics)))
    }

    fn traverse<'a>(
        &self,
        host: &mut dyn Host,
        json: &'a Value,
        request: &ExtractionRequest,
        large: bool,
    ) -> ExtractResult<(FrequencyTable<'a>, TraversalSummary)> {
        let mut traverser = Traverser::new(json, request.field_name(), &self.config)
            .with_cancellation(self.cancel.clone());

        loop {
            match traverser.resume()? {
                Step::Yielded(boundary) => {
                    host.on_yield(if large { boundary.progress } else { None });
                }
                Step::Complete => return Ok(traverser.into_parts()),
            }
        }
    }
}

/// Ask the host for field name, sort mode and separator, in that order.
/// `None` as soon as any answer is missing; an empty field name counts as missing.
fn collect_request(host: &mut dyn Host) -> ExtractResult<Option<ExtractionRequest>> {
    let Some(field_name) = host.prompt_field_name().filter(|name| !name.is_empty()) else {
        return Ok(None);
    };
    let Some(sort_mode) = host.pick_sort_mode() else {
        return Ok(None);
    };
    let Some(separator) = host.prompt_separator(DEFAULT_SEPARATOR) else {
        return Ok(None);
    };

    ExtractionRequest::new(field_name, sort_mode, separator).map(Some)
}
