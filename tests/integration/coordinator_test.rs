//! Integration tests for the run coordinator through its public host seam

use assert_matches::assert_matches;
use jsonvals::error::ExtractResult;
use jsonvals::extraction::{Host, RunConfig, RunCoordinator, RunOutcome, SortMode};
use jsonvals::{Document, ExtractError, Report};

/// Records every host interaction in order
#[derive(Default)]
struct RecordingHost {
    answers: (Option<String>, Option<SortMode>, Option<String>),
    events: Vec<String>,
    reports: Vec<Report>,
    cancel_after_yields: Option<(usize, jsonvals::CancellationToken)>,
}

impl RecordingHost {
    fn new(field: &str, sort: SortMode, separator: &str) -> Self {
        Self {
            answers: (
                Some(field.to_string()),
                Some(sort),
                Some(separator.to_string()),
            ),
            ..Default::default()
        }
    }
}

impl Host for RecordingHost {
    fn prompt_field_name(&mut self) -> Option<String> {
        self.events.push("field".to_string());
        self.answers.0.clone()
    }

    fn pick_sort_mode(&mut self) -> Option<SortMode> {
        self.events.push("sort".to_string());
        self.answers.1
    }

    fn prompt_separator(&mut self, default: &str) -> Option<String> {
        self.events.push(format!("separator (default {})", default));
        self.answers.2.clone()
    }

    fn begin_progress(&mut self, title: &str) {
        self.events.push(format!("begin {}", title));
    }

    fn on_yield(&mut self, progress: Option<f64>) {
        self.events.push(match progress {
            Some(p) => format!("yield {:.0}", p),
            None => "yield".to_string(),
        });
        if let Some((remaining, token)) = &mut self.cancel_after_yields {
            *remaining = remaining.saturating_sub(1);
            if *remaining == 0 {
                token.cancel();
            }
        }
    }

    fn end_progress(&mut self) {
        self.events.push("end".to_string());
    }

    fn show_report(&mut self, document: &Document, report: &Report) -> ExtractResult<()> {
        self.events.push(format!("report {}", document.identifier));
        self.reports.push(report.clone());
        Ok(())
    }

    fn show_error(&mut self, message: &str) {
        self.events.push(format!("error {}", message));
    }
}

fn array_document(len: usize) -> Document {
    let items: Vec<String> = (0..len).map(|i| format!(r#"{{"id":"v{}"}}"#, i % 4)).collect();
    Document::new("items.json", format!("[{}]", items.join(",")))
}

#[test]
fn test_event_order_for_large_input() {
    let coordinator = RunCoordinator::new(RunConfig::always_report_progress());
    let mut host = RecordingHost::new("id", SortMode::Descending, ";");

    let outcome = coordinator.run(&mut host, &array_document(2500));

    assert!(outcome.is_completed());
    assert_eq!(
        host.events,
        vec![
            "field",
            "sort",
            "separator (default ,)",
            "begin 正在处理大文件...",
            "yield 40",
            "yield 80",
            "yield 100",
            "end",
            "report items.json",
        ]
    );

    let report = &host.reports[0];
    assert_eq!(report.summary.total_occurrences, 2500);
    assert_eq!(report.lines[2], "v3;出现 625 次");
}

#[test]
fn test_small_input_skips_progress_surface() {
    let coordinator = RunCoordinator::default();
    let mut host = RecordingHost::new("id", SortMode::None, ",");

    coordinator.run(&mut host, &array_document(10));

    assert_eq!(
        host.events,
        vec!["field", "sort", "separator (default ,)", "yield", "report items.json"]
    );
}

#[test]
fn test_cancel_from_host_discards_results() {
    let coordinator = RunCoordinator::new(RunConfig::always_report_progress());
    let mut host = RecordingHost::new("id", SortMode::None, ",");
    host.cancel_after_yields = Some((1, coordinator.cancellation_token()));

    let outcome = coordinator.run(&mut host, &array_document(5000));

    assert_matches!(outcome, RunOutcome::Cancelled);
    assert!(host.reports.is_empty());
    assert_eq!(host.events.iter().filter(|e| e.starts_with("yield")).count(), 1);
    // the progress surface is closed even when traversal stops early
    assert_eq!(host.events.last().map(String::as_str), Some("end"));
}

#[test]
fn test_early_exit_stops_prompting() {
    let coordinator = RunCoordinator::default();
    let mut host = RecordingHost {
        answers: (Some("id".to_string()), None, Some(",".to_string())),
        ..Default::default()
    };

    let outcome = coordinator.run(&mut host, &array_document(3));

    assert_matches!(outcome, RunOutcome::Cancelled);
    assert_eq!(host.events, vec!["field", "sort"]);
}

#[test]
fn test_failure_reaches_host_before_prompts() {
    let coordinator = RunCoordinator::default();
    let mut host = RecordingHost::new("id", SortMode::None, ",");

    let outcome = coordinator.run(&mut host, &Document::new("bad.json", "[1, 2"));

    assert_matches!(outcome, RunOutcome::Failed(ExtractError::ParseError(_)));
    assert_eq!(host.events.len(), 1);
    assert!(host.events[0].starts_with("error JSON parse error"));
}

#[test]
fn test_oversized_document_rejected() {
    let coordinator = RunCoordinator::new(RunConfig::new().with_memory_limit(1024));
    let mut host = RecordingHost::new("id", SortMode::None, ",");

    let outcome = coordinator.run(&mut host, &array_document(200));

    assert_matches!(outcome, RunOutcome::Failed(_));
    assert!(host.events[0].contains("too large"));
}

#[test]
fn test_runs_are_repeatable() {
    let coordinator = RunCoordinator::default();
    let document = array_document(1200);

    let mut first = RecordingHost::new("id", SortMode::Ascending, ",");
    let mut second = RecordingHost::new("id", SortMode::Ascending, ",");
    coordinator.run(&mut first, &document);
    coordinator.run(&mut second, &document);

    assert_eq!(first.reports, second.reports);
}
