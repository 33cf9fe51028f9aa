//! Terminal implementation of the run host
//!
//! Answers come from command-line flags first. Anything still missing is
//! asked for on the terminal when prompting is allowed, otherwise defaults
//! apply (or, for the field name, the run is cancelled).

use std::io::Write;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use console::Term;
use indicatif::ProgressBar;

use super::{CliConfig, CliUtils, OutputFormat};
use crate::error::{ExtractError, ExtractErrorKind, ExtractResult};
use crate::extraction::config::SortMode;
use crate::extraction::coordinator::Host;
use crate::extraction::progress::CancellationToken;
use crate::formatter::Report;
use crate::parser::Document;

/// Host driving a run from the command line
pub struct TerminalHost {
    field: Option<String>,
    sort: Option<SortMode>,
    separator: Option<String>,
    interactive: bool,
    quiet: bool,
    format: OutputFormat,
    output: Option<PathBuf>,
    term: Term,
    progress: Option<ProgressBar>,
    deadline: Option<Instant>,
    cancel: CancellationToken,
    timed_out: bool,
}

impl TerminalHost {
    pub fn new(cancel: CancellationToken) -> Self {
        Self {
            field: None,
            sort: None,
            separator: None,
            interactive: false,
            quiet: false,
            format: OutputFormat::Text,
            output: None,
            term: Term::stderr(),
            progress: None,
            deadline: None,
            cancel,
            timed_out: false,
        }
    }

    /// Host answering from the parsed command line
    pub fn from_config(config: &CliConfig, cancel: CancellationToken) -> Self {
        let mut host = Self::new(cancel)
            .with_answers(
                config.args.field.clone(),
                config.args.sort.map(SortMode::from),
                config.args.separator.clone(),
            )
            .with_output(config.args.format, config.args.output.clone())
            .interactive(config.prompts_enabled());
        host.quiet = config.is_quiet();
        if let Some(timeout) = config.timeout() {
            host = host.with_timeout(timeout);
        }
        host
    }

    /// Pre-supplied answers; `None` leaves the question open
    pub fn with_answers(
        mut self,
        field: Option<String>,
        sort: Option<SortMode>,
        separator: Option<String>,
    ) -> Self {
        self.field = field;
        self.sort = sort;
        self.separator = separator;
        self
    }

    pub fn with_output(mut self, format: OutputFormat, output: Option<PathBuf>) -> Self {
        self.format = format;
        self.output = output;
        self
    }

    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    /// Cancel the run at the first suspension point after `timeout` elapses
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Some(Instant::now() + timeout);
        self
    }

    /// Whether the run was stopped by the watchdog
    pub fn timed_out(&self) -> bool {
        self.timed_out
    }

    fn ask(&self, prompt: &str) -> Option<String> {
        self.term.write_str(prompt).ok()?;
        self.term.read_line().ok()
    }

    fn ask_sort_mode(&self) -> Option<SortMode> {
        let modes = SortMode::all();
        for (index, mode) in modes.iter().enumerate() {
            self.term
                .write_line(&format!("  {}) {}", index + 1, mode.label()))
                .ok()?;
        }

        loop {
            let answer = self.ask("请选择排序方式 [1-3]：")?;
            let answer = answer.trim();
            if answer.is_empty() {
                return None;
            }
            let picked = answer
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| modes.get(i).copied())
                .or_else(|| SortMode::from_str(answer).ok());
            match picked {
                Some(mode) => return Some(mode),
                None => CliUtils::show_warning(&format!("无效的选择：{}", answer), false),
            }
        }
    }

    fn render(&self, report: &Report) -> ExtractResult<String> {
        match self.format {
            OutputFormat::Text => Ok(report.to_text()),
            OutputFormat::Json => report.to_json().map_err(|e| {
                ExtractError::extraction(ExtractErrorKind::ExtractionFailed {
                    message: format!("Failed to serialize report: {}", e),
                })
            }),
        }
    }

    fn check_deadline(&mut self) {
        if self.timed_out {
            return;
        }
        if self.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            log::warn!("processing deadline passed, cancelling");
            self.timed_out = true;
            self.cancel.cancel();
        }
    }
}

impl Host for TerminalHost {
    fn prompt_field_name(&mut self) -> Option<String> {
        if let Some(field) = self.field.take() {
            return Some(field);
        }
        if !self.interactive {
            return None;
        }
        let answer = self.ask("请输入要提取的字段名（例如：name）：")?;
        Some(answer.trim().to_string())
    }

    fn pick_sort_mode(&mut self) -> Option<SortMode> {
        if let Some(mode) = self.sort.take() {
            return Some(mode);
        }
        if !self.interactive {
            return Some(SortMode::None);
        }
        self.ask_sort_mode()
    }

    fn prompt_separator(&mut self, default: &str) -> Option<String> {
        if let Some(separator) = self.separator.take() {
            return Some(separator);
        }
        if !self.interactive {
            return Some(default.to_string());
        }
        let answer = self.ask(&format!("请输入分隔符（默认为 {}）：", default))?;
        if answer.is_empty() {
            Some(default.to_string())
        } else {
            Some(answer)
        }
    }

    fn begin_progress(&mut self, title: &str) {
        if !self.quiet {
            self.progress = Some(CliUtils::create_progress_bar(title));
        }
    }

    fn on_yield(&mut self, progress: Option<f64>) {
        self.check_deadline();
        if let (Some(bar), Some(percent)) = (&self.progress, progress) {
            bar.set_position(percent.clamp(0.0, 100.0) as u64);
        }
    }

    fn end_progress(&mut self) {
        if let Some(bar) = self.progress.take() {
            bar.finish_and_clear();
        }
    }

    fn show_report(&mut self, document: &Document, report: &Report) -> ExtractResult<()> {
        let rendered = self.render(report)?;

        match &self.output {
            Some(path) => {
                let io_error = |e: std::io::Error| {
                    ExtractError::extraction(ExtractErrorKind::io(
                        format!("Failed to write report: {}", e),
                        Some(path.clone()),
                    ))
                };
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent).map_err(io_error)?;
                }
                std::fs::write(path, format!("{}\n", rendered)).map_err(io_error)?;
                CliUtils::show_success(
                    &format!("Report for {} written to {}", document.identifier, path.display()),
                    self.quiet,
                );
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                writeln!(stdout, "{}", rendered).map_err(|e| {
                    ExtractError::extraction(ExtractErrorKind::io(
                        format!("Failed to write report: {}", e),
                        None,
                    ))
                })?;
            }
        }

        Ok(())
    }

    fn show_error(&mut self, message: &str) {
        CliUtils::show_error(message);
    }
}
