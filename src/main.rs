use clap::Parser;

use anyhow::Result;

use jsonvals::cli::{handle_error, logging, Args, CliConfig, CliUtils, TerminalHost};
use jsonvals::error::{ExtractError, ExtractErrorKind, ExtractResult};
use jsonvals::extraction::limits;
use jsonvals::extraction::{RunCoordinator, RunOutcome, RunStatistics};
use jsonvals::parser::filter::is_json_document;
use jsonvals::parser::JsonSource;

/// How the process should exit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunStatus {
    Success,
    Failure,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = CliConfig::from_args(args)?;

    logging::initialize(config.log_level());
    log::debug!(
        "reading {}, writing to {}",
        config.input_description(),
        config.output_description()
    );

    match run(&config) {
        Ok(RunStatus::Success) => Ok(()),
        Ok(RunStatus::Failure) => std::process::exit(1),
        Err(err) => {
            handle_error(&err);
            std::process::exit(1);
        }
    }
}

fn run(config: &CliConfig) -> ExtractResult<RunStatus> {
    let source = config.input_source()?;
    limits::check_source_size_before_read(&source, &config.run_config)?;

    let document = source.load()?;
    // inline and stdin text go straight to the parser, which reports where it broke
    if let JsonSource::File(path) = &source {
        if !is_json_document(path, &document.text) {
            return Err(ExtractError::extraction(ExtractErrorKind::NotJson {
                source_name: document.identifier.clone(),
            }));
        }
    }

    let coordinator = RunCoordinator::new(config.run_config.clone());
    let mut host = TerminalHost::from_config(config, coordinator.cancellation_token());
    let outcome = coordinator.run(&mut host, &document);

    if host.timed_out() {
        let limit = config.timeout().unwrap_or_default();
        CliUtils::show_error(&format!(
            "Processing timed out after {}",
            CliUtils::format_duration(limit)
        ));
        eprintln!("\nTip: Use --timeout to increase processing time limit");
        return Ok(RunStatus::Failure);
    }

    match outcome {
        RunOutcome::Completed { statistics, .. } => {
            if config.want_stats() {
                output_statistics(&statistics);
            }
            Ok(RunStatus::Success)
        }
        RunOutcome::Cancelled => {
            log::info!("run cancelled, nothing to report");
            Ok(RunStatus::Success)
        }
        // Already shown by the host
        RunOutcome::Failed(_) => Ok(RunStatus::Failure),
    }
}

fn output_statistics(statistics: &RunStatistics) {
    eprintln!("\nRun Statistics:");
    eprintln!(
        "Input size: {}",
        CliUtils::format_file_size(statistics.input_size_bytes)
    );
    eprintln!("Nodes visited: {}", statistics.nodes_visited);
    eprintln!("Matches: {}", statistics.matches);
    eprintln!("Distinct values: {}", statistics.distinct_values);
    eprintln!("Batches: {}", statistics.batches);
    eprintln!(
        "Processing time: {}",
        CliUtils::format_duration(std::time::Duration::from_millis(
            statistics.processing_time_ms
        ))
    );
}
