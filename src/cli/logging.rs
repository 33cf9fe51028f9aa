//! Logger initialization for the command-line tool.
//!
//! Logs go to stderr so they never mix with a report written to stdout.

use log::LevelFilter;
use simplelog::{ColorChoice, CombinedLogger, Config, ConfigBuilder, TermLogger, TerminalMode};

/// Install a terminal logger at `level`.
///
/// A second call is a no-op; the first installed logger stays in place.
pub fn initialize(level: LevelFilter) {
    let color = if super::CliUtils::should_use_color() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };

    let installed = CombinedLogger::init(vec![TermLogger::new(
        level,
        build_config(),
        TerminalMode::Stderr,
        color,
    )]);
    if let Err(err) = installed {
        log::debug!("keeping the existing logger: {}", err);
    }
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}
