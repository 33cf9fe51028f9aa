//! Command-line interface module

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{ExtractError, ExtractErrorKind, ExtractResult};
use crate::extraction::config::{KeyingMode, RunConfig, SortMode, DEFAULT_LARGE_INPUT_THRESHOLD};
use crate::parser::filter::looks_like_inline_json;
use crate::parser::JsonSource;

pub mod host;
pub mod logging;

pub use host::TerminalHost;

/// Main CLI arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "jsonvals")]
#[command(about = "Extract every value of a field from a JSON document and count occurrences")]
#[command(version)]
#[command(long_about = None)]
pub struct Args {
    /// Input JSON source (inline JSON string or file path)
    #[arg()]
    pub input: Option<String>,

    /// Read JSON from standard input
    #[arg(long)]
    pub stdin: bool,

    /// Field name to extract (prompted for when omitted)
    #[arg(short, long)]
    pub field: Option<String>,

    /// Ordering of distinct values (prompted for when omitted)
    #[arg(long, value_enum)]
    pub sort: Option<SortOrder>,

    /// Separator between a value and its count (prompted for when omitted)
    #[arg(short, long, allow_hyphen_values = true)]
    pub separator: Option<String>,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// How objects and arrays found under the field are told apart
    #[arg(long, value_enum, default_value_t = Keying::Structural)]
    pub keying: Keying,

    /// Array elements processed between suspension points (default: 1000)
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Input size above which a progress bar is shown (e.g., 5MB, default: 5MB)
    #[arg(long)]
    pub progress_threshold: Option<String>,

    /// Maximum input size (e.g., 100MB, default: 100MB)
    #[arg(long)]
    pub memory_limit: Option<String>,

    /// Maximum nesting depth to descend into
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Maximum processing time in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Never prompt; missing answers fall back to defaults
    #[arg(long)]
    pub no_prompt: bool,

    /// Output run statistics to stderr
    #[arg(long)]
    pub stats: bool,

    /// Enable verbose logging
    #[arg(long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(long)]
    pub quiet: bool,
}

/// Sort orders accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    #[value(name = "none")]
    None,
    #[value(name = "asc", alias = "ascending")]
    Asc,
    #[value(name = "desc", alias = "descending")]
    Desc,
}

impl From<SortOrder> for SortMode {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::None => SortMode::None,
            SortOrder::Asc => SortMode::Ascending,
            SortOrder::Desc => SortMode::Descending,
        }
    }
}

/// Keying strategies accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keying {
    Structural,
    Identity,
}

impl From<Keying> for KeyingMode {
    fn from(keying: Keying) -> Self {
        match keying {
            Keying::Structural => KeyingMode::Structural,
            Keying::Identity => KeyingMode::Identity,
        }
    }
}

/// Report output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// The plain-text report
    Text,
    /// Structured JSON with entries and summary
    Json,
}

/// CLI configuration
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub args: Args,
    pub run_config: RunConfig,
}

impl CliConfig {
    /// Create CLI configuration from arguments
    pub fn from_args(args: Args) -> ExtractResult<Self> {
        let run_config = Self::create_run_config(&args)?;

        Ok(Self { args, run_config })
    }

    /// Create run configuration from CLI arguments
    fn create_run_config(args: &Args) -> ExtractResult<RunConfig> {
        let mut config = RunConfig::new()
            .with_keying(args.keying.into())
            .with_max_depth(args.max_depth)
            .with_memory_limit(parse_size(&args.memory_limit, 100 * 1024 * 1024)?)
            .with_large_input_threshold(parse_size(
                &args.progress_threshold,
                DEFAULT_LARGE_INPUT_THRESHOLD,
            )?);
        if let Some(batch_size) = args.batch_size {
            config = config.with_batch_size(batch_size);
        }

        config.validate().map_err(ExtractError::invalid_request)?;

        Ok(config)
    }

    /// Resolve where the document comes from
    pub fn input_source(&self) -> ExtractResult<JsonSource> {
        if self.args.stdin {
            return Ok(JsonSource::Stdin);
        }

        let Some(input) = &self.args.input else {
            return Err(ExtractError::invalid_request(
                "No input provided. Use --stdin or provide an input path",
            ));
        };

        if looks_like_inline_json(input) {
            return Ok(JsonSource::String(input.clone()));
        }

        let path = PathBuf::from(input);
        if path.is_file() {
            Ok(JsonSource::File(path))
        } else {
            Err(ExtractError::extraction(ExtractErrorKind::io(
                "Input path does not exist or is not a file".to_string(),
                Some(path),
            )))
        }
    }

    /// Whether missing answers may be asked for on the terminal
    pub fn prompts_enabled(&self) -> bool {
        !self.args.no_prompt && !self.args.stdin && atty::is(atty::Stream::Stdin)
    }

    /// Processing deadline, if any
    pub fn timeout(&self) -> Option<Duration> {
        self.args.timeout.map(Duration::from_secs)
    }

    /// Check if quiet mode is enabled
    pub fn is_quiet(&self) -> bool {
        self.args.quiet
    }

    /// Check if stats output is requested
    pub fn want_stats(&self) -> bool {
        self.args.stats
    }

    /// Log level implied by `--verbose` and `--quiet`
    pub fn log_level(&self) -> log::LevelFilter {
        if self.args.verbose {
            log::LevelFilter::Debug
        } else if self.args.quiet {
            log::LevelFilter::Error
        } else {
            log::LevelFilter::Warn
        }
    }

    /// Get input source description
    pub fn input_description(&self) -> String {
        if self.args.stdin {
            "standard input".to_string()
        } else if let Some(input) = &self.args.input {
            format!("'{}'", input)
        } else {
            "no input specified".to_string()
        }
    }

    /// Get output destination description
    pub fn output_description(&self) -> String {
        if let Some(output) = &self.args.output {
            format!("'{}'", output.display())
        } else {
            "standard output".to_string()
        }
    }
}

/// Parse a size string (e.g., "100MB", "1GB", "500KB", "2048")
pub fn parse_size(limit: &Option<String>, default: usize) -> ExtractResult<usize> {
    let Some(limit_str) = limit else {
        return Ok(default);
    };

    let limit_str = limit_str.trim().to_uppercase();
    let invalid = || ExtractError::invalid_request(format!("Invalid size: {}", limit_str));

    let (number, multiplier) = if let Some(size) = limit_str.strip_suffix("GB") {
        (size, 1024.0 * 1024.0 * 1024.0)
    } else if let Some(size) = limit_str.strip_suffix("MB") {
        (size, 1024.0 * 1024.0)
    } else if let Some(size) = limit_str.strip_suffix("KB") {
        (size, 1024.0)
    } else if let Some(size) = limit_str.strip_suffix('B') {
        return size.trim().parse::<usize>().map_err(|_| invalid());
    } else {
        // Assume bytes
        return limit_str.parse::<usize>().map_err(|_| invalid());
    };

    let value = number.trim().parse::<f64>().map_err(|_| invalid())?;
    if !value.is_finite() || value < 0.0 {
        return Err(invalid());
    }
    Ok((value * multiplier) as usize)
}

/// CLI utilities and helpers
pub struct CliUtils;

impl CliUtils {
    /// Format a file size in human-readable format
    pub fn format_file_size(bytes: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = bytes as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", bytes, UNITS[unit_index])
        } else {
            format!("{:.1} {}", size, UNITS[unit_index])
        }
    }

    /// Format a duration in human-readable format
    pub fn format_duration(duration: Duration) -> String {
        let total_millis = duration.as_millis();

        if total_millis < 1000 {
            format!("{}ms", total_millis)
        } else if total_millis < 60_000 {
            format!("{:.1}s", total_millis as f64 / 1000.0)
        } else {
            let minutes = total_millis / 60_000;
            let seconds = (total_millis % 60_000) / 1000;
            format!("{}m {}s", minutes, seconds)
        }
    }

    /// Create a percentage progress bar for large documents
    pub fn create_progress_bar(title: &str) -> indicatif::ProgressBar {
        let pb = indicatif::ProgressBar::new(100);
        let style = indicatif::ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}% {msg}")
            .unwrap_or_else(|_| indicatif::ProgressStyle::default_bar())
            .progress_chars("#>-");
        pb.set_style(style);
        pb.set_message(title.to_string());
        pb
    }

    /// Show a success message on stderr (if not in quiet mode)
    pub fn show_success(message: &str, quiet: bool) {
        if !quiet {
            eprintln!("{} {}", Self::paint_green("✓"), message);
        }
    }

    /// Show an error message
    pub fn show_error(message: &str) {
        eprintln!("{} {}", Self::paint_red("✗"), message);
    }

    /// Show a warning message (if not in quiet mode)
    pub fn show_warning(message: &str, quiet: bool) {
        if !quiet {
            eprintln!("⚠ {}", message);
        }
    }

    /// Check if output should be colored
    pub fn should_use_color() -> bool {
        atty::is(atty::Stream::Stderr) && std::env::var("NO_COLOR").is_err()
    }

    fn paint_green(mark: &str) -> String {
        if Self::should_use_color() {
            console::style(mark).green().to_string()
        } else {
            mark.to_string()
        }
    }

    fn paint_red(mark: &str) -> String {
        if Self::should_use_color() {
            console::style(mark).red().to_string()
        } else {
            mark.to_string()
        }
    }
}

/// Handle CLI errors with user-friendly messages
pub fn handle_error(error: &ExtractError) {
    CliUtils::show_error(&error.detailed_message());

    // Provide helpful suggestions
    if let ExtractError::Extraction { kind } = error {
        match kind {
            ExtractErrorKind::JsonTooLarge { .. } => {
                eprintln!("\nTip: Use --memory-limit to increase the size allowance");
            }
            ExtractErrorKind::DepthLimitExceeded { .. } => {
                eprintln!("\nTip: Use --max-depth to allow deeper nesting");
            }
            _ => {}
        }
    }

    eprintln!("\nTry 'jsonvals --help' for usage information.");
}
