//! Error types and handling infrastructure for field value extraction

use anyhow::Error;
use std::fmt;
use std::path::PathBuf;

/// How a failure should be surfaced to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The document or request could not be processed
    InvalidInput,
    /// The user (or a watchdog acting for them) stopped the run
    UserCancelled,
    /// Anything else that went wrong during traversal or formatting
    RuntimeFailure,
}

/// Core error kinds for the extraction process
#[derive(Debug, thiserror::Error)]
pub enum ExtractErrorKind {
    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
    },

    #[error("Not a JSON document: {source_name}")]
    NotJson { source_name: String },

    #[error("JSON too large: {size} bytes (limit: {limit} bytes)")]
    JsonTooLarge { size: usize, limit: usize },

    #[error("Maximum nesting depth ({limit}) exceeded at depth {depth}")]
    DepthLimitExceeded { depth: usize, limit: usize },

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("Extraction cancelled")]
    Cancelled,

    #[error("Extraction failed: {message}")]
    ExtractionFailed { message: String },
}

impl ExtractErrorKind {
    pub fn io(message: String, path: Option<PathBuf>) -> Self {
        Self::Io { message, path }
    }

    pub fn invalid_request(message: String) -> Self {
        Self::InvalidRequest { message }
    }
}

/// Main error type for extraction operations
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error(transparent)]
    ParseError(#[from] ParseError),

    #[error("{kind}")]
    Extraction { kind: ExtractErrorKind },

    #[error(transparent)]
    Other(#[from] Error),
}

impl ExtractError {
    pub fn parse(message: String, location: Option<(usize, usize)>) -> Self {
        Self::ParseError(ParseError::new(message, location))
    }

    pub fn extraction(kind: ExtractErrorKind) -> Self {
        Self::Extraction { kind }
    }

    pub fn cancelled() -> Self {
        Self::extraction(ExtractErrorKind::Cancelled)
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::extraction(ExtractErrorKind::invalid_request(message.into()))
    }

    pub fn other(error: Error) -> Self {
        Self::Other(error)
    }

    /// Whether this error is a cancellation rather than a failure
    pub fn is_cancelled(&self) -> bool {
        matches!(
            self,
            Self::Extraction {
                kind: ExtractErrorKind::Cancelled
            }
        )
    }

    /// Map the error onto the user-facing taxonomy
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ParseError(_) => ErrorCategory::InvalidInput,
            Self::Extraction { kind } => match kind {
                ExtractErrorKind::Cancelled => ErrorCategory::UserCancelled,
                ExtractErrorKind::NotJson { .. }
                | ExtractErrorKind::JsonTooLarge { .. }
                | ExtractErrorKind::InvalidRequest { .. } => ErrorCategory::InvalidInput,
                ExtractErrorKind::Io { .. }
                | ExtractErrorKind::DepthLimitExceeded { .. }
                | ExtractErrorKind::ExtractionFailed { .. } => ErrorCategory::RuntimeFailure,
            },
            Self::Other(_) => ErrorCategory::RuntimeFailure,
        }
    }

    /// Create a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::ParseError(err) => {
                if let Some((line, col)) = err.location {
                    format!(
                        "JSON parse error at line {}, column {}: {}",
                        line, col, err.message
                    )
                } else {
                    format!("JSON parse error: {}", err.message)
                }
            }
            Self::Extraction { kind } => match kind {
                ExtractErrorKind::NotJson { source_name } => {
                    format!("{} is not a valid JSON document", source_name)
                }
                ExtractErrorKind::JsonTooLarge { size, limit } => {
                    format!(
                        "JSON document too large: {} bytes (limit: {} bytes)",
                        size, limit
                    )
                }
                ExtractErrorKind::Io { message, path } => match path {
                    Some(path) => format!("IO error on {}: {}", path.display(), message),
                    None => format!("IO error: {}", message),
                },
                _ => self.to_string(),
            },
            Self::Other(err) => {
                format!("Error processing JSON: {}", err)
            }
        }
    }

    /// The offending input line with a caret, for parse errors that have one
    pub fn input_preview(&self) -> Option<&str> {
        match self {
            Self::ParseError(err) => err.input_preview.as_deref(),
            _ => None,
        }
    }

    /// [`user_message`](Self::user_message) followed by the input preview, if any
    pub fn detailed_message(&self) -> String {
        match self.input_preview() {
            Some(preview) => format!("{}\n{}", self.user_message(), preview),
            None => self.user_message(),
        }
    }
}

/// JSON parsing errors
#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub location: Option<(usize, usize)>,
    pub input_preview: Option<String>,
}

impl ParseError {
    pub fn new(message: String, location: Option<(usize, usize)>) -> Self {
        Self {
            message,
            location,
            input_preview: None,
        }
    }

    pub fn with_preview(mut self, preview: String) -> Self {
        self.input_preview = Some(preview);
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some((line, col)) = self.location {
            write!(f, " at line {}, column {}", line, col)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// Result type for extraction operations
pub type ExtractResult<T> = Result<T, ExtractError>;

/// Convenience result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;
