//! Document loading and JSON parsing module

pub mod filter;

use crate::error::{ExtractError, ExtractErrorKind, ExtractResult, ParseError, ParseResult};
use std::io::Read;
use std::path::PathBuf;

/// Where a JSON document comes from
#[derive(Debug, Clone, PartialEq)]
pub enum JsonSource {
    /// Raw JSON string input
    String(String),
    /// Single JSON file path
    File(PathBuf),
    /// Standard input stream
    Stdin,
}

impl JsonSource {
    /// Get a human-readable description of the source
    pub fn description(&self) -> String {
        match self {
            JsonSource::String(_) => "string input".to_string(),
            JsonSource::File(path) => format!("file: {}", path.display()),
            JsonSource::Stdin => "standard input".to_string(),
        }
    }

    /// Identifier shown alongside the report
    pub fn identifier(&self) -> String {
        match self {
            JsonSource::String(_) => "<inline>".to_string(),
            JsonSource::File(path) => path.display().to_string(),
            JsonSource::Stdin => "<stdin>".to_string(),
        }
    }

    /// Get the size of the source in bytes, if known without reading it
    pub fn estimated_size(&self) -> Option<u64> {
        match self {
            JsonSource::String(s) => Some(s.len() as u64),
            JsonSource::File(path) => std::fs::metadata(path).ok().map(|m| m.len()),
            JsonSource::Stdin => None,
        }
    }

    /// Read the source into a [`Document`]
    pub fn load(&self) -> ExtractResult<Document> {
        let text = match self {
            JsonSource::String(content) => content.clone(),
            JsonSource::File(path) => std::fs::read_to_string(path).map_err(|e| {
                ExtractError::extraction(ExtractErrorKind::io(
                    format!("Failed to read file: {}", e),
                    Some(path.clone()),
                ))
            })?,
            JsonSource::Stdin => {
                let mut buffer = String::new();
                std::io::stdin().read_to_string(&mut buffer).map_err(|e| {
                    ExtractError::extraction(ExtractErrorKind::io(
                        format!("Failed to read stdin: {}", e),
                        None,
                    ))
                })?;
                buffer
            }
        };

        Ok(Document::new(self.identifier(), text))
    }
}

/// Raw document text plus the identifier of where it came from
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub identifier: String,
    pub text: String,
}

impl Document {
    pub fn new(identifier: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            text: text.into(),
        }
    }

    /// Size of the document text in UTF-8 bytes
    pub fn byte_len(&self) -> usize {
        self.text.len()
    }

    /// Parse the document text as JSON
    pub fn parse(&self) -> ParseResult<serde_json::Value> {
        parse_from_string(&self.text)
    }
}

/// Parse JSON from a string
pub fn parse_from_string(content: &str) -> ParseResult<serde_json::Value> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(ParseError::new("Empty JSON document".to_string(), None));
    }

    serde_json::from_str(trimmed).map_err(|e| {
        let location = error_location(&e);
        let error = ParseError::new(format!("Invalid JSON: {}", e), location);
        match location.and_then(|(line, col)| error_preview(trimmed, line, col)) {
            Some(preview) => error.with_preview(preview),
            None => error,
        }
    })
}

/// Line and column of a serde_json error, when it points into the input
fn error_location(error: &serde_json::Error) -> Option<(usize, usize)> {
    match (error.line(), error.column()) {
        (0, _) => None,
        (line, column) => Some((line, column)),
    }
}

/// The offending line with a caret under the reported column
fn error_preview(content: &str, line: usize, col: usize) -> Option<String> {
    let error_line = content.lines().nth(line.checked_sub(1)?)?;
    let offset = error_line.chars().take(col.saturating_sub(1)).count();
    Some(format!("{}\n{}^", error_line, " ".repeat(offset)))
}
