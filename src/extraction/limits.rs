use crate::error::{ExtractError, ExtractErrorKind, ExtractResult};
use crate::extraction::config::RunConfig;
use crate::parser::{Document, JsonSource};

/// Check the source size before attempting to read it.
/// This avoids loading very large files into memory if the configured
/// limit is smaller than the file.
pub fn check_source_size_before_read(source: &JsonSource, config: &RunConfig) -> ExtractResult<()> {
    if let Some(size) = source.estimated_size() {
        if size > config.memory_limit as u64 {
            return Err(ExtractError::extraction(ExtractErrorKind::JsonTooLarge {
                size: size as usize,
                limit: config.memory_limit,
            }));
        }
    }

    Ok(())
}

/// Check an already-read document against the configured limit
pub fn check_document_size(document: &Document, config: &RunConfig) -> ExtractResult<()> {
    let size = document.byte_len();
    if size > config.memory_limit {
        return Err(ExtractError::extraction(ExtractErrorKind::JsonTooLarge {
            size,
            limit: config.memory_limit,
        }));
    }

    Ok(())
}
