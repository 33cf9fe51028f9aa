use std::path::Path;

/// Return true if the path carries a `.json` extension (any case)
pub fn has_json_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Return true if an inline argument should be read as JSON text rather than a path
pub fn looks_like_inline_json(input: &str) -> bool {
    let trimmed = input.trim();
    (trimmed.starts_with('{') && trimmed.ends_with('}'))
        || (trimmed.starts_with('[') && trimmed.ends_with(']'))
}

/// Best-effort gate deciding whether a file should be treated as JSON.
///
/// A `.json` extension is enough; otherwise the text itself has to parse.
pub fn is_json_document(path: &Path, text: &str) -> bool {
    if has_json_extension(path) {
        return true;
    }
    serde_json::from_str::<serde::de::IgnoredAny>(text).is_ok()
}
