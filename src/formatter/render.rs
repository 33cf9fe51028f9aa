use crate::extraction::table::canonical_number;
use serde_json::Value;

/// Natural string form of a value as it appears in the report.
///
/// Strings are printed without quotes, other scalars as their JSON literal,
/// and objects or arrays as compact JSON in document order.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => canonical_number(n),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}
