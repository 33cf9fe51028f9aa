//! Frequency table of extracted values
//!
//! JSON values are neither hashable nor ordered, so each recorded value is
//! reduced to a [`ValueKey`]. Scalars are keyed by type and content. Objects
//! and arrays are keyed either by a canonical serialization (sorted object
//! keys, normalized numbers) or by the identity of the node they came from,
//! depending on [`KeyingMode`].

use crate::extraction::config::KeyingMode;
use crate::formatter::render::render_value;
use indexmap::IndexMap;
use serde_json::{Number, Value};

/// Hashable stand-in for a JSON value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueKey {
    Null,
    Bool(bool),
    Number(String),
    String(String),
    /// Canonical serialization of an object or array
    Composite(String),
    /// Address of an object or array node inside the borrowed document
    Instance(usize),
}

impl ValueKey {
    /// Compute the key for `value` under the given keying strategy
    pub fn of(value: &Value, keying: KeyingMode) -> Self {
        match value {
            Value::Null => ValueKey::Null,
            Value::Bool(b) => ValueKey::Bool(*b),
            Value::Number(n) => ValueKey::Number(canonical_number(n)),
            Value::String(s) => ValueKey::String(s.clone()),
            Value::Array(_) | Value::Object(_) => match keying {
                KeyingMode::Structural => ValueKey::Composite(canonical_json(value)),
                KeyingMode::Identity => ValueKey::Instance(value as *const Value as usize),
            },
        }
    }
}

/// Number text used for both keying and display.
///
/// Integral floats print without a fractional part so that `1` and `1.0`
/// (and `0` and `-0.0`) land on the same key.
pub fn canonical_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < 9_007_199_254_740_992.0 => {
            (f as i64).to_string()
        }
        _ => n.to_string(),
    }
}

/// Stable serialization with object keys sorted
pub fn canonical_json(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&canonical_number(n)),
        Value::String(s) => out.push_str(&Value::from(s.as_str()).to_string()),
        Value::Array(items) => {
            out.push('[');
            for (index, item) in items.iter().enumerate() {
                if index > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));

            out.push('{');
            for (index, (key, item)) in entries.into_iter().enumerate() {
                if index > 0 {
                    out.push(',');
                }
                out.push_str(&Value::from(key.as_str()).to_string());
                out.push(':');
                write_canonical(item, out);
            }
            out.push('}');
        }
    }
}

/// One distinct value and how often it was seen
#[derive(Debug, Clone, Copy)]
pub struct TableEntry<'a> {
    /// The first occurrence of this value in traversal order
    pub value: &'a Value,
    pub count: usize,
}

impl TableEntry<'_> {
    /// The value's natural string form
    pub fn rendered(&self) -> String {
        render_value(self.value)
    }
}

/// Insertion-ordered mapping from distinct values to occurrence counts
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable<'a> {
    keying: KeyingMode,
    entries: IndexMap<ValueKey, TableEntry<'a>>,
    total: usize,
}

impl<'a> FrequencyTable<'a> {
    pub fn new(keying: KeyingMode) -> Self {
        Self {
            keying,
            entries: IndexMap::new(),
            total: 0,
        }
    }

    /// Count one more occurrence of `value`
    pub fn record(&mut self, value: &'a Value) {
        let key = ValueKey::of(value, self.keying);
        self.entries
            .entry(key)
            .and_modify(|entry| entry.count += 1)
            .or_insert(TableEntry { value, count: 1 });
        self.total += 1;
    }

    /// Number of distinct values
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts
    pub fn total_occurrences(&self) -> usize {
        self.total
    }

    pub fn keying(&self) -> KeyingMode {
        self.keying
    }

    /// Entries in first-occurrence order
    pub fn entries(&self) -> impl Iterator<Item = &TableEntry<'a>> {
        self.entries.values()
    }

    /// How often a value equal to `value` was recorded
    pub fn count_of(&self, value: &Value) -> usize {
        self.entries
            .get(&ValueKey::of(value, self.keying))
            .map_or(0, |entry| entry.count)
    }

    /// `(rendered value, count)` pairs in first-occurrence order
    pub fn rendered_counts(&self) -> Vec<(String, usize)> {
        self.entries()
            .map(|entry| (entry.rendered(), entry.count))
            .collect()
    }
}
