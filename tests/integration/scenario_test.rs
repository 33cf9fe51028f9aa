//! Reference scenarios for extraction and report rendering

use jsonvals::extraction::{extract_values, KeyingMode, RunConfig};
use jsonvals::formatter::{format_report, ReportFormatter};
use jsonvals::{extract_report, SortMode};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn scenario() -> Value {
    json!({"a": [{"name": "x"}, {"name": "y"}, {"name": "x"}]})
}

fn value_lines(lines: &[String]) -> Vec<&str> {
    // between the two dividers
    lines[2..lines.len() - 5].iter().map(String::as_str).collect()
}

#[test]
fn test_unsorted_scenario() {
    let document = scenario();
    let table = extract_values(&document, "name").unwrap();

    assert_eq!(
        table.rendered_counts(),
        vec![("x".to_string(), 2), ("y".to_string(), 1)]
    );

    let lines = format_report(&table, SortMode::None, ",");
    assert_eq!(value_lines(&lines), vec!["x,出现 2 次", "y,出现 1 次"]);
    assert!(lines.contains(&"- 不同值的数量：2".to_string()));
    assert!(lines.contains(&"- 字段总出现次数：3".to_string()));
}

#[test]
fn test_ascending_scenario() {
    let document = scenario();
    let table = extract_values(&document, "name").unwrap();
    let lines = format_report(&table, SortMode::Ascending, ",");

    assert_eq!(value_lines(&lines), vec!["x,出现 2 次", "y,出现 1 次"]);
}

#[test]
fn test_descending_scenario() {
    let document = scenario();
    let table = extract_values(&document, "name").unwrap();
    let lines = format_report(&table, SortMode::Descending, ",");

    assert_eq!(value_lines(&lines), vec!["y,出现 1 次", "x,出现 2 次"]);
    assert_eq!(lines.last().unwrap(), "- 所有值：y,x");
}

#[test]
fn test_matched_values_are_traversed_into() {
    let document = json!({"name": {"name": "inner"}});
    let table = extract_values(&document, "name").unwrap();

    assert_eq!(table.len(), 2);
    assert_eq!(table.count_of(&json!({"name": "inner"})), 1);
    assert_eq!(table.count_of(&json!("inner")), 1);

    let lines = format_report(&table, SortMode::None, ",");
    assert_eq!(
        value_lines(&lines),
        vec![r#"{"name":"inner"},出现 1 次"#, "inner,出现 1 次"]
    );
}

#[test]
fn test_empty_document() {
    let lines = extract_report(&json!({}), "anything").unwrap();

    assert_eq!(
        lines,
        vec![
            "提取结果：",
            "--------------------",
            "--------------------",
            "统计信息：",
            "- 不同值的数量：0",
            "- 字段总出现次数：0",
            "- 所有值：",
        ]
    );
}

#[test]
fn test_no_matching_field_matches_empty_document() {
    let document = json!({"a": [1, 2, {"b": {"c": null}}]});
    assert_eq!(
        extract_report(&document, "name").unwrap(),
        extract_report(&json!({}), "name").unwrap()
    );
}

#[test]
fn test_mixed_value_types() {
    let document = json!([
        {"v": 1},
        {"v": 1.0},
        {"v": "1"},
        {"v": true},
        {"v": null},
        {"v": [1, 2]},
        {"v": {"b": 2, "a": 1}},
        {"v": {"a": 1, "b": 2}}
    ]);
    let table = extract_values(&document, "v").unwrap();

    // 1 and 1.0 are the same number; the two objects are structurally equal
    assert_eq!(
        table.rendered_counts(),
        vec![
            ("1".to_string(), 2),
            ("1".to_string(), 1),
            ("true".to_string(), 1),
            ("null".to_string(), 1),
            ("[1,2]".to_string(), 1),
            (r#"{"b":2,"a":1}"#.to_string(), 2),
        ]
    );
}

#[test]
fn test_identity_keying_keeps_equal_objects_apart() {
    let document = json!([{"v": {"a": 1}}, {"v": {"a": 1}}, {"v": 3}, {"v": 3}]);
    let config = RunConfig::new().with_keying(KeyingMode::Identity);
    let table = jsonvals::extract_values_with(
        &document,
        "v",
        &config,
        &mut jsonvals::extraction::NoProgress,
        &jsonvals::CancellationToken::new(),
    )
    .unwrap();

    assert_eq!(
        table.rendered_counts(),
        vec![
            (r#"{"a":1}"#.to_string(), 1),
            (r#"{"a":1}"#.to_string(), 1),
            ("3".to_string(), 2),
        ]
    );
}

#[test]
fn test_separator_inside_values() {
    let document = json!([{"k": "a,b"}, {"k": "c"}]);
    let table = extract_values(&document, "k").unwrap();
    let report = ReportFormatter::new(SortMode::None, ",").format(&table);

    // splitting the "all values" line is ambiguous here, the structured entries are not
    assert_eq!(report.lines.last().unwrap(), "- 所有值：a,b,c");
    assert_eq!(report.entries.len(), 2);
    assert_eq!(report.entries[0].display, "a,b");
}
