use jsonvals::extraction::stats::RunStatistics;
use jsonvals::extraction::{
    extract_values, extract_values_with, CancellationToken, NoProgress, RunConfig,
    TraversalSummary,
};
use jsonvals::formatter::{render_value, ReportFormatter};
use jsonvals::SortMode;
use proptest::prelude::*;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::time::Duration;

const KEYS: [&str; 4] = ["name", "id", "tag", "x"];

fn arb_key() -> impl Strategy<Value = &'static str> {
    prop::sample::select(KEYS.to_vec())
}

/// Documents built from a small pool of keys and scalars so fields repeat
fn arb_document() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (0u64..5).prop_map(|n| json!(n)),
        "s[0-4]".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 64, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec((arb_key(), inner), 0..5).prop_map(|pairs| {
                Value::Object(
                    pairs
                        .into_iter()
                        .map(|(key, value)| (key.to_string(), value))
                        .collect(),
                )
            }),
        ]
    })
}

/// Recursive key/value enumeration, independent of the traverser
fn brute_force_count(value: &Value, field: &str) -> usize {
    match value {
        Value::Object(map) => map
            .iter()
            .map(|(key, child)| usize::from(key == field) + brute_force_count(child, field))
            .sum(),
        Value::Array(items) => items.iter().map(|item| brute_force_count(item, field)).sum(),
        _ => 0,
    }
}

proptest! {
    #[test]
    fn test_counts_sum_to_key_occurrences(document in arb_document(), field in arb_key()) {
        let table = extract_values(&document, field).unwrap();
        prop_assert_eq!(table.total_occurrences(), brute_force_count(&document, field));
    }

    #[test]
    fn test_extraction_is_idempotent(document in arb_document(), field in arb_key()) {
        let first = extract_values(&document, field).unwrap().rendered_counts();
        let second = extract_values(&document, field).unwrap().rendered_counts();
        // first-occurrence order is stable as well as the counts
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_batch_size_does_not_change_results(
        items in prop::collection::vec(arb_document(), 0..40),
        batch_size in 1usize..8,
    ) {
        let document = Value::Array(items);
        let expected = extract_values(&document, "id").unwrap().rendered_counts();

        let config = RunConfig::new().with_batch_size(batch_size);
        let table = extract_values_with(
            &document,
            "id",
            &config,
            &mut NoProgress,
            &CancellationToken::new(),
        )
        .unwrap();
        prop_assert_eq!(table.rendered_counts(), expected);
    }

    #[test]
    fn test_report_statistics_round_trip(document in arb_document()) {
        let table = extract_values(&document, "tag").unwrap();
        let report = ReportFormatter::new(SortMode::None, "\u{1}").format(&table);

        prop_assert_eq!(report.summary.distinct_values, table.len());
        prop_assert_eq!(
            report.summary.total_occurrences,
            table.entries().map(|entry| entry.count).sum::<usize>()
        );

        let all_values = report
            .lines
            .last()
            .unwrap()
            .strip_prefix("- 所有值：")
            .unwrap()
            .to_string();
        let mut from_line: Vec<String> = if table.is_empty() {
            Vec::new()
        } else {
            all_values.split('\u{1}').map(str::to_string).collect()
        };
        let mut from_table: Vec<String> =
            table.entries().map(|entry| render_value(entry.value)).collect();
        from_line.sort();
        from_table.sort();
        prop_assert_eq!(from_line, from_table);
    }

    #[test]
    fn test_sorting_preserves_entries(document in arb_document(), field in arb_key()) {
        let table = extract_values(&document, field).unwrap();
        let mut baseline: Vec<(String, usize)> = table.rendered_counts();
        baseline.sort();

        for mode in SortMode::all() {
            let report = ReportFormatter::new(mode, ",").format(&table);
            let mut entries: Vec<(String, usize)> = report
                .entries
                .into_iter()
                .map(|entry| (entry.display, entry.count))
                .collect();
            entries.sort();
            prop_assert_eq!(&entries, &baseline, "sort mode {}", mode.as_str());
        }
    }
}

#[test]
fn test_statistics_json_round_trip() {
    let summary = TraversalSummary {
        nodes_visited: 1200,
        matches: 300,
        batches: 2,
    };
    let stats = RunStatistics::for_run(4096, summary, 12, Duration::from_millis(250));
    let restored = RunStatistics::from_json(&stats.to_json().unwrap()).unwrap();

    assert_eq!(restored.matches, 300);
    assert_eq!(restored.distinct_values, 12);
    assert_eq!(restored.processing_time_ms, 250);
    assert_eq!(restored.collected_at, stats.collected_at);
}

#[test]
fn test_occurrence_counts_by_hand() {
    let document = json!({"tag": "a", "items": [{"tag": "a"}, {"tag": "b"}, [{"tag": "a"}]]});
    let table = extract_values(&document, "tag").unwrap();
    let counts: HashMap<String, usize> = table.rendered_counts().into_iter().collect();

    assert_eq!(counts["a"], 3);
    assert_eq!(counts["b"], 1);
}
