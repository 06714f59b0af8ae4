//! Integration tests for response reduction

use kontos::error::KontosError;
use kontos::query::AggregationPath;
use kontos::response::reduce;
use serde_json::{Value, json};

fn bucket(key: &str, doc_count: u64, score: f64) -> Value {
    json!({
        "key": key,
        "doc_count": doc_count,
        "top_hits": {
            "hits": {
                "hits": [
                    {"_source": {"assignee_id": key}, "_score": score}
                ]
            }
        }
    })
}

fn response_with(buckets: Vec<Value>) -> Value {
    json!({"aggregations": {"assignee_id": {"buckets": buckets}}})
}

fn path() -> AggregationPath {
    AggregationPath::single("assignee_id").unwrap()
}

#[test]
fn test_n_buckets_produce_n_rows() {
    for n in [1usize, 3, 25] {
        let buckets: Vec<Value> = (0..n)
            .map(|i| bucket(&format!("A{i}"), 1, i as f64))
            .collect();
        let reduction = reduce(&response_with(buckets), &path()).unwrap();
        assert_eq!(reduction.table.len(), n);
        assert_eq!(reduction.entity_count, n);
    }
}

#[test]
fn test_row_score_equals_bucket_top_hit_score() {
    let reduction = reduce(
        &response_with(vec![bucket("A1", 4, 7.5), bucket("A2", 2, 3.25)]),
        &path(),
    )
    .unwrap();
    for row in &reduction.table {
        let expected = match row.key.as_str() {
            "A1" => 7.5,
            "A2" => 3.25,
            other => panic!("unexpected key {other}"),
        };
        assert_eq!(row.score, expected);
    }
}

#[test]
fn test_rows_sorted_by_score_descending() {
    let buckets = vec![
        bucket("A1", 1, 2.0),
        bucket("A2", 1, 9.0),
        bucket("A3", 1, 5.5),
        bucket("A4", 1, 9.0),
        bucket("A5", 1, 0.1),
    ];
    let reduction = reduce(&response_with(buckets), &path()).unwrap();
    let rows = reduction.table.rows();
    for pair in rows.windows(2) {
        assert!(
            pair[0].score >= pair[1].score,
            "rows out of order: {} before {}",
            pair[0].score,
            pair[1].score
        );
    }
    // Equal scores keep backend order (stable, no secondary key).
    assert_eq!(rows[0].key, "A2");
    assert_eq!(rows[1].key, "A4");
}

#[test]
fn test_missing_aggregations_key_fails() {
    let response = json!({"took": 12, "hits": {"total": {"value": 0}, "hits": []}});
    let err = reduce(&response, &path()).unwrap_err();
    assert!(matches!(err, KontosError::MalformedResponse(_)));
}

#[test]
fn test_empty_hit_list_fails_with_no_partial_table() {
    let buckets = vec![
        bucket("A1", 5, 12.3),
        json!({"key": "A2", "doc_count": 1, "top_hits": {"hits": {"hits": []}}}),
        bucket("A3", 2, 4.0),
    ];
    let err = reduce(&response_with(buckets), &path()).unwrap_err();
    assert!(matches!(err, KontosError::MalformedResponse(_)));
}

#[test]
fn test_mismatched_aggregation_path_fails_loudly() {
    // Reducing with a different path than the request was built with is a
    // contract violation and must not silently misparse.
    let response = response_with(vec![bucket("A1", 1, 1.0)]);
    let other_path = AggregationPath::single("entity_id").unwrap();
    let err = reduce(&response, &other_path).unwrap_err();
    assert!(matches!(err, KontosError::MalformedResponse(_)));
}

#[test]
fn test_total_record_count_sums_bucket_counts() {
    let reduction = reduce(
        &response_with(vec![bucket("A1", 5, 2.0), bucket("A2", 1, 1.0)]),
        &path(),
    )
    .unwrap();
    assert_eq!(reduction.total_record_count, 6);
}

#[test]
fn test_reduce_is_idempotent() {
    let response = response_with(vec![bucket("A1", 5, 2.0), bucket("A2", 1, 1.0)]);
    let first = reduce(&response, &path()).unwrap();
    let second = reduce(&response, &path()).unwrap();
    assert_eq!(first, second);
}
