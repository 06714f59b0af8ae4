//! Reduction of a raw backend response into a flat result table.

use serde_json::Value;

use crate::error::{KontosError, Result};
use crate::query::AggregationPath;
use crate::response::tree::AggregationLevel;
use crate::table::{ResultRow, ResultTable};

/// The outcome of reducing one response: the flat table plus summary counts
/// derived in the same pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Reduction {
    /// One row per resolved entity, sorted by score descending.
    pub table: ResultTable,
    /// Number of resolved entities (terminal buckets).
    pub entity_count: usize,
    /// Total underlying records at the first aggregation level: the
    /// backend-reported count when present, else the sum of bucket counts.
    pub total_record_count: u64,
}

/// Flatten a raw backend response into a [`Reduction`].
///
/// `path` must be the same [`AggregationPath`] the request was built with;
/// a response that does not follow it fails with
/// [`KontosError::MalformedResponse`] rather than producing a partial table.
///
/// Each terminal bucket contributes exactly one row, taken from its
/// top-hits sub-aggregation. The first hit is used as the representative;
/// the backend is trusted to return hits best-score-first. A bucket with an
/// empty hit list is an error.
pub fn reduce(response: &Value, path: &AggregationPath) -> Result<Reduction> {
    let root = AggregationLevel::from_response(response, path)?;
    let total_record_count = root.total_doc_count();

    let mut rows = Vec::new();
    for bucket in root.terminal_buckets() {
        let top = bucket
            .top_hits()
            .and_then(|hits| hits.first())
            .ok_or_else(|| {
                KontosError::malformed_response(format!(
                    "bucket `{}` has an empty top-hits list",
                    bucket.key
                ))
            })?;
        rows.push(ResultRow {
            key: bucket.key.clone(),
            doc_count: bucket.doc_count,
            score: top.score,
            source: top.source.clone(),
        });
    }

    let entity_count = rows.len();
    Ok(Reduction {
        table: ResultTable::from_rows(rows),
        entity_count,
        total_record_count,
    })
}
