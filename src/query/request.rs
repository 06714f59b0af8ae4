//! Search request value type and its wire rendering.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::{KontosError, Result};
use crate::query::fields::{AggregationPath, SourceFilter};

/// Maximum per-term edit distance the match algorithm accepts.
pub const MAX_FUZZINESS: u32 = 2;

/// Per-term fuzzy edit-distance tolerance.
///
/// 0 means exact matching only; 1 and 2 allow that many character edits per
/// query term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fuzziness(u32);

impl Fuzziness {
    /// Exact matching, no edits tolerated.
    pub const EXACT: Fuzziness = Fuzziness(0);

    /// Create a new fuzziness level.
    ///
    /// Fails with [`KontosError::InvalidFuzziness`] when `edits` is outside
    /// [0, 2].
    pub fn new(edits: u32) -> Result<Self> {
        if edits > MAX_FUZZINESS {
            return Err(KontosError::InvalidFuzziness(edits));
        }
        Ok(Fuzziness(edits))
    }

    /// Get the edit distance.
    pub fn edits(&self) -> u32 {
        self.0
    }
}

impl Default for Fuzziness {
    fn default() -> Self {
        Fuzziness::EXACT
    }
}

/// A fully validated search request.
///
/// Constructed through [`QueryBuilder`]; holds everything needed to render
/// the backend request body: the fuzzy full-text match clause, the nested
/// per-entity aggregation, source projections, timeout and result size.
///
/// [`QueryBuilder`]: crate::query::QueryBuilder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    query_text: String,
    target_fields: Vec<String>,
    fuzziness: Fuzziness,
    aggregation: AggregationPath,
    hit_source: SourceFilter,
    aggregation_source: SourceFilter,
    timeout: Duration,
    size: usize,
    entity_limit: usize,
}

impl SearchRequest {
    pub(crate) fn new(
        query_text: String,
        target_fields: Vec<String>,
        fuzziness: Fuzziness,
        aggregation: AggregationPath,
        hit_source: SourceFilter,
        aggregation_source: SourceFilter,
        timeout: Duration,
        size: usize,
        entity_limit: usize,
    ) -> Self {
        SearchRequest {
            query_text,
            target_fields,
            fuzziness,
            aggregation,
            hit_source,
            aggregation_source,
            timeout,
            size,
            entity_limit,
        }
    }

    /// Get the free-text query.
    pub fn query_text(&self) -> &str {
        &self.query_text
    }

    /// Get the fields the match clause targets.
    pub fn target_fields(&self) -> &[String] {
        &self.target_fields
    }

    /// Get the fuzziness level.
    pub fn fuzziness(&self) -> Fuzziness {
        self.fuzziness
    }

    /// Get the aggregation path. Hand the same value to the reducer.
    pub fn aggregation(&self) -> &AggregationPath {
        &self.aggregation
    }

    /// Get the timeout forwarded to the backend.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Get the number of raw top-level hits requested (0 = aggregations only).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Get the maximum number of entity buckets per aggregation level.
    pub fn entity_limit(&self) -> usize {
        self.entity_limit
    }

    /// Render the request as a backend query document.
    ///
    /// The shape is the Elasticsearch query DSL: a `multi_match` clause over
    /// the target fields (a document matches when any field matches), one
    /// `terms` aggregation level per aggregation field, and an innermost
    /// `top_hits` sub-aggregation selecting the single best-scoring document
    /// of each bucket.
    pub fn body(&self) -> Value {
        json!({
            "query": {
                "multi_match": {
                    "query": self.query_text,
                    "fields": self.target_fields,
                    "fuzziness": self.fuzziness.edits(),
                }
            },
            "aggs": self.aggregation_body(),
            "size": self.size,
            "timeout": format!("{}s", self.timeout.as_secs()),
            "_source": self.hit_source.to_body(),
        })
    }

    /// Render the nested aggregation tree, innermost level first.
    fn aggregation_body(&self) -> Value {
        let mut aggs = json!({
            "top_hits": {
                "top_hits": {
                    "size": 1,
                    "_source": self.aggregation_source.to_body(),
                }
            }
        });

        for field in self.aggregation.fields().iter().rev() {
            let level = json!({
                "terms": {
                    "field": field,
                    "size": self.entity_limit,
                },
                "aggs": aggs,
            });
            let mut wrapper = serde_json::Map::new();
            wrapper.insert(field.clone(), level);
            aggs = Value::Object(wrapper);
        }

        aggs
    }
}
