//! Typed view of the backend's nested aggregation response.
//!
//! The raw response is a JSON document; instead of indexing into it with
//! string keys at every use site, the whole aggregation subtree is parsed
//! once along the declared [`AggregationPath`]. A response whose nesting does
//! not match the path fails a single shape check with
//! [`KontosError::MalformedResponse`].

use serde_json::{Map, Value};

use crate::error::{KontosError, Result};
use crate::query::AggregationPath;

/// A single hit embedded in a bucket's top-hits sub-aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct TopHit {
    /// The projected source fields of the document.
    pub source: Map<String, Value>,
    /// The relevance score assigned by the backend.
    pub score: f64,
}

/// Either another aggregation level or the terminal top-hits list.
#[derive(Debug, Clone, PartialEq)]
pub enum AggregationNode {
    /// An intermediate level with its own buckets.
    Level(AggregationLevel),
    /// The innermost level: hits ordered by the backend, best first.
    TopHits(Vec<TopHit>),
}

/// One aggregation bucket: all matching documents sharing a field value.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationBucket {
    /// The distinct field value this bucket groups by.
    pub key: String,
    /// Number of matching documents in the bucket.
    pub doc_count: u64,
    /// The nested content of the bucket.
    pub node: AggregationNode,
}

impl AggregationBucket {
    /// The terminal hit list, when this bucket sits at the innermost level.
    pub fn top_hits(&self) -> Option<&[TopHit]> {
        match &self.node {
            AggregationNode::TopHits(hits) => Some(hits),
            AggregationNode::Level(_) => None,
        }
    }
}

/// One level of the aggregation tree.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationLevel {
    /// The field this level buckets by.
    pub field: String,
    /// Backend-reported total document count for the level, when present.
    pub doc_count: Option<u64>,
    /// The buckets of the level.
    pub buckets: Vec<AggregationBucket>,
}

impl AggregationLevel {
    /// Parse the aggregation tree out of a raw backend response.
    ///
    /// `path` must be the same [`AggregationPath`] the request was built
    /// with. A response without an `aggregations` key, or whose nesting does
    /// not follow the path, fails with [`KontosError::MalformedResponse`].
    pub fn from_response(response: &Value, path: &AggregationPath) -> Result<Self> {
        let aggregations = response
            .get("aggregations")
            .ok_or_else(|| KontosError::malformed_response("response has no `aggregations` key"))?;
        Self::parse_level(aggregations, path.fields())
    }

    fn parse_level(container: &Value, path: &[String]) -> Result<Self> {
        let (field, rest) = path
            .split_first()
            .ok_or_else(|| KontosError::malformed_response("empty aggregation path"))?;

        let mut level = container.get(field.as_str()).ok_or_else(|| {
            KontosError::malformed_response(format!("missing aggregation level `{field}`"))
        })?;
        let doc_count = level.get("doc_count").and_then(Value::as_u64);

        // Backends that wrap the terms aggregation (e.g. a nested-path
        // aggregation) report the bucket list one object deeper, under
        // `{field}_inner`, with the level itself carrying the doc_count.
        if level.get("buckets").is_none() {
            if let Some(inner) = level.get(format!("{field}_inner")) {
                level = inner;
            }
        }

        let buckets = level
            .get("buckets")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                KontosError::malformed_response(format!(
                    "aggregation level `{field}` has no `buckets` array"
                ))
            })?;

        let buckets = buckets
            .iter()
            .map(|bucket| Self::parse_bucket(bucket, field, rest))
            .collect::<Result<Vec<_>>>()?;

        Ok(AggregationLevel {
            field: field.clone(),
            doc_count,
            buckets,
        })
    }

    fn parse_bucket(bucket: &Value, field: &str, rest: &[String]) -> Result<AggregationBucket> {
        let key = match bucket.get("key") {
            Some(Value::String(s)) => s.clone(),
            // Numeric and boolean term keys are stringified so bucket keys
            // stay uniform downstream.
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            _ => {
                return Err(KontosError::malformed_response(format!(
                    "bucket in aggregation level `{field}` has no usable `key`"
                )));
            }
        };

        let doc_count = bucket.get("doc_count").and_then(Value::as_u64).ok_or_else(|| {
            KontosError::malformed_response(format!(
                "bucket `{key}` in aggregation level `{field}` has no `doc_count`"
            ))
        })?;

        let node = if rest.is_empty() {
            AggregationNode::TopHits(Self::parse_top_hits(bucket, &key)?)
        } else {
            AggregationNode::Level(Self::parse_level(bucket, rest)?)
        };

        Ok(AggregationBucket {
            key,
            doc_count,
            node,
        })
    }

    fn parse_top_hits(bucket: &Value, key: &str) -> Result<Vec<TopHit>> {
        let hits = bucket
            .get("top_hits")
            .and_then(|v| v.get("hits"))
            .and_then(|v| v.get("hits"))
            .and_then(Value::as_array)
            .ok_or_else(|| {
                KontosError::malformed_response(format!(
                    "bucket `{key}` has no `top_hits.hits.hits` list"
                ))
            })?;

        hits.iter()
            .map(|hit| {
                let score = hit.get("_score").and_then(Value::as_f64).ok_or_else(|| {
                    KontosError::malformed_response(format!(
                        "top hit in bucket `{key}` has no `_score`"
                    ))
                })?;
                let source = hit
                    .get("_source")
                    .and_then(Value::as_object)
                    .cloned()
                    .ok_or_else(|| {
                        KontosError::malformed_response(format!(
                            "top hit in bucket `{key}` has no `_source` object"
                        ))
                    })?;
                Ok(TopHit { source, score })
            })
            .collect()
    }

    /// Iterate over the terminal buckets of the tree in backend order.
    pub fn terminal_buckets(&self) -> Vec<&AggregationBucket> {
        let mut out = Vec::new();
        collect_terminal(self, &mut out);
        out
    }

    /// Total record count for this level: the backend-reported `doc_count`
    /// when present, otherwise the sum of the level's bucket counts.
    pub fn total_doc_count(&self) -> u64 {
        self.doc_count
            .unwrap_or_else(|| self.buckets.iter().map(|b| b.doc_count).sum())
    }
}

fn collect_terminal<'a>(level: &'a AggregationLevel, out: &mut Vec<&'a AggregationBucket>) {
    for bucket in &level.buckets {
        match &bucket.node {
            AggregationNode::TopHits(_) => out.push(bucket),
            AggregationNode::Level(next) => collect_terminal(next, out),
        }
    }
}
