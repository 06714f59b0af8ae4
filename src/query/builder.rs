//! Builder for [`SearchRequest`] values.

use std::time::Duration;

use crate::error::{KontosError, Result};
use crate::query::fields::{AggregationPath, SourceFilter};
use crate::query::request::{Fuzziness, SearchRequest};

/// Default backend-side timeout for aggregation searches.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default cap on entity buckets per aggregation level.
pub const DEFAULT_ENTITY_LIMIT: usize = 100;

/// Builder for search requests.
///
/// Collects the free-text query, target fields, fuzziness and aggregation
/// configuration, then validates everything at once in [`build`]. Pure value
/// construction, no side effects.
///
/// # Examples
///
/// ```
/// use kontos::query::QueryBuilder;
///
/// let request = QueryBuilder::new("Lutron Electronics")
///     .target_field("assignees.assignee_organization")
///     .fuzziness(2)
///     .aggregation_field("assignees.assignee_id")
///     .aggregation_source(["assignees"])
///     .size(0)
///     .build()
///     .unwrap();
/// assert_eq!(request.size(), 0);
/// ```
///
/// [`build`]: QueryBuilder::build
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    query_text: String,
    target_fields: Vec<String>,
    fuzziness: u32,
    aggregation_fields: Vec<String>,
    hit_source: SourceFilter,
    aggregation_source: SourceFilter,
    timeout: Duration,
    size: usize,
    entity_limit: usize,
}

impl QueryBuilder {
    /// Create a new builder for the given free-text query.
    pub fn new<S: Into<String>>(query_text: S) -> Self {
        QueryBuilder {
            query_text: query_text.into(),
            target_fields: Vec::new(),
            fuzziness: 0,
            aggregation_fields: Vec::new(),
            hit_source: SourceFilter::All,
            aggregation_source: SourceFilter::All,
            timeout: DEFAULT_TIMEOUT,
            size: 0,
            entity_limit: DEFAULT_ENTITY_LIMIT,
        }
    }

    /// Add a field to match the query text against.
    pub fn target_field<S: Into<String>>(mut self, field: S) -> Self {
        self.target_fields.push(field.into());
        self
    }

    /// Replace the full set of fields to match against. Matching is a
    /// logical OR: a document matches when any target field matches.
    pub fn target_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.target_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Set the per-term edit-distance tolerance (0 = exact, up to 2).
    pub fn fuzziness(mut self, edits: u32) -> Self {
        self.fuzziness = edits;
        self
    }

    /// Add an aggregation (grouping) field. Multiple calls nest, outermost
    /// first.
    pub fn aggregation_field<S: Into<String>>(mut self, field: S) -> Self {
        self.aggregation_fields.push(field.into());
        self
    }

    /// Replace the full aggregation field path.
    pub fn aggregation_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aggregation_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Set the source projection for raw top-level hits.
    pub fn hit_source<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hit_source = SourceFilter::from_fields(fields);
        self
    }

    /// Set the source projection for the per-bucket top hit.
    pub fn aggregation_source<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aggregation_source = SourceFilter::from_fields(fields);
        self
    }

    /// Set the backend-side timeout, forwarded unmodified into the request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the number of raw hits to return alongside the aggregation.
    /// Pass 0 to transfer the aggregated view only.
    pub fn size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// Set the maximum number of entity buckets per aggregation level.
    pub fn entity_limit(mut self, limit: usize) -> Self {
        self.entity_limit = limit;
        self
    }

    /// Validate the collected configuration and produce a [`SearchRequest`].
    ///
    /// Fails with [`KontosError::InvalidField`] when the target or
    /// aggregation field list is empty, and with
    /// [`KontosError::InvalidFuzziness`] when fuzziness is outside [0, 2].
    pub fn build(self) -> Result<SearchRequest> {
        if self.target_fields.is_empty()
            || self.target_fields.iter().all(|f| f.trim().is_empty())
        {
            return Err(KontosError::invalid_field(
                "target fields must not be empty",
            ));
        }

        let fuzziness = Fuzziness::new(self.fuzziness)?;
        let aggregation = AggregationPath::new(self.aggregation_fields)?;

        Ok(SearchRequest::new(
            self.query_text,
            self.target_fields,
            fuzziness,
            aggregation,
            self.hit_source,
            self.aggregation_source,
            self.timeout,
            self.size,
            self.entity_limit,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_minimal() {
        let request = QueryBuilder::new("acme")
            .target_field("organization")
            .aggregation_field("entity_id")
            .build()
            .unwrap();
        assert_eq!(request.query_text(), "acme");
        assert_eq!(request.fuzziness().edits(), 0);
        assert_eq!(request.size(), 0);
        assert_eq!(request.timeout(), DEFAULT_TIMEOUT);
        assert_eq!(request.entity_limit(), DEFAULT_ENTITY_LIMIT);
    }

    #[test]
    fn test_build_preserves_size_and_timeout() {
        let request = QueryBuilder::new("acme")
            .target_field("organization")
            .aggregation_field("entity_id")
            .size(25)
            .timeout(Duration::from_secs(120))
            .build()
            .unwrap();
        assert_eq!(request.size(), 25);
        assert_eq!(request.timeout(), Duration::from_secs(120));
    }

    #[test]
    fn test_build_empty_target_fields_fails() {
        let err = QueryBuilder::new("acme")
            .aggregation_field("entity_id")
            .build()
            .unwrap_err();
        match err {
            KontosError::InvalidField(_) => {}
            other => panic!("Expected InvalidField, got {other:?}"),
        }
    }

    #[test]
    fn test_build_empty_aggregation_fields_fails() {
        let err = QueryBuilder::new("acme")
            .target_field("organization")
            .build()
            .unwrap_err();
        match err {
            KontosError::InvalidField(_) => {}
            other => panic!("Expected InvalidField, got {other:?}"),
        }
    }

    #[test]
    fn test_build_fuzziness_range() {
        for edits in 0..=2 {
            let result = QueryBuilder::new("acme")
                .target_field("organization")
                .aggregation_field("entity_id")
                .fuzziness(edits)
                .build();
            assert!(result.is_ok(), "fuzziness {edits} should be accepted");
        }

        let err = QueryBuilder::new("acme")
            .target_field("organization")
            .aggregation_field("entity_id")
            .fuzziness(3)
            .build()
            .unwrap_err();
        match err {
            KontosError::InvalidFuzziness(3) => {}
            other => panic!("Expected InvalidFuzziness(3), got {other:?}"),
        }
    }
}
