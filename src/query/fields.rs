//! Field selection value objects shared by query construction and response
//! reduction.

use serde::{Deserialize, Serialize};

use crate::error::{KontosError, Result};

/// An ordered, non-empty path of aggregation field names.
///
/// The same value must be handed to both [`QueryBuilder`] and the reducer:
/// the builder nests one aggregation level per entry, and the reducer walks
/// the response along the same entries. Sharing the value object keeps the
/// two sides from drifting apart.
///
/// [`QueryBuilder`]: crate::query::QueryBuilder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationPath(Vec<String>);

impl AggregationPath {
    /// Create a new aggregation path.
    ///
    /// Fails with [`KontosError::InvalidField`] if `fields` is empty or
    /// contains a blank field name.
    pub fn new<I, S>(fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        if fields.is_empty() {
            return Err(KontosError::invalid_field(
                "aggregation fields must not be empty",
            ));
        }
        if fields.iter().any(|f| f.trim().is_empty()) {
            return Err(KontosError::invalid_field(
                "aggregation fields must not contain blank names",
            ));
        }
        Ok(AggregationPath(fields))
    }

    /// Create a single-level path.
    pub fn single<S: Into<String>>(field: S) -> Result<Self> {
        AggregationPath::new([field.into()])
    }

    /// Get the field names in nesting order.
    pub fn fields(&self) -> &[String] {
        &self.0
    }

    /// Get the nesting depth.
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Get the outermost field name.
    pub fn first(&self) -> &str {
        &self.0[0]
    }
}

/// Source-field projection for hits returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceFilter {
    /// Return every stored source field.
    All,
    /// Return only the named fields (or field path prefixes).
    Fields(Vec<String>),
}

impl SourceFilter {
    /// Build a filter from a field list, treating an empty list as [`All`].
    ///
    /// [`All`]: SourceFilter::All
    pub fn from_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields: Vec<String> = fields
            .into_iter()
            .map(Into::into)
            .filter(|f| !f.trim().is_empty())
            .collect();
        if fields.is_empty() {
            SourceFilter::All
        } else {
            SourceFilter::Fields(fields)
        }
    }

    /// Render the filter as the `_source` value of a request body.
    pub fn to_body(&self) -> serde_json::Value {
        match self {
            SourceFilter::All => serde_json::Value::Bool(true),
            SourceFilter::Fields(fields) => serde_json::json!(fields),
        }
    }
}

impl Default for SourceFilter {
    fn default() -> Self {
        SourceFilter::All
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregation_path_rejects_empty() {
        let err = AggregationPath::new(Vec::<String>::new()).unwrap_err();
        match err {
            KontosError::InvalidField(_) => {}
            other => panic!("Expected InvalidField, got {other:?}"),
        }
    }

    #[test]
    fn test_aggregation_path_rejects_blank_name() {
        let err = AggregationPath::new(["assignee_id", "  "]).unwrap_err();
        match err {
            KontosError::InvalidField(_) => {}
            other => panic!("Expected InvalidField, got {other:?}"),
        }
    }

    #[test]
    fn test_aggregation_path_order_and_depth() {
        let path = AggregationPath::new(["a", "b"]).unwrap();
        assert_eq!(path.depth(), 2);
        assert_eq!(path.first(), "a");
        assert_eq!(path.fields(), &["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_source_filter_empty_is_all() {
        assert_eq!(SourceFilter::from_fields(Vec::<String>::new()), SourceFilter::All);
        assert_eq!(SourceFilter::from_fields(["", " "]), SourceFilter::All);
        assert_eq!(SourceFilter::All.to_body(), serde_json::json!(true));
    }

    #[test]
    fn test_source_filter_fields_body() {
        let filter = SourceFilter::from_fields(["assignees"]);
        assert_eq!(filter.to_body(), serde_json::json!(["assignees"]));
    }
}
