//! Flat tabular view of reduced search results.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One row of the result table: the representative document of one resolved
/// entity bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    /// The bucket's aggregation key (the resolved entity identifier).
    pub key: String,
    /// Number of raw documents grouped into the bucket.
    pub doc_count: u64,
    /// Relevance score of the bucket's top hit.
    pub score: f64,
    /// Projected source fields of the top hit.
    pub source: Map<String, Value>,
}

impl ResultRow {
    /// Look up a source field value.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.source.get(name)
    }
}

/// An ordered table of result rows, one per resolved entity, sorted by
/// descending relevance score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultTable {
    rows: Vec<ResultRow>,
}

impl ResultTable {
    /// Build a table from unordered rows, sorting by score descending.
    ///
    /// The sort is stable: rows with equal scores keep the order the backend
    /// returned them in. There is no secondary sort key.
    pub fn from_rows(mut rows: Vec<ResultRow>) -> Self {
        rows.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        ResultTable { rows }
    }

    /// Get the rows in score order.
    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    /// Get the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate over the rows in score order.
    pub fn iter(&self) -> std::slice::Iter<'_, ResultRow> {
        self.rows.iter()
    }

    /// Get the aggregation keys of all rows, in score order.
    pub fn keys(&self) -> Vec<&str> {
        self.rows.iter().map(|row| row.key.as_str()).collect()
    }

    /// Union of source column names across all rows, in first-seen order.
    pub fn columns(&self) -> Vec<String> {
        let mut columns: Vec<String> = Vec::new();
        for row in &self.rows {
            for name in row.source.keys() {
                if !columns.iter().any(|c| c == name) {
                    columns.push(name.clone());
                }
            }
        }
        columns
    }
}

impl<'a> IntoIterator for &'a ResultTable {
    type Item = &'a ResultRow;
    type IntoIter = std::slice::Iter<'a, ResultRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
