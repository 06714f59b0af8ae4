//! Mention store: access to the raw rows behind resolved entities.
//!
//! A disambiguated entity groups many raw mention records (name variants,
//! aliases). Once the user has picked entities out of a result table, the
//! underlying mentions are fetched by identifier membership, a plain
//! filtered projection. The trait keeps the storage side pluggable; the
//! in-memory implementation covers JSONL extracts and tests.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{KontosError, Result};

/// One raw mention row, tagged with the resolved entity it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MentionRecord {
    /// The resolved entity identifier this mention was disambiguated to.
    pub entity_id: String,
    /// The remaining columns of the row.
    pub fields: Map<String, Value>,
}

/// Access to mention records by resolved entity identifier.
pub trait MentionStore {
    /// Return every mention whose entity identifier is in `ids`, in store
    /// order.
    fn mentions_for(&self, ids: &[String]) -> Result<Vec<MentionRecord>>;
}

/// A mention store held fully in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMentionStore {
    records: Vec<MentionRecord>,
}

impl InMemoryMentionStore {
    /// Create a store over the given records.
    pub fn new(records: Vec<MentionRecord>) -> Self {
        InMemoryMentionStore { records }
    }

    /// Load a store from a JSONL reader, one JSON object per line.
    ///
    /// `id_field` names the property carrying the resolved entity
    /// identifier; a line without it (or without a string/number value) is
    /// rejected rather than skipped.
    pub fn from_jsonl_reader<R: BufRead>(reader: R, id_field: &str) -> Result<Self> {
        let mut records = Vec::new();
        for (line_num, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let value: Value = serde_json::from_str(&line)?;
            let object = value.as_object().ok_or_else(|| {
                KontosError::store(format!("line {}: not a JSON object", line_num + 1))
            })?;
            let entity_id = match object.get(id_field) {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Number(n)) => n.to_string(),
                _ => {
                    return Err(KontosError::store(format!(
                        "line {}: missing entity id field `{id_field}`",
                        line_num + 1
                    )));
                }
            };
            records.push(MentionRecord {
                entity_id,
                fields: object.clone(),
            });
        }
        Ok(InMemoryMentionStore { records })
    }

    /// Load a store from a JSONL file.
    pub fn from_jsonl_file<P: AsRef<Path>>(path: P, id_field: &str) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_jsonl_reader(BufReader::new(file), id_field)
    }

    /// Get the number of records in the store.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl MentionStore for InMemoryMentionStore {
    fn mentions_for(&self, ids: &[String]) -> Result<Vec<MentionRecord>> {
        let wanted: HashSet<&str> = ids.iter().map(String::as_str).collect();
        Ok(self
            .records
            .iter()
            .filter(|record| wanted.contains(record.entity_id.as_str()))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    const JSONL: &str = r#"{"assignee_id": "A1", "assignee_organization": "Lutron Electronics Co"}
{"assignee_id": "A1", "assignee_organization": "Lutron Electronics"}
{"assignee_id": "A2", "assignee_organization": "Lutron Elec"}
"#;

    #[test]
    fn test_from_jsonl_reader() {
        let store = InMemoryMentionStore::from_jsonl_reader(Cursor::new(JSONL), "assignee_id")
            .unwrap();
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_mentions_for_filters_by_membership() {
        let store = InMemoryMentionStore::from_jsonl_reader(Cursor::new(JSONL), "assignee_id")
            .unwrap();
        let mentions = store.mentions_for(&["A1".to_string()]).unwrap();
        assert_eq!(mentions.len(), 2);
        assert!(mentions.iter().all(|m| m.entity_id == "A1"));

        let mentions = store
            .mentions_for(&["A1".to_string(), "A2".to_string()])
            .unwrap();
        assert_eq!(mentions.len(), 3);

        let mentions = store.mentions_for(&["A9".to_string()]).unwrap();
        assert!(mentions.is_empty());
    }

    #[test]
    fn test_missing_id_field_is_rejected() {
        let jsonl = r#"{"assignee_organization": "No Id Inc"}"#;
        let err = InMemoryMentionStore::from_jsonl_reader(Cursor::new(jsonl), "assignee_id")
            .unwrap_err();
        match err {
            KontosError::Store(msg) => assert!(msg.contains("assignee_id")),
            other => panic!("Expected Store error, got {other:?}"),
        }
    }

    #[test]
    fn test_numeric_id_is_stringified() {
        let jsonl = r#"{"assignee_id": 42, "assignee_organization": "Acme"}"#;
        let store =
            InMemoryMentionStore::from_jsonl_reader(Cursor::new(jsonl), "assignee_id").unwrap();
        let mentions = store.mentions_for(&["42".to_string()]).unwrap();
        assert_eq!(mentions.len(), 1);
    }
}
