//! CSV export of result tables and mention rows.

use std::io::Write;

use serde_json::Value;

use crate::error::Result;
use crate::store::MentionRecord;
use crate::table::ResultTable;

/// Render a JSON value as a CSV cell.
///
/// Strings are written bare (the CSV writer handles quoting); null becomes
/// an empty cell; everything else keeps its JSON rendering.
fn cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Write a result table as CSV.
///
/// `columns` selects and orders the source columns; pass
/// [`ResultTable::columns`] for everything. The entity key, bucket document
/// count and relevance score are always appended after the source columns.
pub fn write_table<W: Write>(table: &ResultTable, columns: &[String], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut header: Vec<&str> = columns.iter().map(String::as_str).collect();
    header.extend(["key", "doc_count", "_score"]);
    csv_writer.write_record(&header)?;

    for row in table {
        let mut record: Vec<String> = columns
            .iter()
            .map(|column| row.field(column).map(cell).unwrap_or_default())
            .collect();
        record.push(row.key.clone());
        record.push(row.doc_count.to_string());
        record.push(row.score.to_string());
        csv_writer.write_record(&record)?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Write mention records as CSV: the entity identifier first, then the union
/// of record columns in first-seen order.
pub fn write_mentions<W: Write>(mentions: &[MentionRecord], writer: W) -> Result<()> {
    let mut columns: Vec<String> = Vec::new();
    for mention in mentions {
        for name in mention.fields.keys() {
            if !columns.iter().any(|c| c == name) {
                columns.push(name.clone());
            }
        }
    }

    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut header = vec!["entity_id"];
    header.extend(columns.iter().map(String::as_str));
    csv_writer.write_record(&header)?;

    for mention in mentions {
        let mut record = vec![mention.entity_id.clone()];
        record.extend(
            columns
                .iter()
                .map(|column| mention.fields.get(column).map(cell).unwrap_or_default()),
        );
        csv_writer.write_record(&record)?;
    }

    csv_writer.flush()?;
    Ok(())
}
