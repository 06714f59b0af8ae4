//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{KontosArgs, OutputFormat};
use crate::error::Result;
use crate::table::ResultTable;

/// Result structure for search/reduce operations.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchSummary {
    /// Number of resolved entities found.
    pub entity_count: usize,
    /// Total underlying records across entity buckets.
    pub total_record_count: u64,
    /// Wall-clock duration of the operation.
    pub duration_ms: u64,
}

/// Result structure for mention fetches.
#[derive(Debug, Serialize, Deserialize)]
pub struct MentionSummary {
    /// Number of selected entity identifiers.
    pub selected_entities: usize,
    /// Number of mention rows returned.
    pub mention_count: usize,
}

/// Output a serializable result in the requested format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &KontosArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 0 {
                println!("{message}");
            }
            Ok(())
        }
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output a result as JSON, honoring `--pretty`.
pub fn output_json<T: Serialize>(result: &T, args: &KontosArgs) -> Result<()> {
    let text = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    println!("{text}");
    Ok(())
}

/// Print an entity table in the requested format.
pub fn output_table(table: &ResultTable, args: &KontosArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            print_table_human(table);
            Ok(())
        }
        OutputFormat::Json => output_json(table, args),
    }
}

/// Print an entity table as aligned human-readable rows.
fn print_table_human(table: &ResultTable) {
    if table.is_empty() {
        println!("No matching entities.");
        return;
    }

    println!("Entities:");
    println!("═════════");
    for (i, row) in table.iter().enumerate() {
        println!();
        println!(
            "Entity {}: {} (score: {:.3}, records: {})",
            i + 1,
            row.key,
            row.score,
            row.doc_count
        );
        println!("─────────────");
        for (name, value) in &row.source {
            match value {
                serde_json::Value::String(s) => println!("{name}: {s}"),
                other => println!("{name}: {other}"),
            }
        }
    }
}

/// Print the found-entities summary line the way the search tool reports it.
pub fn print_summary(summary: &SearchSummary, args: &KontosArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 0 {
                println!();
                println!(
                    "Found {} disambiguated entities with {} associated records ({}ms).",
                    summary.entity_count, summary.total_record_count, summary.duration_ms
                );
            }
            Ok(())
        }
        OutputFormat::Json => output_json(summary, args),
    }
}
