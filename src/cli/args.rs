//! Command line argument parsing for the Kontos CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Kontos - entity-disambiguated search client
#[derive(Parser, Debug, Clone)]
#[command(name = "kontos")]
#[command(about = "Query shaping and aggregation reduction for entity-disambiguated search")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct KontosArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl KontosArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Output formats for command results.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    Human,
    /// JSON document
    Json,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run an aggregation search against a backend and show the entity table
    Search(SearchArgs),

    /// Render the request body for a query without executing it
    #[command(name = "build-query")]
    BuildQuery(BuildQueryArgs),

    /// Reduce a raw response document (from a file) into an entity table
    Reduce(ReduceArgs),

    /// Fetch mention rows for selected entity identifiers
    Mentions(MentionsArgs),
}

/// Query-shaping options shared by `search` and `build-query`.
#[derive(Parser, Debug, Clone)]
pub struct QueryArgs {
    /// Free-text query
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Field to match against (repeatable; OR semantics across fields)
    #[arg(long = "field", default_value = "assignees.assignee_organization")]
    pub fields: Vec<String>,

    /// Fuzziness level (per-term edit distance, 0-2)
    #[arg(long, default_value = "2")]
    pub fuzziness: u32,

    /// Aggregation field (repeatable; repeats nest, outermost first)
    #[arg(long = "agg-field", default_value = "assignees.assignee_id")]
    pub agg_fields: Vec<String>,

    /// Source fields to return for raw hits (default: all)
    #[arg(long = "source")]
    pub source: Vec<String>,

    /// Source fields to return for each bucket's top hit
    #[arg(long = "agg-source", default_value = "assignees")]
    pub agg_source: Vec<String>,

    /// Number of raw hits to return (0 = aggregations only)
    #[arg(long, default_value = "0")]
    pub size: usize,

    /// Maximum number of entity buckets per aggregation level
    #[arg(long = "entity-limit", default_value = "100")]
    pub entity_limit: usize,

    /// Search timeout in seconds
    #[arg(long, default_value = "30")]
    pub timeout: u64,
}

/// Arguments for running a search
#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    #[command(flatten)]
    pub query: QueryArgs,

    /// Backend base URL
    #[arg(long, default_value = "http://localhost:9200")]
    pub host: String,

    /// Index to search in
    #[arg(long, default_value = "patents")]
    pub index: String,

    /// API key for authentication
    #[arg(long, env = "KONTOS_API_KEY")]
    pub api_key: Option<String>,

    /// Connection config file (JSON); flags override file values
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Write the entity table as CSV to this path
    #[arg(long, value_name = "CSV_FILE")]
    pub csv: Option<PathBuf>,
}

/// Arguments for rendering a request body
#[derive(Parser, Debug, Clone)]
pub struct BuildQueryArgs {
    #[command(flatten)]
    pub query: QueryArgs,
}

/// Arguments for reducing a stored response
#[derive(Parser, Debug, Clone)]
pub struct ReduceArgs {
    /// Raw response document (JSON file)
    #[arg(value_name = "RESPONSE_FILE")]
    pub response_file: PathBuf,

    /// Aggregation field the response was built with (repeatable)
    #[arg(long = "agg-field", default_value = "assignees.assignee_id")]
    pub agg_fields: Vec<String>,

    /// Write the entity table as CSV to this path
    #[arg(long, value_name = "CSV_FILE")]
    pub csv: Option<PathBuf>,
}

/// Arguments for fetching mention rows
#[derive(Parser, Debug, Clone)]
pub struct MentionsArgs {
    /// Mention records file (JSONL, one object per line)
    #[arg(value_name = "MENTIONS_FILE")]
    pub mentions_file: PathBuf,

    /// Selected entity identifier (repeatable)
    #[arg(long = "id", value_name = "ENTITY_ID", required = true)]
    pub ids: Vec<String>,

    /// Property carrying the entity identifier in each record
    #[arg(long = "id-field", default_value = "assignee_id")]
    pub id_field: String,

    /// Write the mention rows as CSV to this path
    #[arg(long, value_name = "CSV_FILE")]
    pub csv: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_parse_search_defaults() {
        let args = KontosArgs::parse_from(["kontos", "search", "Lutron Electronics"]);
        match args.command {
            Command::Search(search) => {
                assert_eq!(search.query.query, "Lutron Electronics");
                assert_eq!(search.query.fields, vec!["assignees.assignee_organization"]);
                assert_eq!(search.query.agg_fields, vec!["assignees.assignee_id"]);
                assert_eq!(search.query.fuzziness, 2);
                assert_eq!(search.query.size, 0);
                assert_eq!(search.query.timeout, 30);
                assert_eq!(search.index, "patents");
            }
            other => panic!("Expected Search command, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_repeated_fields() {
        let args = KontosArgs::parse_from([
            "kontos",
            "build-query",
            "smith",
            "--field",
            "assignees.assignee_individual_name_first",
            "--field",
            "assignees.assignee_individual_name_last",
            "--fuzziness",
            "1",
        ]);
        match args.command {
            Command::BuildQuery(build) => {
                assert_eq!(build.query.fields.len(), 2);
                assert_eq!(build.query.fuzziness, 1);
            }
            other => panic!("Expected BuildQuery command, got {other:?}"),
        }
    }

    #[test]
    fn test_verbosity_levels() {
        let args = KontosArgs::parse_from(["kontos", "-vv", "build-query", "acme"]);
        assert_eq!(args.verbosity(), 2);

        let args = KontosArgs::parse_from(["kontos", "--quiet", "build-query", "acme"]);
        assert_eq!(args.verbosity(), 0);
    }
}
