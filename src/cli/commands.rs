//! Command implementations for the Kontos CLI.

use std::fs::File;
use std::io::BufReader;
use std::time::{Duration, Instant};

use log::info;
use serde_json::Value;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::client::ElasticClient;
use crate::config::ConnectionConfig;
use crate::error::Result;
use crate::export;
use crate::query::{AggregationPath, QueryBuilder, SearchRequest};
use crate::response::{Reduction, reduce};
use crate::store::{InMemoryMentionStore, MentionStore};

/// Execute a CLI command.
pub fn execute_command(args: KontosArgs) -> Result<()> {
    match &args.command {
        Command::Search(search_args) => run_search(search_args.clone(), &args),
        Command::BuildQuery(build_args) => build_query(build_args.clone(), &args),
        Command::Reduce(reduce_args) => reduce_response(reduce_args.clone(), &args),
        Command::Mentions(mentions_args) => fetch_mentions(mentions_args.clone(), &args),
    }
}

/// Build a search request from query-shaping arguments.
fn build_request(args: &QueryArgs) -> Result<SearchRequest> {
    QueryBuilder::new(&args.query)
        .target_fields(args.fields.clone())
        .fuzziness(args.fuzziness)
        .aggregation_fields(args.agg_fields.clone())
        .hit_source(args.source.clone())
        .aggregation_source(args.agg_source.clone())
        .size(args.size)
        .entity_limit(args.entity_limit)
        .timeout(Duration::from_secs(args.timeout))
        .build()
}

/// Run an aggregation search against a backend.
fn run_search(args: SearchArgs, cli_args: &KontosArgs) -> Result<()> {
    let config = resolve_config(&args)?;

    let mut query_args = args.query.clone();
    query_args.timeout = config.timeout_secs;
    let request = build_request(&query_args)?;

    if cli_args.verbosity() > 1 {
        println!("Searching {} (index: {})", config.host, config.index);
    }

    let mut client = ElasticClient::new(&config.host, &config.index);
    if let Some(key) = &config.api_key {
        client = client.api_key(key);
    }

    let start_time = Instant::now();
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let response = runtime.block_on(client.search(&request))?;
    let duration_ms = start_time.elapsed().as_millis() as u64;

    let reduction = reduce(&response, request.aggregation())?;
    info!(
        "search produced {} entities from {} records",
        reduction.entity_count, reduction.total_record_count
    );

    report_reduction(&reduction, duration_ms, args.csv.as_deref(), cli_args)
}

/// Render the request body for a query without executing it.
fn build_query(args: BuildQueryArgs, cli_args: &KontosArgs) -> Result<()> {
    let request = build_request(&args.query)?;
    let body = request.body();

    let text = if cli_args.pretty || cli_args.output_format == OutputFormat::Human {
        serde_json::to_string_pretty(&body)?
    } else {
        serde_json::to_string(&body)?
    };
    println!("{text}");
    Ok(())
}

/// Reduce a stored raw response into an entity table.
fn reduce_response(args: ReduceArgs, cli_args: &KontosArgs) -> Result<()> {
    let path = AggregationPath::new(args.agg_fields.clone())?;

    let start_time = Instant::now();
    let file = File::open(&args.response_file)?;
    let response: Value = serde_json::from_reader(BufReader::new(file))?;
    let reduction = reduce(&response, &path)?;
    let duration_ms = start_time.elapsed().as_millis() as u64;

    report_reduction(&reduction, duration_ms, args.csv.as_deref(), cli_args)
}

/// Print a reduction and optionally export it as CSV.
fn report_reduction(
    reduction: &Reduction,
    duration_ms: u64,
    csv_path: Option<&std::path::Path>,
    cli_args: &KontosArgs,
) -> Result<()> {
    if let Some(path) = csv_path {
        let file = File::create(path)?;
        export::write_table(&reduction.table, &reduction.table.columns(), file)?;
        if cli_args.verbosity() > 0 {
            println!("Wrote {} rows to {}", reduction.table.len(), path.display());
        }
    }

    output_table(&reduction.table, cli_args)?;
    print_summary(
        &SearchSummary {
            entity_count: reduction.entity_count,
            total_record_count: reduction.total_record_count,
            duration_ms,
        },
        cli_args,
    )
}

/// Fetch mention rows for selected entity identifiers from a JSONL file.
fn fetch_mentions(args: MentionsArgs, cli_args: &KontosArgs) -> Result<()> {
    let store = InMemoryMentionStore::from_jsonl_file(&args.mentions_file, &args.id_field)?;
    let mentions = store.mentions_for(&args.ids)?;
    info!(
        "selected {} of {} mention records",
        mentions.len(),
        store.len()
    );

    if let Some(path) = &args.csv {
        let file = File::create(path)?;
        export::write_mentions(&mentions, file)?;
        if cli_args.verbosity() > 0 {
            println!("Wrote {} mention rows to {}", mentions.len(), path.display());
        }
    } else {
        output_json(&mentions, cli_args)?;
    }

    output_result(
        "Mention fetch complete",
        &MentionSummary {
            selected_entities: args.ids.len(),
            mention_count: mentions.len(),
        },
        cli_args,
    )
}

/// Merge the config file (when given) with connection flags. Flags that
/// differ from their clap defaults win over file values.
fn resolve_config(args: &SearchArgs) -> Result<ConnectionConfig> {
    let mut config = match &args.config {
        Some(path) => ConnectionConfig::from_file(path)?,
        None => ConnectionConfig::default(),
    };

    let defaults = ConnectionConfig::default();
    if args.host != defaults.host {
        config.host = args.host.clone();
    }
    if args.index != defaults.index {
        config.index = args.index.clone();
    }
    if args.api_key.is_some() {
        config.api_key = args.api_key.clone();
    }
    if args.query.timeout != 30 {
        config.timeout_secs = args.query.timeout;
    }
    config.validate()?;
    Ok(config)
}
