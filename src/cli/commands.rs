//! CLI command implementations
//!
//! Each command loads configuration first, then does exactly one thing.
//! Commands that talk to the engine build their own tokio runtime.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde_json::json;
use tokio::runtime::Runtime;

use crate::catalog::CatalogIndexer;
use crate::config::AppConfig;
use crate::executor::{encode_search_body, EngineClient};
use crate::http_server::{AppState, HttpServer};
use crate::observability::{init_logging, Event, LogFormat, SearchMetrics};
use crate::search::{ExplainPlan, RawSearchRequest, SearchError, SearchMode, SearchPlanner};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};
use super::io::{read_input, write_error, write_response, write_text};

/// Main CLI entry point
///
/// Parses arguments, loads configuration, installs logging and dispatches.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    let config = AppConfig::load_or_default(cli.config.as_deref())?;

    init_logging(LogFormat::from_json_flag(config.log_json))
        .map_err(|e| CliError::boot_failed(format!("Failed to install logger: {}", e)))?;
    tracing::debug!(
        event = %Event::ConfigLoaded,
        elasticsearch_url = %config.elasticsearch_url,
        index = %config.index,
        "configuration loaded"
    );

    run_command(cli.command, config)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command, config: AppConfig) -> CliResult<()> {
    match cmd {
        Command::Serve { port } => serve(config, port),
        Command::Plan { mode, explain } => plan(&config, &mode, explain),
        Command::Index { count } => index(&config, count),
        Command::Synonyms { file } => synonyms(&config, &file),
    }
}

fn runtime() -> CliResult<Runtime> {
    Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))
}

fn indexer(config: &AppConfig) -> CatalogIndexer {
    let client = EngineClient::new(config.elasticsearch_url.clone());
    CatalogIndexer::new(client, config.index.clone(), Arc::new(SearchMetrics::new()))
        .with_max_bulk_bytes(config.max_bulk_size_bytes)
}

/// Start the HTTP search API and block until it stops
pub fn serve(mut config: AppConfig, port: Option<u16>) -> CliResult<()> {
    if let Some(port) = port {
        config.http.port = port;
    }

    let server = HttpServer::with_state(config.http.clone(), Arc::new(AppState::from_config(&config)));

    runtime()?.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Plan a request read from stdin and print it. No engine call is made.
///
/// Rejected requests are reported on stdout as an error document.
pub fn plan(config: &AppConfig, mode: &str, explain: bool) -> CliResult<()> {
    let mode = SearchMode::parse(mode).ok_or_else(|| {
        CliError::invalid_argument(format!(
            "Unknown mode '{}'. Expected one of: {}",
            mode,
            SearchMode::ALL.map(|m| m.as_str()).join(", ")
        ))
    })?;

    let input = read_input()?;
    let planner = SearchPlanner::new(config.page_size);

    match render_plan(&planner, mode, &input, explain) {
        Ok(output) => write_text(&output),
        Err(e) if explain => write_text(&ExplainPlan::from_error(&e).to_string()),
        Err(e) => write_error(e.code().code(), e.message()),
    }
}

/// Renders the engine query (or the explain text) for a JSON request body
pub fn render_plan(
    planner: &SearchPlanner,
    mode: SearchMode,
    input: &str,
    explain: bool,
) -> Result<String, SearchError> {
    let raw = RawSearchRequest::parse(input)?;
    let plan = planner.plan_raw(raw, mode)?;

    if explain {
        Ok(ExplainPlan::from_plan(&plan).to_string())
    } else {
        serde_json::to_string_pretty(&encode_search_body(&plan))
            .map_err(|e| SearchError::invalid_request(format!("Failed to encode plan: {}", e)))
    }
}

/// Recreate the index with `count` generated products
pub fn index(config: &AppConfig, count: i64) -> CliResult<()> {
    let count = if count <= 0 {
        config.default_product_count
    } else {
        count as usize
    };

    let indexer = indexer(config);
    let report = runtime()?.block_on(indexer.index_products(count))?;

    write_response(json!(report))
}

/// Replace the synonym rules with the non-blank lines of `file`
pub fn synonyms(config: &AppConfig, file: &Path) -> CliResult<()> {
    let text = fs::read_to_string(file).map_err(|e| {
        CliError::io_error(format!("Failed to read synonyms file {:?}: {}", file, e))
    })?;

    let indexer = indexer(config);
    let rules = runtime()?.block_on(indexer.configure_synonyms(&text))?;

    write_response(json!({ "index": config.index, "rules": rules }))
}
