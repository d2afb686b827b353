use anyhow::{Context, Result};
use comfy_table::Table;
use serde::Serialize;
use tracing::info;

use dash_ingest::{JsonDirStore, RecordStore, normalize};
use dash_model::{Response, Table as DataTable};
use dash_rank::profile_columns;

use crate::cli::{ConfigArgs, InspectArgs, RenderArgs};
use crate::config::DashboardConfig;
use crate::dashboard::{SourceOutcome, load_dashboard, load_sources};
use crate::render::{apply_table_style, render_page, render_profiles};

pub fn load_config(args: &ConfigArgs) -> Result<DashboardConfig> {
    match &args.config {
        Some(path) => DashboardConfig::load(path)
            .with_context(|| format!("load dashboard config {}", path.display())),
        None => Ok(DashboardConfig::builtin()),
    }
}

/// Render the dashboard; returns the process exit code.
pub fn run_render(args: &RenderArgs) -> Result<i32> {
    let config = load_config(&args.config)?;
    let store = JsonDirStore::open(&args.data_dir).context("open record store")?;
    info!(
        sources = config.sources.len(),
        root = %store.root().display(),
        "loading dashboard"
    );

    if args.json {
        let outcomes = load_sources(&store, &config);
        let failed = outcomes.iter().any(|outcome| outcome.result.is_err());
        println!("{}", responses_json(&outcomes).context("serialize responses")?);
        return Ok(if failed { 1 } else { 0 });
    }

    match load_dashboard(&store, &config) {
        Ok(page) => {
            print!("{}", render_page(&page));
            Ok(0)
        }
        Err(error) => {
            eprintln!("Error: {error}");
            Ok(1)
        }
    }
}

/// Per-source envelopes keyed by source name, in configuration order.
pub fn responses_json(outcomes: &[SourceOutcome]) -> serde_json::Result<String> {
    let responses: Vec<SourceResponse<'_>> = outcomes
        .iter()
        .map(|outcome| SourceResponse {
            source: &outcome.name,
            response: outcome.to_response(),
        })
        .collect();
    serde_json::to_string_pretty(&responses)
}

#[derive(Serialize)]
struct SourceResponse<'a> {
    source: &'a str,
    response: Response<DataTable>,
}

pub fn run_sources(args: &ConfigArgs) -> Result<()> {
    let config = load_config(args)?;
    let mut table = Table::new();
    table.set_header(vec!["Source", "Table", "Ranking", "Limit", "Chart"]);
    apply_table_style(&mut table);
    for source in &config.sources {
        let spec = source.sort_spec();
        let mut ranking: Vec<String> = spec.candidates.iter().map(ToString::to_string).collect();
        if spec.fallback.is_some() {
            ranking.push("first numeric column".to_string());
        }
        let limit = if source.limit == 0 {
            "all".to_string()
        } else {
            source.limit.to_string()
        };
        let chart = source
            .chart
            .as_ref()
            .map_or_else(|| "-".to_string(), |chart| chart.kind.to_string());
        table.add_row(vec![
            source.name.clone(),
            source.table.clone(),
            ranking.join(" > "),
            limit,
            chart,
        ]);
    }
    println!("{}", config.title);
    println!("{table}");
    Ok(())
}

pub fn run_inspect(args: &InspectArgs) -> Result<()> {
    let store = JsonDirStore::open(&args.data_dir).context("open record store")?;
    let records = store
        .fetch_table(&args.table)
        .with_context(|| format!("fetch table {}", args.table))?;
    let table = normalize(records).context("normalize records")?;
    println!("{}: {} rows", args.table, table.len());
    println!("{}", render_profiles(&profile_columns(&table), table.len()));
    Ok(())
}
