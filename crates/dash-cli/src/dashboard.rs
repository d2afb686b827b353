//! Page loading: every source is fetched and processed on its own thread,
//! and the page is only produced once all of them have finished.

use std::thread;
use std::time::Instant;

use thiserror::Error;
use tracing::{error, info, info_span};

use dash_ingest::{IngestError, RecordStore, normalize};
use dash_model::{AxisSelection, ModelError, Response, Table};
use dash_rank::{
    ChartData, ChartKind, RankKey, chart_data, comparison_chart, rank_with_key, select_axes,
};

use crate::config::{ChartConfig, DashboardConfig, SourceConfig};

/// Why a single source could not be loaded.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error(transparent)]
    Ingest(#[from] IngestError),
    #[error(transparent)]
    Rank(#[from] ModelError),
    #[error("loader thread panicked")]
    Panicked,
}

/// A failed source fails the whole page.
#[derive(Debug, Error)]
#[error("failed to load source `{name}`: {error}")]
pub struct PageError {
    pub name: String,
    #[source]
    pub error: SourceError,
}

/// One rendered data source.
#[derive(Debug, Clone)]
pub struct Panel {
    pub name: String,
    pub title: String,
    /// Ranked and truncated table.
    pub table: Table,
    /// Row count before truncation.
    pub total_rows: usize,
    pub key: RankKey,
    pub axes: AxisSelection,
    pub chart: Option<ChartData>,
}

#[derive(Debug, Clone)]
pub struct Page {
    pub title: String,
    pub panels: Vec<Panel>,
}

/// Result of loading one source, in configuration order.
#[derive(Debug)]
pub struct SourceOutcome {
    pub name: String,
    pub result: Result<Panel, SourceError>,
}

impl SourceOutcome {
    /// The `{success, data, error}` envelope for this source.
    pub fn to_response(&self) -> Response<Table> {
        match &self.result {
            Ok(panel) => Response::ok(panel.table.clone()),
            Err(error) => Response::failure(error.to_string()),
        }
    }
}

/// Load every source concurrently and wait for all of them.
pub fn load_sources(store: &dyn RecordStore, config: &DashboardConfig) -> Vec<SourceOutcome> {
    thread::scope(|scope| {
        let handles: Vec<_> = config
            .sources
            .iter()
            .map(|source| (source, scope.spawn(move || load_source(store, source))))
            .collect();
        handles
            .into_iter()
            .map(|(source, handle)| SourceOutcome {
                name: source.name.clone(),
                result: handle.join().unwrap_or(Err(SourceError::Panicked)),
            })
            .collect()
    })
}

/// Load the whole page, or fail with the first failing source.
///
/// # Errors
///
/// Returns [`PageError`] naming the first source (in configuration order)
/// that failed; no partial page is produced.
pub fn load_dashboard(
    store: &dyn RecordStore,
    config: &DashboardConfig,
) -> Result<Page, PageError> {
    let started = Instant::now();
    let mut panels = Vec::with_capacity(config.sources.len());
    for outcome in load_sources(store, config) {
        match outcome.result {
            Ok(panel) => panels.push(panel),
            Err(error) => {
                error!(source = %outcome.name, %error, "source failed, page not rendered");
                return Err(PageError {
                    name: outcome.name,
                    error,
                });
            }
        }
    }
    info!(
        sources = panels.len(),
        elapsed_ms = started.elapsed().as_millis(),
        "dashboard loaded"
    );
    Ok(Page {
        title: config.title.clone(),
        panels,
    })
}

/// Fetch, normalize, rank and chart one source.
///
/// # Errors
///
/// Returns the fetch, normalization or spec error of this source.
pub fn load_source(store: &dyn RecordStore, source: &SourceConfig) -> Result<Panel, SourceError> {
    let span = info_span!("source", name = %source.name, table = %source.table);
    let _guard = span.enter();
    let started = Instant::now();

    let records = store.fetch_table(&source.table)?;
    let table = normalize(records)?;
    let total_rows = table.len();
    let ranked = rank_with_key(&table, &source.sort_spec(), source.limit)?;

    let chart_config = source.chart.as_ref();
    let axes = select_axes(
        &ranked.table,
        chart_config.and_then(|chart| chart.label.as_deref()),
        chart_config.and_then(|chart| chart.value.as_deref()),
    );
    let chart = chart_config.map(|config| build_chart(&ranked.table, &axes, config));

    info!(
        rows = ranked.table.len(),
        total_rows,
        key = %ranked.key,
        elapsed_ms = started.elapsed().as_millis(),
        "source loaded"
    );
    Ok(Panel {
        name: source.name.clone(),
        title: source.display_title().to_string(),
        table: ranked.table,
        total_rows,
        key: ranked.key,
        axes,
        chart,
    })
}

fn build_chart(table: &Table, axes: &AxisSelection, config: &ChartConfig) -> ChartData {
    let chart = match config.kind {
        ChartKind::GroupedBar => {
            let title = config
                .title
                .clone()
                .unwrap_or_else(|| "Comparison".to_string());
            if axes.no_data {
                comparison_chart(&Table::empty(), "", &config.compare, title)
            } else {
                comparison_chart(table, &axes.label_column, &config.compare, title)
            }
        }
        kind => chart_data(table, axes, kind),
    };
    match &config.title {
        Some(title) => chart.with_title(title.clone()),
        None => chart,
    }
}
