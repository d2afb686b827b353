//! Field inference, ranking and axis selection for dashboard tables.
//!
//! Tables arrive with an unknown column set. This crate decides which
//! columns are numeric, orders rows by a prioritized list of candidate keys
//! with a numeric fallback, bounds the result to a top-N view, and picks
//! default axes for a generic chart.

pub mod axes;
pub mod chart;
pub mod profile;
pub mod rank;

pub use axes::select_axes;
pub use chart::{
    ChartData, ChartKind, ChartSeries, SeriesColumn, UNKNOWN_LABEL, chart_data, comparison_chart,
    label_values, numeric_values,
};
pub use profile::{ColumnProfile, numeric_columns, profile_columns};
pub use rank::{
    Collation, NO_LIMIT, RankKey, Ranked, collate, rank, rank_with_key, resolve_key,
};
