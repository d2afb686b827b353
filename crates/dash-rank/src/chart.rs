//! Chart series built from a table and its axes.

use std::fmt;

use serde::{Deserialize, Serialize};

use dash_model::{AxisSelection, ID_COLUMN, Table, Value, cell_text, display_label};

/// Label used by grouped bars when a row has no label text.
pub const UNKNOWN_LABEL: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartKind {
    #[default]
    Bar,
    Pie,
    Doughnut,
    /// Two or more series side by side per label.
    GroupedBar,
}

impl ChartKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::Pie => "pie",
            Self::Doughnut => "doughnut",
            Self::GroupedBar => "grouped-bar",
        }
    }

    /// Pie-like charts show each slice as a share of the total.
    pub const fn is_radial(self) -> bool {
        matches!(self, Self::Pie | Self::Doughnut)
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub label: String,
    pub values: Vec<f64>,
}

impl ChartSeries {
    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }
}

/// Everything a chart widget needs: one label per row and one or more
/// aligned value series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub kind: ChartKind,
    pub title: String,
    pub labels: Vec<String>,
    pub series: Vec<ChartSeries>,
}

impl ChartData {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Whole-percent share of each value in the first series, rounding
    /// halves up. A zero total gives zero shares.
    pub fn shares(&self) -> Vec<i64> {
        let Some(series) = self.series.first() else {
            return Vec::new();
        };
        let total = series.total();
        series
            .values
            .iter()
            .map(|value| {
                if total == 0.0 {
                    0
                } else {
                    (value / total * 100.0 + 0.5).floor() as i64
                }
            })
            .collect()
    }
}

/// Label text for every row; the row identifier column reads the row ids.
pub fn label_values(table: &Table, column: &str) -> Vec<String> {
    if column == ID_COLUMN && !table.has_column(ID_COLUMN) {
        return table.rows().iter().map(|row| row.id.to_string()).collect();
    }
    table.values(column).map(cell_text).collect()
}

/// Numeric reading of every row; non-numbers plot as zero.
pub fn numeric_values(table: &Table, column: &str) -> Vec<f64> {
    table.values(column).map(Value::number_or_zero).collect()
}

/// Build a single-series chart from selected axes.
///
/// Bar charts are titled `"<value> by <label>"`, radial charts
/// `"<Value> Distribution"`. A no-data selection gives an empty chart.
pub fn chart_data(table: &Table, axes: &AxisSelection, kind: ChartKind) -> ChartData {
    let title = if kind.is_radial() {
        format!("{} Distribution", display_label(&axes.value_column))
    } else {
        format!("{} by {}", axes.value_column, axes.label_column)
    };
    if axes.no_data {
        return ChartData {
            kind,
            title,
            labels: Vec::new(),
            series: Vec::new(),
        };
    }
    ChartData {
        kind,
        title,
        labels: label_values(table, &axes.label_column),
        series: vec![ChartSeries {
            label: display_label(&axes.value_column),
            values: numeric_values(table, &axes.value_column),
        }],
    }
}

/// One value column of a grouped bar chart and its legend text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesColumn {
    pub column: String,
    pub label: String,
}

impl SeriesColumn {
    pub fn new(column: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            label: label.into(),
        }
    }
}

/// Grouped bars comparing several value columns per label, e.g. previous
/// against current price. Empty labels read [`UNKNOWN_LABEL`].
pub fn comparison_chart(
    table: &Table,
    label_column: &str,
    columns: &[SeriesColumn],
    title: impl Into<String>,
) -> ChartData {
    let labels = label_values(table, label_column)
        .into_iter()
        .map(|label| {
            if label.is_empty() {
                UNKNOWN_LABEL.to_string()
            } else {
                label
            }
        })
        .collect();
    ChartData {
        kind: ChartKind::GroupedBar,
        title: title.into(),
        labels,
        series: columns
            .iter()
            .map(|series| ChartSeries {
                label: series.label.clone(),
                values: numeric_values(table, &series.column),
            })
            .collect(),
    }
}
