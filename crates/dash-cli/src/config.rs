//! Dashboard layout configuration.
//!
//! A dashboard is a list of data sources. Each source names a record-store
//! table, how to rank it, how many rows to keep and, optionally, how to
//! chart it.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use dash_model::{ModelError, SortKey, SortSpec};
use dash_rank::{ChartKind, NO_LIMIT, SeriesColumn};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config: {message}")]
    Invalid { message: String },
    #[error("source `{name}`: {source}")]
    Spec {
        name: String,
        #[source]
        source: ModelError,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DashboardConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(rename = "source", default)]
    pub sources: Vec<SourceConfig>,
}

fn default_title() -> String {
    "Product Sales Dashboard".to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    /// Unique key of the source within the dashboard.
    pub name: String,
    /// Panel heading; defaults to `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Record-store table to fetch.
    pub table: String,
    /// Rows kept after ranking; 0 keeps all.
    #[serde(default)]
    pub limit: usize,
    #[serde(default)]
    pub sort: Vec<SortKey>,
    /// Fall back to the first all-numeric column when no key matches.
    #[serde(default = "default_true")]
    pub fallback: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart: Option<ChartConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChartConfig {
    #[serde(default)]
    pub kind: ChartKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Preferred label column.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Preferred value column.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Value columns of a grouped bar chart.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub compare: Vec<SeriesColumn>,
}

impl SourceConfig {
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }

    pub fn sort_spec(&self) -> SortSpec {
        let mut spec = SortSpec {
            candidates: self.sort.clone(),
            ..SortSpec::default()
        };
        if !self.fallback {
            spec = spec.without_fallback();
        }
        spec
    }
}

impl DashboardConfig {
    /// Load and validate a TOML dashboard file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&contents).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check names are unique and every sort spec is usable.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sources.is_empty() {
            return Err(ConfigError::Invalid {
                message: "at least one [[source]] is required".to_string(),
            });
        }
        let mut names = BTreeSet::new();
        for source in &self.sources {
            if source.name.trim().is_empty() {
                return Err(ConfigError::Invalid {
                    message: "source name is empty".to_string(),
                });
            }
            if !names.insert(source.name.as_str()) {
                return Err(ConfigError::Invalid {
                    message: format!("duplicate source name `{}`", source.name),
                });
            }
            source
                .sort_spec()
                .validate()
                .map_err(|source_error| ConfigError::Spec {
                    name: source.name.clone(),
                    source: source_error,
                })?;
            if let Some(chart) = &source.chart
                && chart.kind == ChartKind::GroupedBar
                && chart.compare.is_empty()
            {
                return Err(ConfigError::Invalid {
                    message: format!(
                        "source `{}`: grouped-bar chart needs `compare` columns",
                        source.name
                    ),
                });
            }
        }
        Ok(())
    }

    /// The layout of the stock sales dashboard.
    pub fn builtin() -> Self {
        Self {
            title: default_title(),
            sources: vec![
                SourceConfig {
                    name: "discounts".to_string(),
                    title: Some("Product Discount".to_string()),
                    table: "Product With Highest Discount Usage".to_string(),
                    limit: 10,
                    sort: SortSpec::new()
                        .then_numeric_desc("Units Sold")
                        .then_numeric_desc("Total Price")
                        .candidates,
                    fallback: true,
                    chart: Some(ChartConfig {
                        kind: ChartKind::Bar,
                        title: None,
                        label: Some("Product Name".to_string()),
                        value: Some("Units Sold".to_string()),
                        compare: Vec::new(),
                    }),
                },
                SourceConfig {
                    name: "best_sellers".to_string(),
                    title: Some("Revenue by Product".to_string()),
                    table: "Best Sellers".to_string(),
                    limit: 10,
                    sort: SortSpec::new()
                        .then_numeric_desc("Total Price")
                        .then_numeric_desc("Units Sold")
                        .candidates,
                    fallback: true,
                    chart: Some(ChartConfig {
                        kind: ChartKind::Bar,
                        title: None,
                        label: Some("Product Name".to_string()),
                        value: Some("Total Price".to_string()),
                        compare: Vec::new(),
                    }),
                },
                SourceConfig {
                    name: "voided".to_string(),
                    title: Some("Voided Items by Operator".to_string()),
                    table: "Voided Cancelled Count".to_string(),
                    limit: NO_LIMIT,
                    sort: SortSpec::new().then_numeric_desc("Voided Items").candidates,
                    fallback: true,
                    chart: Some(ChartConfig {
                        kind: ChartKind::Pie,
                        title: Some("Voided Items Distribution".to_string()),
                        label: Some("Operator Name".to_string()),
                        value: Some("Voided Items".to_string()),
                        compare: Vec::new(),
                    }),
                },
                SourceConfig {
                    name: "price_changes".to_string(),
                    title: Some("Price Changes (Last 30 Days)".to_string()),
                    table: "Products Price Changes Last 30 Days".to_string(),
                    limit: 20,
                    sort: SortSpec::new()
                        .then_lexicographic_asc("Product Name")
                        .candidates,
                    fallback: false,
                    chart: Some(ChartConfig {
                        kind: ChartKind::GroupedBar,
                        title: Some("Price Comparison".to_string()),
                        label: Some("Product Name".to_string()),
                        value: None,
                        compare: vec![
                            SeriesColumn::new("Min Price (£)", "Previous Price"),
                            SeriesColumn::new("Max Price (£)", "Current Price"),
                        ],
                    }),
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dash_model::SortMode;

    #[test]
    fn builtin_layout_is_valid() {
        let config = DashboardConfig::builtin();
        config.validate().expect("builtin config validates");
        assert_eq!(config.sources.len(), 4);
        assert_eq!(config.sources[3].sort[0].mode, SortMode::LexicographicAsc);
    }

    #[test]
    fn parses_sources_from_toml() {
        let config: DashboardConfig = toml::from_str(
            r#"
            title = "Shop"

            [[source]]
            name = "best_sellers"
            table = "Best Sellers"
            limit = 10
            sort = [
                { column = "Total Price", mode = "numeric-desc" },
                { column = "Units Sold", mode = "numeric-desc" },
            ]
            chart = { kind = "doughnut", label = "Product Name" }
            "#,
        )
        .expect("parse config");

        config.validate().expect("valid config");
        let source = &config.sources[0];
        assert_eq!(source.display_title(), "best_sellers");
        assert!(source.fallback);
        let spec = source.sort_spec();
        assert_eq!(spec.candidates.len(), 2);
        assert!(spec.fallback.is_some());
        assert_eq!(
            source.chart.as_ref().map(|chart| chart.kind),
            Some(ChartKind::Doughnut)
        );
    }

    #[test]
    fn rejects_duplicate_names() {
        let mut config = DashboardConfig::builtin();
        config.sources[1].name = config.sources[0].name.clone();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn rejects_unusable_sort_spec() {
        let mut config = DashboardConfig::builtin();
        config.sources[0].sort.clear();
        config.sources[0].fallback = false;
        assert!(matches!(config.validate(), Err(ConfigError::Spec { .. })));
    }

    #[test]
    fn rejects_empty_dashboard() {
        let config: DashboardConfig = toml::from_str("title = \"x\"").expect("parse config");
        assert!(config.validate().is_err());
    }
}
