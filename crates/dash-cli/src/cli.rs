//! CLI argument definitions for the dashboard.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "dashboard",
    version,
    about = "Sales dashboard - rank record-store tables and render them as tables and charts",
    long_about = "Fetch every configured data source from a record store, rank each one by \
                  its configured keys, and render the top rows as tables and chart series.\n\n\
                  Without --config the stock sales dashboard layout is used."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Include timestamps in log lines.
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Load every source and render the dashboard.
    Render(RenderArgs),

    /// List the configured data sources and their ranking keys.
    Sources(ConfigArgs),

    /// Show the inferred column types of one record-store table.
    Inspect(InspectArgs),
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Dashboard layout file (TOML). Uses the stock layout when omitted.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct RenderArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Directory holding `<table>.json` record exports.
    #[arg(long = "data-dir", value_name = "DIR")]
    pub data_dir: PathBuf,

    /// Print one `{success, data, error}` envelope per source as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct InspectArgs {
    /// Directory holding `<table>.json` record exports.
    #[arg(long = "data-dir", value_name = "DIR")]
    pub data_dir: PathBuf,

    /// Table name as passed to the record store.
    #[arg(value_name = "TABLE")]
    pub table: String,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
