//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ta-engine")]
#[command(author, version, about = "Technical-analysis indicator engine")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level, overriding the configuration file
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute indicators for each ticker
    Compute(ComputeArgs),
    /// Compare one indicator across tickers
    Compare(CompareArgs),
    /// List available indicators
    Indicators,
    /// Validate configuration
    ValidateConfig,
}

/// Run settings shared by `compute` and `compare`. Each falls back to the
/// configuration file's `[run]` section when omitted.
#[derive(clap::Args)]
pub struct RunArgs {
    /// Tickers (comma-separated)
    #[arg(short = 'T', long, value_delimiter = ',')]
    pub tickers: Vec<String>,

    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<String>,

    /// End date (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<String>,

    /// Bar interval (1m, 5m, 1h, 1d, 1wk, ...)
    #[arg(long)]
    pub interval: Option<String>,

    /// Source column for single-column indicators
    #[arg(long)]
    pub column: Option<String>,

    /// Directory with one CSV file per ticker
    #[arg(long)]
    pub data: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct ComputeArgs {
    #[command(flatten)]
    pub run: RunArgs,

    /// Indicators, e.g. "SMA:20,MACD:12-26-9,OBV"
    #[arg(short, long)]
    pub indicators: Option<String>,

    /// Output format
    #[arg(long, default_value = "text")]
    pub output: OutputFormat,

    /// Save results to file (JSON)
    #[arg(long)]
    pub save: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct CompareArgs {
    /// Indicator to compare, e.g. "RSI:14"
    pub indicator: String,

    #[command(flatten)]
    pub run: RunArgs,

    /// Divide each series by its first defined value
    #[arg(long)]
    pub normalize: bool,

    /// Output format
    #[arg(long, default_value = "csv")]
    pub output: CompareFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CompareFormat {
    Csv,
    Json,
}
