//! Configuration resolution and data loading shared by the run commands.

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use ta_config::{load_config, AppConfig, IndicatorList};
use ta_core::types::{DateRange, Interval};
use ta_data::{CsvDataSource, FetchOutcome, Fetcher};
use ta_indicators::Registry;
use tracing::{info, warn};

use crate::cli::RunArgs;

/// Load the configuration file, or defaults when it does not exist.
pub fn load_or_default(config_path: &Path) -> Result<AppConfig> {
    if config_path.exists() {
        load_config(config_path)
            .with_context(|| format!("Failed to load configuration from {}", config_path.display()))
    } else {
        warn!(path = %config_path.display(), "Configuration file not found, using defaults");
        Ok(AppConfig::default())
    }
}

/// Overlay command-line flags onto the `[run]` and `[data]` sections.
pub fn apply_overrides(config: &mut AppConfig, args: &RunArgs, indicators: Option<&str>) {
    if !args.tickers.is_empty() {
        config.run.tickers = args.tickers.clone();
    }
    if let Some(start) = &args.start {
        config.run.start_date = start.clone();
    }
    if let Some(end) = &args.end {
        config.run.end_date = end.clone();
    }
    if let Some(interval) = &args.interval {
        config.run.interval = interval.clone();
    }
    if let Some(column) = &args.column {
        config.run.column = column.clone();
    }
    if let Some(data) = &args.data {
        config.data.data_dir = data.display().to_string();
    }
    if let Some(indicators) = indicators {
        config.run.indicators = IndicatorList::Text(indicators.to_string());
    }
}

/// A validated run: configuration plus its parsed date range and interval.
pub struct RunContext {
    pub config: AppConfig,
    pub range: DateRange,
    pub interval: Interval,
}

impl RunContext {
    pub fn new(config: AppConfig, registry: &Registry) -> Result<Self> {
        config.validate(registry).context("Invalid run configuration")?;
        let range = config.run.date_range()?;
        let interval = config.run.interval()?;
        Ok(Self {
            config,
            range,
            interval,
        })
    }

    /// Fetch every configured ticker. Fails only when nothing could be loaded.
    pub async fn fetch(&self) -> Result<FetchOutcome> {
        let data_dir = &self.config.data.data_dir;
        if !Path::new(data_dir).is_dir() {
            anyhow::bail!(
                "Data directory '{}' does not exist. Provide a directory of CSV files (e.g. --data ./data)",
                data_dir
            );
        }

        let source = Arc::new(CsvDataSource::new(data_dir));
        let fetcher = Fetcher::new(source, Duration::from_millis(self.config.data.fetch_delay_ms));
        let outcome = fetcher
            .fetch_all(&self.config.run.tickers, &self.range, self.interval)
            .await;

        for skipped in &outcome.skipped {
            warn!(ticker = %skipped.key, reason = %skipped.reason, "Ticker skipped");
        }
        if outcome.tables.is_empty() {
            anyhow::bail!("No data loaded");
        }

        info!("Loaded data for {} tickers", outcome.tables.len());
        Ok(outcome)
    }
}
