//! Configuration structures.

use serde::{Deserialize, Serialize};
use ta_core::types::{DateRange, IndicatorSpec, Interval};
use ta_indicators::{Dispatcher, Registry};

use crate::error::ConfigValidationError;
use crate::specs::parse_indicator_specs;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub run: RunSettings,
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "ta-engine".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

/// Price data retrieval settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    /// Data source kind; only `csv` is available
    pub source: String,
    /// Directory holding one CSV file per ticker
    pub data_dir: String,
    /// Delay between successive instrument requests
    pub fetch_delay_ms: u64,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            source: "csv".to_string(),
            data_dir: "data".to_string(),
            fetch_delay_ms: 1000,
        }
    }
}

/// One indicator given as a table in the configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorEntry {
    pub name: String,
    #[serde(default)]
    pub params: Vec<f64>,
}

/// Indicators to compute: the textual grammar or a list of tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IndicatorList {
    Text(String),
    Entries(Vec<IndicatorEntry>),
}

impl Default for IndicatorList {
    fn default() -> Self {
        IndicatorList::Text(String::new())
    }
}

impl IndicatorList {
    /// Resolve to parsed specs.
    pub fn specs(&self) -> Result<Vec<IndicatorSpec>, ConfigValidationError> {
        match self {
            IndicatorList::Text(text) => Ok(parse_indicator_specs(text)?),
            IndicatorList::Entries(entries) => Ok(entries
                .iter()
                .map(|e| IndicatorSpec::new(&e.name, e.params.clone()))
                .collect()),
        }
    }
}

/// Default computation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunSettings {
    pub tickers: Vec<String>,
    /// Inclusive start date, YYYY-MM-DD
    pub start_date: String,
    /// Inclusive end date, YYYY-MM-DD
    pub end_date: String,
    pub interval: String,
    pub indicators: IndicatorList,
    /// Source column for single-column indicators
    pub column: String,
    /// Rescale compared series by their first value
    pub normalize: bool,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            tickers: Vec::new(),
            start_date: "2024-01-01".to_string(),
            end_date: "2024-12-31".to_string(),
            interval: Interval::Daily.to_string(),
            indicators: IndicatorList::default(),
            column: "Close".to_string(),
            normalize: false,
        }
    }
}

impl RunSettings {
    pub fn date_range(&self) -> Result<DateRange, ConfigValidationError> {
        DateRange::parse(&self.start_date, &self.end_date).map_err(ConfigValidationError::DateRange)
    }

    pub fn interval(&self) -> Result<Interval, ConfigValidationError> {
        self.interval
            .parse()
            .map_err(|_| ConfigValidationError::Interval(self.interval.clone()))
    }

    pub fn indicator_specs(&self) -> Result<Vec<IndicatorSpec>, ConfigValidationError> {
        self.indicators.specs()
    }
}

impl AppConfig {
    /// Validate the configuration against the available indicators.
    ///
    /// Checks, in order: the ticker list, the date range, the interval,
    /// the data source, then every indicator spec.
    pub fn validate(&self, registry: &Registry) -> Result<(), ConfigValidationError> {
        if self.run.tickers.iter().all(|t| t.trim().is_empty()) {
            return Err(ConfigValidationError::NoTickers);
        }
        self.run.date_range()?;
        self.run.interval()?;
        if self.data.source != "csv" {
            return Err(ConfigValidationError::UnsupportedSource(self.data.source.clone()));
        }

        let specs = self.run.indicator_specs()?;
        Dispatcher::new(registry).validate(&specs)?;
        Ok(())
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigValidationError> {
        toml::to_string_pretty(self).map_err(|e| ConfigValidationError::Render(e.to_string()))
    }
}
