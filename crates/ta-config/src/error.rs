//! Configuration errors.

use ta_core::error::ConfigurationError;
use thiserror::Error;

/// A malformed item in a textual indicator list.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpecParseError {
    #[error("Indicator item '{item}' has no name")]
    MissingName { item: String },

    #[error("Indicator item '{item}' has an invalid parameter '{value}'")]
    InvalidParameter { item: String, value: String },
}

/// Configuration that loaded but cannot be run.
#[derive(Error, Debug)]
pub enum ConfigValidationError {
    #[error("No tickers configured")]
    NoTickers,

    #[error("Invalid date range: {0}")]
    DateRange(String),

    #[error("Unsupported interval '{0}'")]
    Interval(String),

    #[error("Unsupported data source '{0}'")]
    UnsupportedSource(String),

    #[error(transparent)]
    SpecParse(#[from] SpecParseError),

    #[error(transparent)]
    Indicator(#[from] ConfigurationError),

    #[error("Could not render configuration: {0}")]
    Render(String),
}
