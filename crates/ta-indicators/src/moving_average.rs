//! Moving average indicators.

use ta_core::error::{ConfigurationError, IndicatorError};
use ta_core::traits::Indicator;
use ta_core::types::{columns, IndicatorResult, PriceTable, Series};

use crate::{params, smoothing};

/// Simple Moving Average (SMA).
///
/// Calculates the arithmetic mean of the last N values.
#[derive(Debug, Clone, PartialEq)]
pub struct Sma {
    period: usize,
    column: String,
}

impl Sma {
    /// Create a new SMA over the close column.
    pub fn new(period: f64) -> Result<Self, ConfigurationError> {
        Ok(Self {
            period: params::window("SMA", "window", period)?,
            column: columns::CLOSE.to_string(),
        })
    }

    /// Read a different source column.
    pub fn with_column(mut self, column: &str) -> Self {
        self.column = column.to_string();
        self
    }
}

impl Indicator for Sma {
    fn calculate(&self, table: &PriceTable) -> Result<IndicatorResult, IndicatorError> {
        let data = table.require(&self.column, self.name())?;
        Ok(IndicatorResult::Series(Series::new(
            table.timestamps().to_vec(),
            smoothing::rolling_mean(data, self.period),
        )))
    }

    fn warm_up(&self) -> usize {
        self.period - 1
    }

    fn name(&self) -> &str {
        "SMA"
    }
}

/// Exponential Moving Average (EMA).
///
/// Gives more weight to recent prices using an exponential decay,
/// seeded with the first available value.
#[derive(Debug, Clone, PartialEq)]
pub struct Ema {
    period: usize,
    column: String,
}

impl Ema {
    /// Create a new EMA over the close column.
    pub fn new(period: f64) -> Result<Self, ConfigurationError> {
        Ok(Self {
            period: params::window("EMA", "window", period)?,
            column: columns::CLOSE.to_string(),
        })
    }

    /// Read a different source column.
    pub fn with_column(mut self, column: &str) -> Self {
        self.column = column.to_string();
        self
    }

    /// Smoothing factor `2 / (period + 1)`.
    pub fn multiplier(&self) -> f64 {
        2.0 / (self.period as f64 + 1.0)
    }
}

impl Indicator for Ema {
    fn calculate(&self, table: &PriceTable) -> Result<IndicatorResult, IndicatorError> {
        let data = table.require(&self.column, self.name())?;
        Ok(IndicatorResult::Series(Series::new(
            table.timestamps().to_vec(),
            smoothing::ema(data, self.period),
        )))
    }

    fn warm_up(&self) -> usize {
        0
    }

    fn name(&self) -> &str {
        "EMA"
    }
}
