//! Momentum indicators.

use ta_core::error::{ConfigurationError, IndicatorError};
use ta_core::traits::Indicator;
use ta_core::types::{columns, IndicatorResult, PriceTable, Series, SeriesTable};

use crate::{params, simd, smoothing};

/// Relative Strength Index (RSI).
///
/// Measures the speed and magnitude of recent price changes
/// to evaluate overbought or oversold conditions.
///
/// When both smoothed gain and smoothed loss are zero (a flat market) the
/// point is left undefined rather than pinned to 50 or 0.
#[derive(Debug, Clone, PartialEq)]
pub struct Rsi {
    period: usize,
    column: String,
}

impl Rsi {
    /// Create a new RSI indicator.
    ///
    /// Common periods are 14 (default) or 9.
    pub fn new(period: f64) -> Result<Self, ConfigurationError> {
        Ok(Self {
            period: params::window("RSI", "window", period)?,
            column: columns::CLOSE.to_string(),
        })
    }

    /// Read a different source column.
    pub fn with_column(mut self, column: &str) -> Self {
        self.column = column.to_string();
        self
    }

    /// Per-step gains and losses; the first entry has no prior price.
    fn gains_losses(&self, table: &PriceTable, data: &[Option<f64>]) -> (Vec<Option<f64>>, Vec<Option<f64>>) {
        if data.is_empty() {
            return (vec![], vec![]);
        }

        if let Some(dense) = table.dense(&self.column) {
            let (gains, losses) = simd::split_changes(&dense);
            let lead = std::iter::once(None);
            return (
                lead.clone().chain(gains.into_iter().map(Some)).collect(),
                lead.chain(losses.into_iter().map(Some)).collect(),
            );
        }

        let mut gains = Vec::with_capacity(data.len());
        let mut losses = Vec::with_capacity(data.len());
        gains.push(None);
        losses.push(None);
        for pair in data.windows(2) {
            match (pair[0], pair[1]) {
                (Some(prev), Some(curr)) => {
                    let (gain, loss) = simd::split_change(curr - prev);
                    gains.push(Some(gain));
                    losses.push(Some(loss));
                }
                _ => {
                    gains.push(None);
                    losses.push(None);
                }
            }
        }
        (gains, losses)
    }
}

impl Indicator for Rsi {
    fn calculate(&self, table: &PriceTable) -> Result<IndicatorResult, IndicatorError> {
        let data = table.require(&self.column, self.name())?;
        let (gains, losses) = self.gains_losses(table, data);

        let avg_gains = smoothing::wilder(&gains, self.period);
        let avg_losses = smoothing::wilder(&losses, self.period);

        let values = avg_gains
            .iter()
            .zip(&avg_losses)
            .map(|(gain, loss)| match (*gain, *loss) {
                (Some(gain), Some(loss)) => rsi_value(gain, loss),
                _ => None,
            })
            .collect();

        Ok(IndicatorResult::Series(Series::new(
            table.timestamps().to_vec(),
            values,
        )))
    }

    fn warm_up(&self) -> usize {
        self.period // one change is lost to differencing
    }

    fn name(&self) -> &str {
        "RSI"
    }
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> Option<f64> {
    if avg_loss == 0.0 {
        (avg_gain > 0.0).then_some(100.0)
    } else {
        Some(100.0 - 100.0 / (1.0 + avg_gain / avg_loss))
    }
}

/// Column names of a MACD result.
pub const MACD_LINE: &str = "MACD";
pub const MACD_SIGNAL: &str = "Signal";

/// MACD indicator.
///
/// Uses two EMAs to identify trend direction and momentum. The result
/// table holds the MACD line and its signal line; see [`histogram`].
#[derive(Debug, Clone, PartialEq)]
pub struct Macd {
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
    column: String,
}

impl Macd {
    /// Create a MACD with custom periods. `fast` must be below `slow`.
    pub fn with_periods(fast: f64, slow: f64, signal: f64) -> Result<Self, ConfigurationError> {
        let fast_period = params::window("MACD", "fast window", fast)?;
        let slow_period = params::window("MACD", "slow window", slow)?;
        let signal_period = params::window("MACD", "signal window", signal)?;
        if fast_period >= slow_period {
            return Err(params::invalid(
                "MACD",
                format!(
                    "fast window ({}) must be less than slow window ({})",
                    fast_period, slow_period
                ),
            ));
        }
        Ok(Self {
            fast_period,
            slow_period,
            signal_period,
            column: columns::CLOSE.to_string(),
        })
    }

    /// Read a different source column.
    pub fn with_column(mut self, column: &str) -> Self {
        self.column = column.to_string();
        self
    }
}

impl Indicator for Macd {
    fn calculate(&self, table: &PriceTable) -> Result<IndicatorResult, IndicatorError> {
        let data = table.require(&self.column, self.name())?;

        let fast_ema = smoothing::ema(data, self.fast_period);
        let slow_ema = smoothing::ema(data, self.slow_period);

        let macd_line: Vec<Option<f64>> = fast_ema
            .iter()
            .zip(&slow_ema)
            .map(|(f, s)| Some((*f)? - (*s)?))
            .collect();
        let signal_line = smoothing::ema(&macd_line, self.signal_period);

        Ok(IndicatorResult::Table(
            SeriesTable::new(table.timestamps().to_vec())
                .with_column(MACD_LINE, macd_line)
                .with_column(MACD_SIGNAL, signal_line),
        ))
    }

    fn warm_up(&self) -> usize {
        0
    }

    fn name(&self) -> &str {
        "MACD"
    }
}

/// Histogram (MACD - Signal) of a MACD result table.
pub fn histogram(table: &SeriesTable) -> Option<Vec<Option<f64>>> {
    let macd = table.column(MACD_LINE)?;
    let signal = table.column(MACD_SIGNAL)?;
    Some(
        macd.iter()
            .zip(signal)
            .map(|(m, s)| Some((*m)? - (*s)?))
            .collect(),
    )
}
