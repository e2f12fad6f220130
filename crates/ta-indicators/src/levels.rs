//! Price level indicators.

use ta_core::error::{ConfigurationError, IndicatorError};
use ta_core::traits::Indicator;
use ta_core::types::{columns, IndicatorResult, PriceTable, SeriesTable};

use crate::params;

/// Fibonacci retracement levels.
///
/// Each ratio `r` yields a constant column at `high - (high - low) * r`,
/// where `high` and `low` are the extremes of the whole table.
#[derive(Debug, Clone, PartialEq)]
pub struct FibonacciRetracement {
    ratios: Vec<f64>,
}

impl FibonacciRetracement {
    pub fn new(ratios: &[f64]) -> Result<Self, ConfigurationError> {
        if ratios.is_empty() {
            return Err(params::invalid("FIB", "at least one ratio is required".to_string()));
        }
        for (i, ratio) in ratios.iter().enumerate() {
            if !ratio.is_finite() || !(0.0..=1.0).contains(ratio) {
                return Err(params::invalid(
                    "FIB",
                    format!("ratio must lie within [0, 1], got {}", ratio),
                ));
            }
            if ratios[..i].iter().any(|r| level_name(*r) == level_name(*ratio)) {
                return Err(params::invalid(
                    "FIB",
                    format!("duplicate level {}", level_name(*ratio)),
                ));
            }
        }
        Ok(Self {
            ratios: ratios.to_vec(),
        })
    }

    pub fn ratios(&self) -> &[f64] {
        &self.ratios
    }
}

/// Column name of one retracement level, e.g. `fib_61.8%`.
pub fn level_name(ratio: f64) -> String {
    let percent = (ratio * 1000.0).trunc() / 10.0;
    format!("fib_{:.1}%", percent)
}

fn extreme(values: &[Option<f64>], pick: fn(f64, f64) -> f64) -> Option<f64> {
    values.iter().flatten().copied().reduce(pick)
}

impl Indicator for FibonacciRetracement {
    fn calculate(&self, table: &PriceTable) -> Result<IndicatorResult, IndicatorError> {
        let highs = table.require(columns::HIGH, self.name())?;
        let lows = table.require(columns::LOW, self.name())?;

        let high = extreme(highs, f64::max);
        let low = extreme(lows, f64::min);

        let mut levels = SeriesTable::new(table.timestamps().to_vec());
        for &ratio in &self.ratios {
            let level = match (high, low) {
                (Some(high), Some(low)) => Some(high - (high - low) * ratio),
                _ => None,
            };
            levels.push_column(&level_name(ratio), vec![level; table.len()]);
        }

        Ok(IndicatorResult::Table(levels))
    }

    fn warm_up(&self) -> usize {
        0
    }

    fn name(&self) -> &str {
        "FIB"
    }
}
