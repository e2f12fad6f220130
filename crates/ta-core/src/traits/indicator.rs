//! Indicator trait definitions.

use crate::error::IndicatorError;
use crate::types::{IndicatorResult, PriceTable};

/// Trait for technical indicators.
///
/// An indicator is a pure transform from a price table to a derived
/// series or small table, aligned to the input timestamps.
pub trait Indicator: Send + Sync {
    /// Calculate indicator values for the given table.
    ///
    /// # Arguments
    /// * `table` - Cleaned price table; never mutated
    ///
    /// # Returns
    /// A result with one entry per input row. An empty table yields an
    /// empty result of the same shape; a missing column is a schema error.
    fn calculate(&self, table: &PriceTable) -> Result<IndicatorResult, IndicatorError>;

    /// Number of leading points that are undefined by construction.
    fn warm_up(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Bar, Series};

    struct TestIndicator {
        period: usize,
    }

    impl Indicator for TestIndicator {
        fn calculate(&self, table: &PriceTable) -> Result<IndicatorResult, IndicatorError> {
            let close = table.require("Close", self.name())?;
            // Trailing sum for testing
            let values = (0..close.len())
                .map(|i| {
                    if i + 1 < self.period {
                        return None;
                    }
                    close[i + 1 - self.period..=i].iter().copied().sum()
                })
                .collect();
            Ok(IndicatorResult::Series(Series::new(
                table.timestamps().to_vec(),
                values,
            )))
        }

        fn warm_up(&self) -> usize {
            self.period - 1
        }

        fn name(&self) -> &str {
            "test"
        }
    }

    #[test]
    fn test_indicator_calculate() {
        let bars: Vec<Bar> = (1..=5)
            .map(|i| Bar::new(i, 0.0, 0.0, 0.0, i as f64, 0.0))
            .collect();
        let table = PriceTable::from_bars(&bars).unwrap();
        let indicator = TestIndicator { period: 3 };

        let result = indicator.calculate(&table).unwrap();
        let series = result.as_series().unwrap();
        assert_eq!(series.leading_undefined(), indicator.warm_up());
        assert!((series.values()[2].unwrap() - 6.0).abs() < 0.001); // 1+2+3
        assert!((series.values()[4].unwrap() - 12.0).abs() < 0.001); // 3+4+5
    }

    #[test]
    fn test_indicator_missing_column() {
        let table = PriceTable::from_columns(vec![1], vec![("Open".to_string(), vec![Some(1.0)])])
            .unwrap();
        let indicator = TestIndicator { period: 1 };

        assert!(indicator.calculate(&table).unwrap_err().is_schema());
    }
}
