//! Volatility indicators.

use ta_core::error::{ConfigurationError, IndicatorError};
use ta_core::traits::Indicator;
use ta_core::types::{columns, IndicatorResult, PriceTable, SeriesTable};

use crate::{params, smoothing};

pub const UPPER_BAND: &str = "upper_band";
pub const MIDDLE_BAND: &str = "middle_band";
pub const LOWER_BAND: &str = "lower_band";

/// Bollinger Bands.
///
/// Consists of a middle band (SMA) with upper and lower bands
/// at a specified number of sample standard deviations.
#[derive(Debug, Clone, PartialEq)]
pub struct BollingerBands {
    period: usize,
    std_dev_multiplier: f64,
    column: String,
}

impl BollingerBands {
    /// Create Bollinger Bands with custom parameters.
    ///
    /// The window needs at least two samples for a sample deviation.
    pub fn with_params(period: f64, std_dev_multiplier: f64) -> Result<Self, ConfigurationError> {
        let period = params::window("BBANDS", "window", period)?;
        if period < 2 {
            return Err(params::invalid(
                "BBANDS",
                format!("window must be at least 2, got {}", period),
            ));
        }
        let std_dev_multiplier = params::positive("BBANDS", "multiplier", std_dev_multiplier)?;
        Ok(Self {
            period,
            std_dev_multiplier,
            column: columns::CLOSE.to_string(),
        })
    }

    /// Read a different source column.
    pub fn with_column(mut self, column: &str) -> Self {
        self.column = column.to_string();
        self
    }
}

impl Indicator for BollingerBands {
    fn calculate(&self, table: &PriceTable) -> Result<IndicatorResult, IndicatorError> {
        let data = table.require(&self.column, self.name())?;

        let middle = smoothing::rolling_mean(data, self.period);
        let std_dev = smoothing::rolling_std(data, self.period);

        let k = self.std_dev_multiplier;
        let (upper, lower): (Vec<_>, Vec<_>) = middle
            .iter()
            .zip(&std_dev)
            .map(|(m, s)| match (*m, *s) {
                (Some(m), Some(s)) => (Some(m + k * s), Some(m - k * s)),
                _ => (None, None),
            })
            .unzip();

        Ok(IndicatorResult::Table(
            SeriesTable::new(table.timestamps().to_vec())
                .with_column(UPPER_BAND, upper)
                .with_column(MIDDLE_BAND, middle)
                .with_column(LOWER_BAND, lower),
        ))
    }

    fn warm_up(&self) -> usize {
        self.period - 1
    }

    fn name(&self) -> &str {
        "BBANDS"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{close_table, wave_table};

    #[test]
    fn test_bollinger_bands() {
        let table = close_table(&[2.0, 4.0, 6.0, 8.0, 10.0]);
        let result = BollingerBands::with_params(3.0, 2.0)
            .unwrap()
            .calculate(&table)
            .unwrap();
        let bands = result.as_table().unwrap();

        let names: Vec<&str> = bands.column_names().collect();
        assert_eq!(names, vec!["upper_band", "middle_band", "lower_band"]);

        // First window: [2, 4, 6], mean = 4, sample std = 2
        let upper = bands.column(UPPER_BAND).unwrap();
        let middle = bands.column(MIDDLE_BAND).unwrap();
        let lower = bands.column(LOWER_BAND).unwrap();
        assert!(upper[1].is_none() && middle[1].is_none() && lower[1].is_none());
        assert!((middle[2].unwrap() - 4.0).abs() < 1e-10);
        assert!((upper[2].unwrap() - 8.0).abs() < 1e-10);
        assert!((lower[2].unwrap() - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_band_ordering() {
        let table = wave_table(80);
        let result = BollingerBands::with_params(20.0, 2.0)
            .unwrap()
            .calculate(&table)
            .unwrap();
        let bands = result.as_table().unwrap();

        let upper = bands.column(UPPER_BAND).unwrap();
        let middle = bands.column(MIDDLE_BAND).unwrap();
        let lower = bands.column(LOWER_BAND).unwrap();
        for i in 19..80 {
            assert!(upper[i].unwrap() >= middle[i].unwrap());
            assert!(middle[i].unwrap() >= lower[i].unwrap());
        }
        assert_eq!(bands.series(UPPER_BAND).unwrap().leading_undefined(), 19);
    }

    #[test]
    fn test_flat_prices_collapse_bands() {
        let table = close_table(&[5.0; 6]);
        let result = BollingerBands::with_params(3.0, 2.0)
            .unwrap()
            .calculate(&table)
            .unwrap();
        let bands = result.as_table().unwrap();

        assert_eq!(bands.column(UPPER_BAND).unwrap()[5], Some(5.0));
        assert_eq!(bands.column(LOWER_BAND).unwrap()[5], Some(5.0));
    }

    #[test]
    fn test_validation() {
        assert!(BollingerBands::with_params(1.0, 2.0).is_err());
        assert!(BollingerBands::with_params(20.0, 0.0).is_err());
        assert!(BollingerBands::with_params(20.0, -1.5).is_err());
        assert!(BollingerBands::with_params(20.5, 2.0).is_err());
    }
}
