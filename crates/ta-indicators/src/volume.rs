//! Volume indicators.

use ta_core::error::IndicatorError;
use ta_core::traits::Indicator;
use ta_core::types::{columns, IndicatorResult, PriceTable, Series};

/// On-Balance Volume (OBV).
///
/// Running total of volume, added on up closes and subtracted on down
/// closes. Starts at zero on the first row.
///
/// A row whose close, previous close or volume is missing is undefined,
/// and the running total carries over it unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct Obv {
    column: String,
    volume_column: String,
}

impl Obv {
    pub fn new() -> Self {
        Self {
            column: columns::CLOSE.to_string(),
            volume_column: columns::VOLUME.to_string(),
        }
    }

    /// Read a different price column.
    pub fn with_column(mut self, column: &str) -> Self {
        self.column = column.to_string();
        self
    }

    /// Read volume from a column other than `Volume`.
    pub fn with_volume_column(mut self, column: &str) -> Self {
        self.volume_column = column.to_string();
        self
    }
}

impl Default for Obv {
    fn default() -> Self {
        Self::new()
    }
}

impl Indicator for Obv {
    fn calculate(&self, table: &PriceTable) -> Result<IndicatorResult, IndicatorError> {
        let closes = table.require(&self.column, self.name())?;
        let volumes = table.require(&self.volume_column, self.name())?;

        let mut values = Vec::with_capacity(closes.len());
        if !closes.is_empty() {
            values.push(Some(0.0));
        }

        let mut total = 0.0;
        for i in 1..closes.len() {
            let step = match (closes[i - 1], closes[i], volumes[i]) {
                (Some(prev), Some(curr), Some(volume)) => Some(if curr > prev {
                    volume
                } else if curr < prev {
                    -volume
                } else {
                    0.0
                }),
                _ => None,
            };
            values.push(step.map(|step| {
                total += step;
                total
            }));
        }

        Ok(IndicatorResult::Series(Series::new(
            table.timestamps().to_vec(),
            values,
        )))
    }

    fn warm_up(&self) -> usize {
        0
    }

    fn name(&self) -> &str {
        "OBV"
    }
}
