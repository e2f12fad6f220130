//! Trend strength indicators.

use ta_core::error::{ConfigurationError, IndicatorError};
use ta_core::traits::Indicator;
use ta_core::types::{columns, IndicatorResult, PriceTable, SeriesTable};

use crate::{params, smoothing};

pub const ADX_LINE: &str = "ADX";
pub const PLUS_DI: &str = "plus_DI";
pub const MINUS_DI: &str = "minus_DI";

/// Average Directional Index (ADX) with its directional indicators.
///
/// Reads the `High`, `Low` and `Close` columns. True range and directional
/// movement are Wilder-smoothed, turned into +DI/-DI, and the directional
/// index DX is smoothed once more into ADX. All three output columns are
/// undefined for the first `2 * period - 1` rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Adx {
    period: usize,
}

/// True range and directional movement of one row against the previous one.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Movement {
    true_range: f64,
    plus_dm: f64,
    minus_dm: f64,
}

impl Adx {
    /// Common period is 14.
    pub fn new(period: f64) -> Result<Self, ConfigurationError> {
        Ok(Self {
            period: params::window("ADX", "window", period)?,
        })
    }

    fn movements(highs: &[Option<f64>], lows: &[Option<f64>], closes: &[Option<f64>]) -> Vec<Option<Movement>> {
        let mut result = Vec::with_capacity(closes.len());
        if closes.is_empty() {
            return result;
        }
        result.push(None);

        for i in 1..closes.len() {
            let movement = match (highs[i], lows[i], highs[i - 1], lows[i - 1], closes[i - 1]) {
                (Some(high), Some(low), Some(prev_high), Some(prev_low), Some(prev_close)) => {
                    let up = high - prev_high;
                    let down = prev_low - low;
                    Some(Movement {
                        true_range: (high - low)
                            .max((high - prev_close).abs())
                            .max((low - prev_close).abs()),
                        plus_dm: if up > down && up > 0.0 { up } else { 0.0 },
                        minus_dm: if down > up && down > 0.0 { down } else { 0.0 },
                    })
                }
                _ => None,
            };
            result.push(movement);
        }

        result
    }
}

impl Indicator for Adx {
    fn calculate(&self, table: &PriceTable) -> Result<IndicatorResult, IndicatorError> {
        let highs = table.require(columns::HIGH, self.name())?;
        let lows = table.require(columns::LOW, self.name())?;
        let closes = table.require(columns::CLOSE, self.name())?;

        let movements = Self::movements(highs, lows, closes);
        let pick = |f: fn(&Movement) -> f64| -> Vec<Option<f64>> {
            movements.iter().map(|m| m.as_ref().map(f)).collect()
        };

        let tr = smoothing::wilder(&pick(|m| m.true_range), self.period);
        let plus_dm = smoothing::wilder(&pick(|m| m.plus_dm), self.period);
        let minus_dm = smoothing::wilder(&pick(|m| m.minus_dm), self.period);

        let directional = |dm: &[Option<f64>]| -> Vec<Option<f64>> {
            dm.iter()
                .zip(&tr)
                .map(|(dm, tr)| {
                    let (dm, tr) = ((*dm)?, (*tr)?);
                    Some(if tr == 0.0 { 0.0 } else { 100.0 * dm / tr })
                })
                .collect()
        };
        let mut plus_di = directional(&plus_dm);
        let mut minus_di = directional(&minus_dm);

        let dx: Vec<Option<f64>> = plus_di
            .iter()
            .zip(&minus_di)
            .map(|(p, m)| {
                let (p, m) = ((*p)?, (*m)?);
                let sum = p + m;
                Some(if sum == 0.0 { 0.0 } else { 100.0 * (p - m).abs() / sum })
            })
            .collect();
        let adx = smoothing::wilder(&dx, self.period);

        let masked = self.warm_up().min(closes.len());
        plus_di[..masked].fill(None);
        minus_di[..masked].fill(None);

        Ok(IndicatorResult::Table(
            SeriesTable::new(table.timestamps().to_vec())
                .with_column(ADX_LINE, adx)
                .with_column(PLUS_DI, plus_di)
                .with_column(MINUS_DI, minus_di),
        ))
    }

    fn warm_up(&self) -> usize {
        2 * self.period - 1
    }

    fn name(&self) -> &str {
        "ADX"
    }
}
