//! Table builders for unit tests.

use ta_core::types::{Bar, PriceTable};

/// Daily bars one day apart, starting 2024-01-01.
pub(crate) const DAY_MS: i64 = 86_400_000;
pub(crate) const START_MS: i64 = 1_704_067_200_000;

/// Table whose open, high, low and close all equal the given prices.
pub(crate) fn close_table(closes: &[f64]) -> PriceTable {
    let bars: Vec<Bar> = closes
        .iter()
        .enumerate()
        .map(|(i, &c)| Bar::new(START_MS + i as i64 * DAY_MS, c, c, c, c, 1000.0))
        .collect();
    PriceTable::from_bars(&bars).unwrap()
}

/// Table from close and volume columns.
pub(crate) fn close_volume_table(closes: &[f64], volumes: &[f64]) -> PriceTable {
    let bars: Vec<Bar> = closes
        .iter()
        .zip(volumes)
        .enumerate()
        .map(|(i, (&c, &v))| Bar::new(START_MS + i as i64 * DAY_MS, c, c, c, c, v))
        .collect();
    PriceTable::from_bars(&bars).unwrap()
}

/// Table from high, low and close columns.
pub(crate) fn hlc_table(highs: &[f64], lows: &[f64], closes: &[f64]) -> PriceTable {
    let bars: Vec<Bar> = (0..closes.len())
        .map(|i| {
            Bar::new(
                START_MS + i as i64 * DAY_MS,
                closes[i],
                highs[i],
                lows[i],
                closes[i],
                1000.0,
            )
        })
        .collect();
    PriceTable::from_bars(&bars).unwrap()
}

/// Sine-wave bars for property checks.
pub(crate) fn wave_table(len: usize) -> PriceTable {
    let bars: Vec<Bar> = (0..len)
        .map(|i| {
            let close = 100.0 + (i as f64 * 0.3).sin() * 5.0 + i as f64 * 0.05;
            Bar::new(
                START_MS + i as i64 * DAY_MS,
                close - 0.2,
                close + 1.0 + (i % 3) as f64 * 0.1,
                close - 1.0 - (i % 4) as f64 * 0.1,
                close,
                1000.0 + (i % 7) as f64 * 100.0,
            )
        })
        .collect();
    PriceTable::from_bars(&bars).unwrap()
}
