//! Columnar OHLCV price table and its validator.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Bar;
use crate::error::{DataError, SchemaError};

/// Canonical column names.
pub mod columns {
    pub const OPEN: &str = "Open";
    pub const HIGH: &str = "High";
    pub const LOW: &str = "Low";
    pub const CLOSE: &str = "Close";
    pub const VOLUME: &str = "Volume";

    /// Columns every cleaned price table carries.
    pub const REQUIRED: [&str; 4] = [OPEN, HIGH, LOW, CLOSE];

    /// Map case variants of the OHLCV headers onto their canonical names.
    pub fn canonical(name: &str) -> String {
        let trimmed = name.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "open" => OPEN.to_string(),
            "high" => HIGH.to_string(),
            "low" => LOW.to_string(),
            "close" => CLOSE.to_string(),
            "volume" => VOLUME.to_string(),
            _ => trimmed.to_string(),
        }
    }
}

/// Uncleaned table as delivered by a data source: timestamps plus textual cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    pub timestamps: Vec<i64>,
    pub columns: Vec<(String, Vec<String>)>,
}

impl RawTable {
    pub fn new(timestamps: Vec<i64>) -> Self {
        Self {
            timestamps,
            columns: Vec::new(),
        }
    }

    /// Add a column of raw cells.
    pub fn with_column(mut self, name: &str, cells: Vec<String>) -> Self {
        self.columns.push((name.to_string(), cells));
        self
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
}

/// What the validator changed while cleaning a raw table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningReport {
    /// Rows in the raw input
    pub rows_in: usize,
    /// Rows removed because every OHLC field was missing
    pub rows_dropped: usize,
    /// Cells that were empty, non-numeric or non-finite
    pub cells_coerced: usize,
}

/// Time-ordered OHLCV table.
///
/// Timestamps (Unix milliseconds) are unique and strictly increasing.
/// Every column has one entry per timestamp; `None` marks a missing value.
/// Indicators only ever read a table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceTable {
    timestamps: Vec<i64>,
    columns: BTreeMap<String, Vec<Option<f64>>>,
}

impl PriceTable {
    /// A zero-row table carrying the OHLCV columns.
    pub fn empty() -> Self {
        let columns = columns::REQUIRED
            .iter()
            .chain(std::iter::once(&columns::VOLUME))
            .map(|name| (name.to_string(), Vec::new()))
            .collect();
        Self {
            timestamps: Vec::new(),
            columns,
        }
    }

    /// Build a table from bars, sorting them by timestamp.
    ///
    /// The `Volume` column is present when at least one bar carries volume.
    pub fn from_bars(bars: &[Bar]) -> Result<Self, DataError> {
        let mut bars = bars.to_vec();
        bars.sort_by_key(|b| b.timestamp);
        check_unique(bars.iter().map(|b| b.timestamp))?;

        let mut columns = BTreeMap::new();
        columns.insert(
            columns::OPEN.to_string(),
            bars.iter().map(|b| finite(b.open)).collect(),
        );
        columns.insert(
            columns::HIGH.to_string(),
            bars.iter().map(|b| finite(b.high)).collect(),
        );
        columns.insert(
            columns::LOW.to_string(),
            bars.iter().map(|b| finite(b.low)).collect(),
        );
        columns.insert(
            columns::CLOSE.to_string(),
            bars.iter().map(|b| finite(b.close)).collect(),
        );
        if bars.is_empty() || bars.iter().any(|b| b.volume.is_some()) {
            columns.insert(
                columns::VOLUME.to_string(),
                bars.iter().map(|b| b.volume.and_then(finite)).collect(),
            );
        }

        Ok(Self {
            timestamps: bars.iter().map(|b| b.timestamp).collect(),
            columns,
        })
    }

    /// Build a table from already-numeric columns.
    ///
    /// Rows are reordered by timestamp; non-finite values become missing.
    pub fn from_columns(
        timestamps: Vec<i64>,
        columns: Vec<(String, Vec<Option<f64>>)>,
    ) -> Result<Self, DataError> {
        for (name, values) in &columns {
            if values.len() != timestamps.len() {
                return Err(DataError::LengthMismatch {
                    column: name.clone(),
                    expected: timestamps.len(),
                    actual: values.len(),
                });
            }
        }

        let order = sorted_order(&timestamps)?;
        let columns = columns
            .into_iter()
            .map(|(name, values)| {
                let values = order.iter().map(|&i| values[i].and_then(finite)).collect();
                (columns::canonical(&name), values)
            })
            .collect();

        Ok(Self {
            timestamps: order.iter().map(|&i| timestamps[i]).collect(),
            columns,
        })
    }

    /// Validate and clean a raw table.
    ///
    /// Confirms the OHLC columns exist, coerces every cell to a finite
    /// number or missing, drops rows where all OHLC fields are missing,
    /// and orders rows by timestamp. Duplicate timestamps are rejected.
    pub fn from_raw(raw: RawTable) -> Result<(Self, CleaningReport), DataError> {
        let mut report = CleaningReport {
            rows_in: raw.len(),
            ..Default::default()
        };

        let mut parsed: Vec<(String, Vec<Option<f64>>)> = Vec::with_capacity(raw.columns.len());
        for (name, cells) in raw.columns {
            if cells.len() != raw.timestamps.len() {
                return Err(DataError::LengthMismatch {
                    column: name,
                    expected: raw.timestamps.len(),
                    actual: cells.len(),
                });
            }
            let values: Vec<Option<f64>> = cells
                .iter()
                .map(|cell| {
                    let value = parse_cell(cell);
                    if value.is_none() {
                        report.cells_coerced += 1;
                    }
                    value
                })
                .collect();
            parsed.push((columns::canonical(&name), values));
        }

        for required in columns::REQUIRED {
            if !parsed.iter().any(|(name, _)| name == required) {
                return Err(DataError::MissingColumn(required.to_string()));
            }
        }

        let keep: Vec<bool> = (0..raw.timestamps.len())
            .map(|row| {
                parsed
                    .iter()
                    .filter(|(name, _)| columns::REQUIRED.contains(&name.as_str()))
                    .any(|(_, values)| values[row].is_some())
            })
            .collect();
        report.rows_dropped = keep.iter().filter(|k| !**k).count();

        let timestamps: Vec<i64> = raw
            .timestamps
            .iter()
            .zip(&keep)
            .filter(|(_, k)| **k)
            .map(|(ts, _)| *ts)
            .collect();
        let parsed = parsed
            .into_iter()
            .map(|(name, values)| {
                let values = values
                    .into_iter()
                    .zip(&keep)
                    .filter(|(_, k)| **k)
                    .map(|(v, _)| v)
                    .collect();
                (name, values)
            })
            .collect();

        let table = Self::from_columns(timestamps, parsed)?;
        Ok((table, report))
    }

    /// Get the number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Check if the table has no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Row timestamps in Unix milliseconds.
    pub fn timestamps(&self) -> &[i64] {
        &self.timestamps
    }

    /// Get a column by name.
    pub fn column(&self, name: &str) -> Option<&[Option<f64>]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// Check if a column is present.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Names of all columns.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Get a column an indicator depends on.
    pub fn require(&self, column: &str, indicator: &str) -> Result<&[Option<f64>], SchemaError> {
        self.column(column).ok_or_else(|| SchemaError::MissingColumn {
            indicator: indicator.to_string(),
            column: column.to_string(),
        })
    }

    /// A column without gaps, or `None` if it is absent or has missing values.
    pub fn dense(&self, column: &str) -> Option<Vec<f64>> {
        self.column(column)?.iter().copied().collect()
    }

    /// First and last timestamp.
    pub fn span(&self) -> Option<(i64, i64)> {
        Some((*self.timestamps.first()?, *self.timestamps.last()?))
    }
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

fn parse_cell(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().and_then(finite)
}

fn check_unique(sorted: impl Iterator<Item = i64>) -> Result<(), DataError> {
    let mut prev: Option<i64> = None;
    for ts in sorted {
        if prev == Some(ts) {
            return Err(DataError::DuplicateTimestamp(ts));
        }
        prev = Some(ts);
    }
    Ok(())
}

fn sorted_order(timestamps: &[i64]) -> Result<Vec<usize>, DataError> {
    let mut order: Vec<usize> = (0..timestamps.len()).collect();
    order.sort_by_key(|&i| timestamps[i]);
    check_unique(order.iter().map(|&i| timestamps[i]))?;
    Ok(order)
}
