//! CSV data source.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use csv::ReaderBuilder;
use std::path::PathBuf;
use ta_core::error::DataError;
use ta_core::traits::DataSource;
use ta_core::types::{DateRange, Interval, PriceTable, RawTable};
use tracing::{debug, info, warn};

/// Header names accepted for the timestamp column (case-insensitive).
const DATE_HEADERS: [&str; 3] = ["date", "datetime", "timestamp"];

/// CSV data source for historical data.
///
/// Reads one file per ticker from a directory. The first file found among
/// `TICKER.csv`, `ticker.csv`, `TICKER_daily.csv` and `ticker_daily.csv`
/// is used.
pub struct CsvDataSource {
    dir: PathBuf,
}

impl CsvDataSource {
    /// Create a new CSV data source over a directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Candidate file paths for a ticker, in lookup order.
    fn candidates(&self, ticker: &str) -> Vec<PathBuf> {
        let upper = ticker.to_uppercase();
        let lower = ticker.to_lowercase();
        vec![
            self.dir.join(format!("{}.csv", upper)),
            self.dir.join(format!("{}.csv", lower)),
            self.dir.join(format!("{}_daily.csv", upper)),
            self.dir.join(format!("{}_daily.csv", lower)),
        ]
    }

    async fn locate(&self, ticker: &str) -> Result<PathBuf, DataError> {
        for path in self.candidates(ticker) {
            if tokio::fs::metadata(&path).await.is_ok() {
                return Ok(path);
            }
        }
        Err(DataError::SymbolNotFound(ticker.to_string()))
    }

    /// Parse CSV text into a raw table, keeping only rows inside `range`.
    ///
    /// Rows whose date cannot be parsed are skipped; their count is returned
    /// with the table.
    fn parse(&self, content: &str, range: &DateRange) -> Result<(RawTable, usize), DataError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| DataError::Parse(e.to_string()))?
            .clone();
        let date_index = headers
            .iter()
            .position(|h| DATE_HEADERS.contains(&h.to_ascii_lowercase().as_str()))
            .ok_or_else(|| DataError::MissingColumn("Date".to_string()))?;
        let value_headers: Vec<(usize, &str)> = headers
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != date_index)
            .collect();

        let mut timestamps = Vec::new();
        let mut bad_dates = 0usize;
        let mut cells: Vec<Vec<String>> = vec![Vec::new(); value_headers.len()];

        for result in reader.records() {
            let record = result.map_err(|e| DataError::Parse(e.to_string()))?;
            let date = record.get(date_index).unwrap_or_default();
            let timestamp = match parse_timestamp(date) {
                Ok(timestamp) => timestamp,
                Err(e) => {
                    warn!(error = %e, "Skipping row");
                    bad_dates += 1;
                    continue;
                }
            };
            if !range.contains_millis(timestamp) {
                continue;
            }

            timestamps.push(timestamp);
            for (column, (index, _)) in cells.iter_mut().zip(&value_headers) {
                column.push(record.get(*index).unwrap_or_default().to_string());
            }
        }

        let raw = value_headers
            .iter()
            .zip(cells)
            .fold(RawTable::new(timestamps), |raw, ((_, name), column)| {
                raw.with_column(name, column)
            });
        Ok((raw, bad_dates))
    }
}

#[async_trait]
impl DataSource for CsvDataSource {
    async fn fetch(
        &self,
        ticker: &str,
        range: &DateRange,
        interval: Interval,
    ) -> Result<PriceTable, DataError> {
        let path = self.locate(ticker).await?;
        debug!(ticker, path = %path.display(), %interval, "Reading CSV");

        let content = tokio::fs::read_to_string(&path).await?;
        let (raw, bad_dates) = self.parse(&content, range)?;
        let (table, mut report) = PriceTable::from_raw(raw)?;
        report.rows_in += bad_dates;
        report.rows_dropped += bad_dates;

        info!(
            ticker,
            rows = table.len(),
            dropped = report.rows_dropped,
            coerced = report.cells_coerced,
            "Loaded CSV data"
        );
        Ok(table)
    }

    fn name(&self) -> &str {
        "csv"
    }
}

/// Parse various timestamp formats into Unix milliseconds.
fn parse_timestamp(date_str: &str) -> Result<i64, DataError> {
    let date_str = date_str.trim();

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, format) {
            return Ok(dt.and_utc().timestamp_millis());
        }
    }

    for format in ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(date_str, format) {
            if let Some(dt) = d.and_hms_opt(0, 0, 0) {
                return Ok(dt.and_utc().timestamp_millis());
            }
        }
    }

    // Try parsing as Unix timestamp
    if let Ok(ts) = date_str.parse::<i64>() {
        // Assume milliseconds if > 10 digits
        if ts > 10_000_000_000 {
            return Ok(ts);
        } else {
            return Ok(ts * 1000);
        }
    }

    Err(DataError::Parse(format!("Could not parse date: {}", date_str)))
}
