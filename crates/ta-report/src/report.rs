//! Run reports handed to renderers.

use chrono::{DateTime, Timelike};
use serde::{Deserialize, Serialize};
use ta_core::types::{PriceTable, ResultSet, SeriesTable, Skipped};
use thiserror::Error;

/// Rendering errors.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV output is not valid UTF-8")]
    Utf8,
}

/// Everything a renderer needs for one instrument: the price table, the
/// column the indicators read, and the computed results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstrumentReport {
    pub instrument: String,
    pub column: String,
    pub table: PriceTable,
    pub results: ResultSet,
    pub skipped: Vec<Skipped>,
}

impl InstrumentReport {
    pub fn new(instrument: &str, column: &str, table: PriceTable) -> Self {
        Self {
            instrument: instrument.to_string(),
            column: column.to_string(),
            table,
            results: ResultSet::new(),
            skipped: Vec::new(),
        }
    }

    /// Human-readable summary: row count, date span, and the latest
    /// defined value of every computed series.
    pub fn summary(&self) -> String {
        let mut s = String::new();

        s.push_str(&format!("{} ({})\n", self.instrument, self.column));
        s.push_str("═══════════════════════════════════════\n");

        match self.table.span() {
            Some((first, last)) => s.push_str(&format!(
                "Rows:   {} ({} to {})\n",
                self.table.len(),
                format_timestamp(first),
                format_timestamp(last)
            )),
            None => s.push_str("Rows:   0\n"),
        }

        if !self.results.is_empty() {
            s.push('\n');
            s.push_str("Latest values\n");
            s.push_str("───────────────────────────────────────\n");
        }
        for (label, entry) in self.results.iter() {
            for (name, values) in entry.result.sub_series() {
                let key = match name {
                    Some(name) => format!("{}.{}", label, name),
                    None => label.to_string(),
                };
                match values.iter().rev().find_map(|v| *v) {
                    Some(value) => s.push_str(&format!("  {:<28} {:>12.4}\n", key, value)),
                    None => s.push_str(&format!("  {:<28} {:>12}\n", key, "n/a")),
                }
            }
        }

        for skipped in &self.skipped {
            s.push_str(&format!("  {:<28} skipped: {}\n", skipped.key, skipped.reason));
        }

        s
    }

    /// Serialize the whole report.
    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Format a millisecond timestamp as a date, with the time of day when
/// it is not midnight.
pub fn format_timestamp(millis: i64) -> String {
    match DateTime::from_timestamp_millis(millis) {
        Some(dt) if dt.num_seconds_from_midnight() == 0 => dt.format("%Y-%m-%d").to_string(),
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => millis.to_string(),
    }
}

/// Render a table as CSV with a leading `Date` column. Missing values are empty cells.
pub fn table_to_csv(table: &SeriesTable) -> Result<String, ReportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header = vec!["Date".to_string()];
    header.extend(table.column_names().map(str::to_string));
    writer.write_record(&header)?;

    let columns: Vec<&[Option<f64>]> = table.columns().map(|(_, values)| values).collect();
    for (row, ts) in table.timestamps().iter().enumerate() {
        let mut record = vec![format_timestamp(*ts)];
        record.extend(
            columns
                .iter()
                .map(|values| values[row].map(|v| v.to_string()).unwrap_or_default()),
        );
        writer.write_record(&record)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ReportError::Csv(e.into_error().into()))?;
    String::from_utf8(bytes).map_err(|_| ReportError::Utf8)
}
