//! Bar intervals and date ranges for price data requests.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DataError;

/// Bar interval accepted by the data-retrieval collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Interval {
    #[serde(rename = "1m")]
    Minute1,
    #[serde(rename = "2m")]
    Minute2,
    #[serde(rename = "5m")]
    Minute5,
    #[serde(rename = "15m")]
    Minute15,
    #[serde(rename = "30m")]
    Minute30,
    #[serde(rename = "60m")]
    Minute60,
    #[serde(rename = "90m")]
    Minute90,
    #[serde(rename = "1h")]
    Hour1,
    #[serde(rename = "1d")]
    #[default]
    Daily,
    #[serde(rename = "5d")]
    Day5,
    #[serde(rename = "1wk")]
    Weekly,
    #[serde(rename = "1mo")]
    Monthly,
    #[serde(rename = "3mo")]
    Quarterly,
}

impl Interval {
    /// Check if this is an intraday interval.
    pub fn is_intraday(&self) -> bool {
        matches!(
            self,
            Interval::Minute1
                | Interval::Minute2
                | Interval::Minute5
                | Interval::Minute15
                | Interval::Minute30
                | Interval::Minute60
                | Interval::Minute90
                | Interval::Hour1
        )
    }

    /// Get all supported intervals.
    pub fn all() -> &'static [Interval] {
        &[
            Interval::Minute1,
            Interval::Minute2,
            Interval::Minute5,
            Interval::Minute15,
            Interval::Minute30,
            Interval::Minute60,
            Interval::Minute90,
            Interval::Hour1,
            Interval::Daily,
            Interval::Day5,
            Interval::Weekly,
            Interval::Monthly,
            Interval::Quarterly,
        ]
    }

    fn as_str(&self) -> &'static str {
        match self {
            Interval::Minute1 => "1m",
            Interval::Minute2 => "2m",
            Interval::Minute5 => "5m",
            Interval::Minute15 => "15m",
            Interval::Minute30 => "30m",
            Interval::Minute60 => "60m",
            Interval::Minute90 => "90m",
            Interval::Hour1 => "1h",
            Interval::Daily => "1d",
            Interval::Day5 => "5d",
            Interval::Weekly => "1wk",
            Interval::Monthly => "1mo",
            Interval::Quarterly => "3mo",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Interval {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Interval::all()
            .iter()
            .copied()
            .find(|i| i.as_str() == s)
            .ok_or_else(|| DataError::InvalidInterval(s.to_string()))
    }
}

/// Inclusive calendar date range of a price request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a range, rejecting `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, String> {
        if start > end {
            return Err(format!(
                "Start date {} cannot be after the end date {}",
                start, end
            ));
        }
        Ok(Self { start, end })
    }

    /// Parse a pair of `YYYY-MM-DD` dates.
    pub fn parse(start: &str, end: &str) -> Result<Self, String> {
        let parse = |s: &str| {
            NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
                .map_err(|_| format!("Invalid date '{}'. Please use YYYY-MM-DD", s))
        };
        Self::new(parse(start)?, parse(end)?)
    }

    /// Check whether a millisecond timestamp falls on a day within the range.
    pub fn contains_millis(&self, timestamp: i64) -> bool {
        match chrono::DateTime::from_timestamp_millis(timestamp) {
            Some(dt) => {
                let day = dt.date_naive();
                day >= self.start && day <= self.end
            }
            None => false,
        }
    }
}
