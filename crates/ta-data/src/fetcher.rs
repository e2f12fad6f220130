//! Throttled multi-instrument fetching.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use ta_core::error::DataError;
use ta_core::traits::DataSource;
use ta_core::types::{DateRange, Interval, PriceTable, Skipped};
use tracing::{info, warn};

/// Tables fetched for a batch of tickers.
#[derive(Debug, Clone, Default)]
pub struct FetchOutcome {
    /// Non-empty tables keyed by upper-case ticker
    pub tables: BTreeMap<String, PriceTable>,
    /// Tickers that failed or returned no rows
    pub skipped: Vec<Skipped>,
}

/// Fetches one table per ticker from a data source, one request at a time.
pub struct Fetcher {
    source: Arc<dyn DataSource>,
    delay: Duration,
}

impl Fetcher {
    /// Create a fetcher that waits `delay` between successive requests.
    pub fn new(source: Arc<dyn DataSource>, delay: Duration) -> Self {
        Self { source, delay }
    }

    /// Fetch every ticker.
    ///
    /// Tickers are upper-cased and de-duplicated, keeping first-seen order.
    /// A failure or an empty table skips that ticker only.
    pub async fn fetch_all(&self, tickers: &[String], range: &DateRange, interval: Interval) -> FetchOutcome {
        let mut outcome = FetchOutcome::default();
        let mut seen: Vec<String> = Vec::with_capacity(tickers.len());
        for ticker in tickers {
            let ticker = ticker.trim().to_uppercase();
            if !ticker.is_empty() && !seen.contains(&ticker) {
                seen.push(ticker);
            }
        }

        for (i, ticker) in seen.into_iter().enumerate() {
            if i > 0 && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }

            info!(ticker = %ticker, source = self.source.name(), "Fetching data");
            let fetched = self.source.fetch(&ticker, range, interval).await;
            match fetched {
                Ok(table) if table.is_empty() => {
                    warn!(ticker = %ticker, "No data returned, skipping");
                    outcome.skipped.push(Skipped::new(ticker, DataError::NoDataAvailable));
                }
                Ok(table) => {
                    outcome.tables.insert(ticker, table);
                }
                Err(e) => {
                    warn!(ticker = %ticker, error = %e, "Fetch failed, skipping");
                    outcome.skipped.push(Skipped::new(ticker, e));
                }
            }
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Instant;
    use ta_core::types::Bar;

    /// Serves one bar for known tickers and records every request.
    struct MockSource {
        requests: Mutex<Vec<String>>,
    }

    impl MockSource {
        fn new() -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl DataSource for MockSource {
        async fn fetch(
            &self,
            ticker: &str,
            _range: &DateRange,
            _interval: Interval,
        ) -> Result<PriceTable, DataError> {
            self.requests.lock().unwrap().push(ticker.to_string());
            match ticker {
                "EMPTY" => Ok(PriceTable::empty()),
                "AAPL" | "MSFT" => PriceTable::from_bars(&[Bar::new(0, 1.0, 2.0, 0.5, 1.5, 10.0)]),
                _ => Err(DataError::SymbolNotFound(ticker.to_string())),
            }
        }

        fn name(&self) -> &str {
            "mock"
        }
    }

    fn range() -> DateRange {
        DateRange::parse("2024-01-01", "2024-12-31").unwrap()
    }

    fn tickers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_failures_are_isolated() {
        let source = Arc::new(MockSource::new());
        let fetcher = Fetcher::new(source.clone(), Duration::ZERO);

        let outcome = fetcher
            .fetch_all(&tickers(&["aapl", "NOPE", "EMPTY", "msft"]), &range(), Interval::Daily)
            .await;

        let fetched: Vec<&str> = outcome.tables.keys().map(String::as_str).collect();
        assert_eq!(fetched, vec!["AAPL", "MSFT"]);

        let skipped: Vec<&str> = outcome.skipped.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(skipped, vec!["NOPE", "EMPTY"]);
        assert!(outcome.skipped[0].reason.contains("NOPE"));
        assert_eq!(outcome.skipped[1].reason, DataError::NoDataAvailable.to_string());
    }

    #[tokio::test]
    async fn test_tickers_deduplicated() {
        let source = Arc::new(MockSource::new());
        let fetcher = Fetcher::new(source.clone(), Duration::ZERO);

        fetcher
            .fetch_all(&tickers(&["msft", "MSFT", " aapl ", ""]), &range(), Interval::Daily)
            .await;

        assert_eq!(*source.requests.lock().unwrap(), vec!["MSFT", "AAPL"]);
    }

    #[tokio::test]
    async fn test_throttle_between_requests() {
        let source = Arc::new(MockSource::new());
        let fetcher = Fetcher::new(source, Duration::from_millis(30));

        let start = Instant::now();
        fetcher
            .fetch_all(&tickers(&["AAPL", "MSFT", "NOPE"]), &range(), Interval::Daily)
            .await;

        // Two gaps for three requests, none after the last
        assert!(start.elapsed() >= Duration::from_millis(60));
    }
}
