//! Data source trait definitions.

use async_trait::async_trait;

use crate::error::DataError;
use crate::types::{DateRange, Interval, PriceTable};

/// Trait for historical price data providers.
///
/// Implementations may fail, rate-limit, or return partial data; callers
/// treat every failure as affecting a single instrument only.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetch a cleaned price table.
    ///
    /// # Arguments
    /// * `ticker` - The instrument to fetch
    /// * `range` - Inclusive calendar date range
    /// * `interval` - Bar interval
    ///
    /// # Returns
    /// A validated table ordered from oldest to newest, possibly empty
    async fn fetch(
        &self,
        ticker: &str,
        range: &DateRange,
        interval: Interval,
    ) -> Result<PriceTable, DataError>;

    /// Get the data source name.
    fn name(&self) -> &str;
}
