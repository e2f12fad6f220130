//! Price data retrieval.
//!
//! Provides a [`DataSource`](ta_core::traits::DataSource) over local CSV
//! files and a [`Fetcher`] that loads many instruments with a fixed delay
//! between requests.

mod csv_source;
mod fetcher;

pub use csv_source::CsvDataSource;
pub use fetcher::{FetchOutcome, Fetcher};
