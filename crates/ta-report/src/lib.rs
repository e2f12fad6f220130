//! Logging setup and run reports.

mod logging;
mod report;

pub use logging::setup_logging;
pub use report::{format_timestamp, table_to_csv, InstrumentReport, ReportError};
