//! Core data types for the indicator engine.

mod bar;
mod interval;
mod price_table;
mod result_set;
mod series;
mod spec;

pub use bar::Bar;
pub use interval::{DateRange, Interval};
pub use price_table::{columns, CleaningReport, PriceTable, RawTable};
pub use result_set::{ResultEntry, ResultSet, Skipped};
pub use series::{IndicatorResult, Series, SeriesTable};
pub use spec::{format_param, Arity, IndicatorSpec};
