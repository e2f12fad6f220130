//! Core types and traits for the indicator engine.
//!
//! This crate provides the foundational building blocks including:
//! - Price data types (Bar, RawTable, PriceTable) and the table validator
//! - Derived data types (Series, SeriesTable, IndicatorResult, ResultSet)
//! - Indicator specifications and their canonical labels
//! - Core traits for indicators and data sources

pub mod types;
pub mod traits;
pub mod error;

pub use types::*;
pub use traits::*;
