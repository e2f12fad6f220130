//! Technical indicators with SIMD optimization.
//!
//! This crate provides the indicator computation engine:
//! - Smoothing primitives (rolling mean, EMA, Wilder)
//! - Moving averages (SMA, EMA)
//! - Momentum indicators (RSI, MACD)
//! - Volatility and volume indicators (Bollinger Bands, OBV)
//! - Trend strength (ADX with +DI/-DI) and Fibonacci levels
//! - A name-keyed registry, the dispatcher and the multi-series aggregator
//!
//! Every calculator returns results aligned to the input timestamps, with
//! warm-up entries left undefined.

pub mod aggregate;
pub mod dispatcher;
pub mod levels;
pub mod momentum;
pub mod moving_average;
mod params;
pub mod registry;
pub mod simd;
pub mod smoothing;
pub mod trend;
pub mod volatility;
pub mod volume;

#[cfg(test)]
mod test_support;

pub use aggregate::{aggregate, Aggregation};
pub use dispatcher::{BatchResult, Dispatcher};
pub use levels::FibonacciRetracement;
pub use momentum::{histogram, Macd, Rsi};
pub use moving_average::{Ema, Sma};
pub use registry::{IndicatorInfo, IndicatorKind, Registry};
pub use trend::Adx;
pub use volatility::BollingerBands;
pub use volume::Obv;
