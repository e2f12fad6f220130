//! Indicator registry for name-based construction.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ta_core::error::{ConfigurationError, IndicatorError};
use ta_core::traits::Indicator;
use ta_core::types::{Arity, IndicatorResult, IndicatorSpec, PriceTable};

use crate::{Adx, BollingerBands, Ema, FibonacciRetracement, Macd, Obv, Rsi, Sma};

/// Information about a registered indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorInfo {
    /// Canonical upper-case name
    pub name: String,
    /// Indicator description
    pub description: String,
    /// Accepted parameter count
    pub arity: Arity,
    /// Parameter names in order
    pub param_names: Vec<String>,
}

/// A configured calculator, one variant per indicator family.
#[derive(Debug, Clone, PartialEq)]
pub enum IndicatorKind {
    Sma(Sma),
    Ema(Ema),
    Rsi(Rsi),
    Macd(Macd),
    BollingerBands(BollingerBands),
    Obv(Obv),
    Adx(Adx),
    Fibonacci(FibonacciRetracement),
}

impl IndicatorKind {
    fn as_indicator(&self) -> &dyn Indicator {
        match self {
            IndicatorKind::Sma(i) => i,
            IndicatorKind::Ema(i) => i,
            IndicatorKind::Rsi(i) => i,
            IndicatorKind::Macd(i) => i,
            IndicatorKind::BollingerBands(i) => i,
            IndicatorKind::Obv(i) => i,
            IndicatorKind::Adx(i) => i,
            IndicatorKind::Fibonacci(i) => i,
        }
    }
}

impl Indicator for IndicatorKind {
    fn calculate(&self, table: &PriceTable) -> Result<IndicatorResult, IndicatorError> {
        self.as_indicator().calculate(table)
    }

    fn warm_up(&self) -> usize {
        self.as_indicator().warm_up()
    }

    fn name(&self) -> &str {
        self.as_indicator().name()
    }
}

/// Builds a calculator from already arity-checked parameters and a source column.
type Builder = fn(&[f64], &str) -> Result<IndicatorKind, ConfigurationError>;

struct Entry {
    info: IndicatorInfo,
    build: Builder,
}

/// Registry of the available indicators.
///
/// Built once and passed to the dispatcher; never mutated afterwards.
pub struct Registry {
    entries: BTreeMap<String, Entry>,
}

impl Registry {
    /// Create a registry with all built-in indicators.
    pub fn new() -> Self {
        let mut registry = Self {
            entries: BTreeMap::new(),
        };

        registry.register(
            "SMA",
            "Simple moving average of the source column",
            Arity::Exact(1),
            &["window"],
            |p, column| Ok(IndicatorKind::Sma(Sma::new(p[0])?.with_column(column))),
        );
        registry.register(
            "EMA",
            "Exponential moving average seeded with the first value",
            Arity::Exact(1),
            &["window"],
            |p, column| Ok(IndicatorKind::Ema(Ema::new(p[0])?.with_column(column))),
        );
        registry.register(
            "RSI",
            "Relative strength index with Wilder smoothing",
            Arity::Exact(1),
            &["window"],
            |p, column| Ok(IndicatorKind::Rsi(Rsi::new(p[0])?.with_column(column))),
        );
        registry.register(
            "MACD",
            "MACD line and signal line from fast/slow EMAs",
            Arity::Exact(3),
            &["fast", "slow", "signal"],
            |p, column| {
                Ok(IndicatorKind::Macd(
                    Macd::with_periods(p[0], p[1], p[2])?.with_column(column),
                ))
            },
        );
        registry.register(
            "BBANDS",
            "Bollinger bands: SMA with sample standard deviation bands",
            Arity::Exact(2),
            &["window", "num_std_dev"],
            |p, column| {
                Ok(IndicatorKind::BollingerBands(
                    BollingerBands::with_params(p[0], p[1])?.with_column(column),
                ))
            },
        );
        registry.register(
            "OBV",
            "On-balance volume running total",
            Arity::Exact(0),
            &[],
            |_, column| Ok(IndicatorKind::Obv(Obv::new().with_column(column))),
        );
        registry.register(
            "ADX",
            "Average directional index with +DI and -DI",
            Arity::Exact(1),
            &["window"],
            |p, _| Ok(IndicatorKind::Adx(Adx::new(p[0])?)),
        );
        registry.register(
            "FIB",
            "Fibonacci retracement levels between the table's extremes",
            Arity::AtLeast(1),
            &["ratios"],
            |p, _| Ok(IndicatorKind::Fibonacci(FibonacciRetracement::new(p)?)),
        );

        registry
    }

    fn register(
        &mut self,
        name: &str,
        description: &str,
        arity: Arity,
        param_names: &[&str],
        build: Builder,
    ) {
        let info = IndicatorInfo {
            name: name.to_string(),
            description: description.to_string(),
            arity,
            param_names: param_names.iter().map(|p| p.to_string()).collect(),
        };
        self.entries.insert(name.to_string(), Entry { info, build });
    }

    /// List all available indicators, ordered by name.
    pub fn list(&self) -> Vec<&IndicatorInfo> {
        self.entries.values().map(|e| &e.info).collect()
    }

    /// Get indicator info by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&IndicatorInfo> {
        self.entries.get(&name.trim().to_uppercase()).map(|e| &e.info)
    }

    /// Check if an indicator exists.
    pub fn exists(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Get all indicator names.
    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Create a calculator for a spec, reading `column` where the
    /// indicator takes a source column.
    ///
    /// Checks the name, then the parameter count, then the parameter values.
    pub fn create(&self, spec: &IndicatorSpec, column: &str) -> Result<IndicatorKind, ConfigurationError> {
        let entry = self
            .entries
            .get(spec.name())
            .ok_or_else(|| ConfigurationError::UnknownIndicator {
                name: spec.name().to_string(),
            })?;

        if !entry.info.arity.accepts(spec.params().len()) {
            return Err(ConfigurationError::WrongArity {
                name: spec.name().to_string(),
                expected: entry.info.arity,
                actual: spec.params().len(),
            });
        }

        (entry.build)(spec.params(), column)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
