//! Indicator requests and their canonical labels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of parameters an indicator accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Arity {
    Exact(usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(&self, count: usize) -> bool {
        match *self {
            Arity::Exact(n) => count == n,
            Arity::AtLeast(n) => count >= n,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exact(n) => write!(f, "{}", n),
            Arity::AtLeast(n) => write!(f, "at least {}", n),
        }
    }
}

/// An indicator name with its ordered numeric parameters.
///
/// The name is upper-cased on construction, including when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawSpec")]
pub struct IndicatorSpec {
    name: String,
    params: Vec<f64>,
}

/// Serialized form of an [`IndicatorSpec`] before canonicalisation.
#[derive(Deserialize)]
struct RawSpec {
    name: String,
    #[serde(default)]
    params: Vec<f64>,
}

impl From<RawSpec> for IndicatorSpec {
    fn from(raw: RawSpec) -> Self {
        IndicatorSpec::new(&raw.name, raw.params)
    }
}

impl IndicatorSpec {
    pub fn new(name: &str, params: Vec<f64>) -> Self {
        Self {
            name: name.trim().to_uppercase(),
            params,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[f64] {
        &self.params
    }

    /// Canonical label: `NAME` without parameters, else `NAME_p1_p2...`.
    pub fn label(&self) -> String {
        if self.params.is_empty() {
            self.name.clone()
        } else {
            let params: Vec<String> = self.params.iter().map(|p| format_param(*p)).collect();
            format!("{}_{}", self.name, params.join("_"))
        }
    }
}

impl fmt::Display for IndicatorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Format a parameter the way it appears in labels: integral values
/// print without a fractional part.
pub fn format_param(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label() {
        assert_eq!(IndicatorSpec::new("macd", vec![12.0, 26.0, 9.0]).label(), "MACD_12_26_9");
        assert_eq!(IndicatorSpec::new("OBV", vec![]).label(), "OBV");
        assert_eq!(IndicatorSpec::new(" bbands ", vec![20.0, 2.5]).label(), "BBANDS_20_2.5");
    }

    #[test]
    fn test_deserialize_canonicalises_name() {
        let spec: IndicatorSpec = serde_json::from_str(r#"{"name":" sma ","params":[2.0]}"#).unwrap();
        assert_eq!(spec.name(), "SMA");
        assert_eq!(spec.label(), "SMA_2");

        let spec: IndicatorSpec = serde_json::from_str(r#"{"name":"obv"}"#).unwrap();
        assert_eq!(spec, IndicatorSpec::new("OBV", vec![]));
    }

    #[test]
    fn test_arity() {
        assert!(Arity::Exact(1).accepts(1));
        assert!(!Arity::Exact(1).accepts(2));
        assert!(Arity::AtLeast(1).accepts(3));
        assert!(!Arity::AtLeast(1).accepts(0));
        assert_eq!(Arity::AtLeast(1).to_string(), "at least 1");
    }

    #[test]
    fn test_format_param() {
        assert_eq!(format_param(14.0), "14");
        assert_eq!(format_param(0.618), "0.618");
        assert_eq!(format_param(-3.0), "-3");
    }
}
