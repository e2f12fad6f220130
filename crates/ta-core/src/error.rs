//! Error types for the indicator engine.

use thiserror::Error;

use crate::types::Arity;

/// Errors raised by the dispatcher and the indicator calculators.
///
/// Configuration errors are detected before any computation starts.
/// Schema errors surface per indicator at first column access and
/// never abort the rest of a batch.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IndicatorError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl IndicatorError {
    /// True for unknown names and bad parameters.
    pub fn is_configuration(&self) -> bool {
        matches!(self, IndicatorError::Configuration(_))
    }

    /// True for missing input columns.
    pub fn is_schema(&self) -> bool {
        matches!(self, IndicatorError::Schema(_))
    }
}

/// Invalid indicator request.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("Unsupported indicator: '{name}'")]
    UnknownIndicator { name: String },

    #[error("'{name}' requires {expected} parameter(s), got {actual}")]
    WrongArity {
        name: String,
        expected: Arity,
        actual: usize,
    },

    #[error("Invalid parameters for '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },
}

/// Input table does not carry a column an indicator reads.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("{indicator} requires column '{column}' which is absent from the price table")]
    MissingColumn { indicator: String, column: String },
}

/// Data retrieval and table validation errors.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    #[error("No data available for the requested range")]
    NoDataAvailable,

    #[error("Invalid interval: {0}")]
    InvalidInterval(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Duplicate timestamp {0} in price table")]
    DuplicateTimestamp(i64),

    #[error("Price table is missing required column '{0}'")]
    MissingColumn(String),

    #[error("Column '{column}' has {actual} values, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ConfigurationError::WrongArity {
            name: "MACD".to_string(),
            expected: Arity::Exact(3),
            actual: 2,
        };
        assert_eq!(err.to_string(), "'MACD' requires 3 parameter(s), got 2");

        let err = SchemaError::MissingColumn {
            indicator: "OBV".to_string(),
            column: "Volume".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "OBV requires column 'Volume' which is absent from the price table"
        );
    }

    #[test]
    fn test_error_conversions() {
        let err: IndicatorError = ConfigurationError::UnknownIndicator {
            name: "VWAP".to_string(),
        }
        .into();
        assert!(err.is_configuration());
        assert_eq!(err.to_string(), "Unsupported indicator: 'VWAP'");

        let err: IndicatorError = SchemaError::MissingColumn {
            indicator: "ADX".to_string(),
            column: "High".to_string(),
        }
        .into();
        assert!(err.is_schema());

        let err: DataError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, DataError::Io(_)));
    }
}
