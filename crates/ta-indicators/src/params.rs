//! Parameter checks shared by the calculators.

use ta_core::error::ConfigurationError;

/// Accept a window length: a positive integer.
pub(crate) fn window(indicator: &str, what: &str, value: f64) -> Result<usize, ConfigurationError> {
    if !value.is_finite() || value.fract() != 0.0 || value < 1.0 || value > u32::MAX as f64 {
        return Err(invalid(
            indicator,
            format!("{} must be a positive integer, got {}", what, value),
        ));
    }
    Ok(value as usize)
}

/// Accept a strictly positive finite number.
pub(crate) fn positive(indicator: &str, what: &str, value: f64) -> Result<f64, ConfigurationError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(invalid(
            indicator,
            format!("{} must be a positive number, got {}", what, value),
        ));
    }
    Ok(value)
}

pub(crate) fn invalid(indicator: &str, reason: String) -> ConfigurationError {
    ConfigurationError::InvalidParameter {
        name: indicator.to_string(),
        reason,
    }
}
