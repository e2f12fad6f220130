//! Textual indicator list grammar.
//!
//! Items are comma-separated; each is `NAME`, `NAME:p1` or `NAME:p1-p2-...`.

use ta_core::types::IndicatorSpec;

use crate::error::SpecParseError;

/// Parse a textual indicator list such as `"SMA:20, MACD:12-26-9, OBV"`.
///
/// Names are trimmed and upper-cased; empty items are ignored.
pub fn parse_indicator_specs(text: &str) -> Result<Vec<IndicatorSpec>, SpecParseError> {
    text.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(parse_item)
        .collect()
}

fn parse_item(item: &str) -> Result<IndicatorSpec, SpecParseError> {
    let (name, params) = match item.split_once(':') {
        Some((name, params)) => (name.trim(), Some(params)),
        None => (item, None),
    };
    if name.is_empty() {
        return Err(SpecParseError::MissingName {
            item: item.to_string(),
        });
    }

    let params = match params {
        Some(params) => params
            .split('-')
            .map(|value| {
                let value = value.trim();
                value
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| SpecParseError::InvalidParameter {
                        item: item.to_string(),
                        value: value.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?,
        None => Vec::new(),
    };

    Ok(IndicatorSpec::new(name, params))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_items() {
        let specs = parse_indicator_specs("sma:20, EMA:14,macd:12-26-9 , obv, bbands:20-2.5").unwrap();
        let labels: Vec<String> = specs.iter().map(IndicatorSpec::label).collect();

        assert_eq!(labels, vec!["SMA_20", "EMA_14", "MACD_12_26_9", "OBV", "BBANDS_20_2.5"]);
        assert_eq!(specs[2].params(), &[12.0, 26.0, 9.0]);
    }

    #[test]
    fn test_empty_items_ignored() {
        assert!(parse_indicator_specs("").unwrap().is_empty());
        assert_eq!(parse_indicator_specs("RSI:14,, ,").unwrap().len(), 1);
    }

    #[test]
    fn test_invalid_items() {
        assert_eq!(
            parse_indicator_specs("RSI:abc").unwrap_err(),
            SpecParseError::InvalidParameter {
                item: "RSI:abc".to_string(),
                value: "abc".to_string()
            }
        );
        assert!(parse_indicator_specs("RSI:").is_err());
        assert!(parse_indicator_specs("MACD:12--9").is_err());
        assert!(matches!(
            parse_indicator_specs(":14"),
            Err(SpecParseError::MissingName { .. })
        ));
    }
}
