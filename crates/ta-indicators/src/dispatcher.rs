//! Name-based indicator dispatch.

use ta_core::error::{ConfigurationError, IndicatorError};
use ta_core::traits::Indicator;
use ta_core::types::{IndicatorResult, IndicatorSpec, PriceTable, ResultSet, Skipped};
use tracing::{debug, warn};

use crate::registry::{IndicatorKind, Registry};

/// Results of a batch computation over one price table.
#[derive(Debug, Clone, Default)]
pub struct BatchResult {
    /// Computed indicators keyed by canonical label
    pub results: ResultSet,
    /// Indicators that could not be computed on this table
    pub skipped: Vec<Skipped>,
}

/// Resolves indicator names to calculators and runs them.
pub struct Dispatcher<'r> {
    registry: &'r Registry,
}

impl<'r> Dispatcher<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Registry {
        self.registry
    }

    /// Compute one indicator by name.
    ///
    /// Returns the canonical label with the result. `column` is the source
    /// column for indicators that read a single price column.
    pub fn compute(
        &self,
        name: &str,
        params: &[f64],
        table: &PriceTable,
        column: &str,
    ) -> Result<(String, IndicatorResult), IndicatorError> {
        self.compute_spec(&IndicatorSpec::new(name, params.to_vec()), table, column)
    }

    /// Compute one parsed spec.
    pub fn compute_spec(
        &self,
        spec: &IndicatorSpec,
        table: &PriceTable,
        column: &str,
    ) -> Result<(String, IndicatorResult), IndicatorError> {
        let indicator = self.resolve(spec, column)?;
        let label = spec.label();

        debug!(indicator = %label, rows = table.len(), column, "Computing indicator");
        let result = indicator.calculate(table)?;
        Ok((label, result))
    }

    /// Check every spec without computing anything.
    ///
    /// Fails on the first invalid spec.
    pub fn validate(&self, specs: &[IndicatorSpec]) -> Result<(), ConfigurationError> {
        for spec in specs {
            self.resolve(spec, "")?;
        }
        Ok(())
    }

    /// Compute a batch of specs over one table.
    ///
    /// All specs are validated before any computation. Missing columns skip
    /// the affected indicator only. A repeated label replaces the earlier
    /// result in place.
    pub fn compute_all(
        &self,
        table: &PriceTable,
        specs: &[IndicatorSpec],
        column: &str,
    ) -> Result<BatchResult, ConfigurationError> {
        let indicators = specs
            .iter()
            .map(|spec| self.resolve(spec, column))
            .collect::<Result<Vec<_>, _>>()?;

        let mut batch = BatchResult::default();
        for (spec, indicator) in specs.iter().zip(&indicators) {
            let label = spec.label();
            debug!(indicator = %label, rows = table.len(), column, "Computing indicator");

            match indicator.calculate(table) {
                Ok(result) => batch.results.insert(label, result, spec.params().to_vec()),
                Err(e) => {
                    warn!(indicator = %label, error = %e, "Skipping indicator");
                    batch.skipped.push(Skipped::new(label, e));
                }
            }
        }

        Ok(batch)
    }

    fn resolve(&self, spec: &IndicatorSpec, column: &str) -> Result<IndicatorKind, ConfigurationError> {
        self.registry.create(spec, column).map_err(|e| {
            warn!(indicator = %spec, error = %e, "Rejected indicator");
            e
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{close_table, wave_table};
    use ta_core::types::{columns, Bar};

    #[test]
    fn test_labels() {
        let registry = Registry::new();
        let dispatcher = Dispatcher::new(&registry);
        let table = wave_table(60);

        let (label, result) = dispatcher.compute("macd", &[12.0, 26.0, 9.0], &table, "Close").unwrap();
        assert_eq!(label, "MACD_12_26_9");
        assert!(result.as_table().is_some());

        let (label, result) = dispatcher.compute("OBV", &[], &table, "Close").unwrap();
        assert_eq!(label, "OBV");
        assert!(result.as_series().is_some());

        let (label, _) = dispatcher.compute("bbands", &[20.0, 2.5], &table, "Close").unwrap();
        assert_eq!(label, "BBANDS_20_2.5");
    }

    #[test]
    fn test_deserialized_spec_dispatches() {
        let registry = Registry::new();
        let dispatcher = Dispatcher::new(&registry);
        let table = close_table(&[1.0, 2.0, 3.0]);

        let spec: IndicatorSpec = serde_json::from_str(r#"{"name":"sma","params":[2.0]}"#).unwrap();
        let (label, result) = dispatcher.compute_spec(&spec, &table, "Close").unwrap();

        assert_eq!(label, "SMA_2");
        assert_eq!(
            result.as_series().unwrap().values(),
            &[None, Some(1.5), Some(2.5)]
        );
    }

    #[test]
    fn test_unknown_indicator() {
        let registry = Registry::new();
        let dispatcher = Dispatcher::new(&registry);

        let err = dispatcher
            .compute("UNKNOWN", &[], &wave_table(10), "Close")
            .unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("UNKNOWN"));
    }

    #[test]
    fn test_idempotent() {
        let registry = Registry::new();
        let dispatcher = Dispatcher::new(&registry);
        let table = wave_table(80);

        for info in registry.list() {
            let params = match info.name.as_str() {
                "MACD" => vec![12.0, 26.0, 9.0],
                "BBANDS" => vec![20.0, 2.0],
                "OBV" => vec![],
                "FIB" => vec![0.382, 0.618],
                _ => vec![14.0],
            };
            let first = dispatcher.compute(&info.name, &params, &table, "Close").unwrap();
            let second = dispatcher.compute(&info.name, &params, &table, "Close").unwrap();
            assert_eq!(first, second, "{} is not idempotent", info.name);
            assert_eq!(first.1.timestamps(), table.timestamps());
        }
    }

    #[test]
    fn test_empty_table_shapes() {
        let registry = Registry::new();
        let dispatcher = Dispatcher::new(&registry);
        let table = PriceTable::empty();

        let specs = [
            ("SMA", vec![3.0], 1),
            ("EMA", vec![3.0], 1),
            ("RSI", vec![14.0], 1),
            ("MACD", vec![12.0, 26.0, 9.0], 2),
            ("BBANDS", vec![20.0, 2.0], 3),
            ("OBV", vec![], 1),
            ("ADX", vec![14.0], 3),
        ];
        for (name, params, width) in specs {
            let (_, result) = dispatcher.compute(name, &params, &table, "Close").unwrap();
            assert!(result.is_empty());
            assert_eq!(result.sub_series().len(), width, "{name}");
        }
    }

    #[test]
    fn test_compute_all_skips_schema_errors() {
        let registry = Registry::new();
        let dispatcher = Dispatcher::new(&registry);
        let bars: Vec<Bar> = (0..30)
            .map(|i| {
                let c = 100.0 + i as f64;
                Bar::price_only(i, c, c + 1.0, c - 1.0, c)
            })
            .collect();
        let table = PriceTable::from_bars(&bars).unwrap();
        assert!(!table.has_column(columns::VOLUME));

        let specs = vec![
            IndicatorSpec::new("SMA", vec![5.0]),
            IndicatorSpec::new("OBV", vec![]),
            IndicatorSpec::new("RSI", vec![14.0]),
        ];
        let batch = dispatcher.compute_all(&table, &specs, "Close").unwrap();

        let labels: Vec<&str> = batch.results.labels().collect();
        assert_eq!(labels, vec!["SMA_5", "RSI_14"]);
        assert_eq!(batch.skipped.len(), 1);
        assert_eq!(batch.skipped[0].key, "OBV");
        assert_eq!(batch.results.get("SMA_5").unwrap().params, vec![5.0]);
    }

    #[test]
    fn test_compute_all_fails_fast() {
        let registry = Registry::new();
        let dispatcher = Dispatcher::new(&registry);
        let specs = vec![
            IndicatorSpec::new("SMA", vec![5.0]),
            IndicatorSpec::new("MACD", vec![26.0, 12.0, 9.0]),
        ];

        let err = dispatcher
            .compute_all(&close_table(&[1.0, 2.0, 3.0]), &specs, "Close")
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidParameter { .. }));
        assert!(dispatcher.validate(&specs).is_err());
        assert!(dispatcher.validate(&specs[..1]).is_ok());
    }

    #[test]
    fn test_compute_all_duplicate_label() {
        let registry = Registry::new();
        let dispatcher = Dispatcher::new(&registry);
        let specs = vec![
            IndicatorSpec::new("sma", vec![2.0]),
            IndicatorSpec::new("EMA", vec![2.0]),
            IndicatorSpec::new("SMA", vec![2.0]),
        ];

        let batch = dispatcher
            .compute_all(&close_table(&[1.0, 2.0, 3.0]), &specs, "Close")
            .unwrap();
        let labels: Vec<&str> = batch.results.labels().collect();
        assert_eq!(labels, vec!["SMA_2", "EMA_2"]);
    }
}
