//! Cross-instrument aggregation of one indicator.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use ta_core::error::{ConfigurationError, IndicatorError};
use ta_core::types::{IndicatorResult, IndicatorSpec, PriceTable, SeriesTable, Skipped};
use tracing::{debug, warn};

use crate::dispatcher::Dispatcher;

/// One indicator evaluated across several instruments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregation {
    /// Canonical label of the indicator
    pub label: String,
    /// Aligned tables, one per sub-series, with one column per instrument
    pub tables: Vec<(String, SeriesTable)>,
    /// Instruments the indicator could not be computed for
    pub skipped: Vec<Skipped>,
}

impl Aggregation {
    /// Get an aligned table by sub-series name.
    pub fn table(&self, name: &str) -> Option<&SeriesTable> {
        self.tables.iter().find(|(n, _)| n == name).map(|(_, t)| t)
    }
}

/// Apply one indicator to every instrument and align the outputs.
///
/// Rows are the union of all instruments' timestamps; an instrument has no
/// value where it has no row. A single-series indicator yields one table
/// named after the label; a multi-series indicator yields one table per
/// sub-series. Instruments whose table lacks a required column are skipped.
pub fn aggregate(
    dispatcher: &Dispatcher<'_>,
    tables: &BTreeMap<String, PriceTable>,
    spec: &IndicatorSpec,
    column: &str,
) -> Result<Aggregation, ConfigurationError> {
    dispatcher.validate(std::slice::from_ref(spec))?;

    let label = spec.label();
    let mut computed: Vec<(&str, IndicatorResult)> = Vec::with_capacity(tables.len());
    let mut skipped = Vec::new();

    for (instrument, table) in tables {
        match dispatcher.compute_spec(spec, table, column) {
            Ok((_, result)) => computed.push((instrument.as_str(), result)),
            Err(IndicatorError::Configuration(e)) => return Err(e),
            Err(IndicatorError::Schema(e)) => {
                warn!(instrument = %instrument, indicator = %label, error = %e, "Skipping instrument");
                skipped.push(Skipped::new(instrument.as_str(), e));
            }
        }
    }

    let timestamps: Vec<i64> = computed
        .iter()
        .flat_map(|(_, result)| result.timestamps().iter().copied())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let positions: HashMap<i64, usize> = timestamps
        .iter()
        .enumerate()
        .map(|(i, &ts)| (ts, i))
        .collect();

    let names: Vec<String> = match computed.first() {
        Some((_, result)) => result
            .sub_series()
            .iter()
            .map(|(name, _)| name.map_or_else(|| label.clone(), str::to_string))
            .collect(),
        None => Vec::new(),
    };

    let mut aligned: Vec<(String, SeriesTable)> = names
        .iter()
        .map(|name| (name.clone(), SeriesTable::new(timestamps.clone())))
        .collect();

    for (instrument, result) in &computed {
        for (index, (_, values)) in result.sub_series().into_iter().enumerate() {
            let Some((_, table)) = aligned.get_mut(index) else {
                continue;
            };
            let mut column_values = vec![None; timestamps.len()];
            for (ts, value) in result.timestamps().iter().zip(values) {
                if let Some(&pos) = positions.get(ts) {
                    column_values[pos] = *value;
                }
            }
            table.push_column(instrument, column_values);
        }
    }

    debug!(
        indicator = %label,
        instruments = computed.len(),
        skipped = skipped.len(),
        rows = timestamps.len(),
        "Aggregated indicator"
    );

    Ok(Aggregation {
        label,
        tables: aligned,
        skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;
    use crate::test_support::{close_table, DAY_MS, START_MS};
    use ta_core::types::Bar;

    fn instruments() -> BTreeMap<String, PriceTable> {
        let mut tables = BTreeMap::new();
        tables.insert("AAA".to_string(), close_table(&[1.0, 2.0, 3.0, 4.0]));
        // Starts one day later
        let bars: Vec<Bar> = [10.0, 20.0, 30.0, 40.0]
            .iter()
            .enumerate()
            .map(|(i, &c)| Bar::new(START_MS + (i as i64 + 1) * DAY_MS, c, c, c, c, 500.0))
            .collect();
        tables.insert("BBB".to_string(), PriceTable::from_bars(&bars).unwrap());
        tables
    }

    #[test]
    fn test_single_series_alignment() {
        let registry = Registry::new();
        let dispatcher = Dispatcher::new(&registry);
        let spec = IndicatorSpec::new("sma", vec![2.0]);

        let aggregation = aggregate(&dispatcher, &instruments(), &spec, "Close").unwrap();
        assert_eq!(aggregation.label, "SMA_2");
        assert_eq!(aggregation.tables.len(), 1);

        let table = aggregation.table("SMA_2").unwrap();
        assert_eq!(table.len(), 5);
        let names: Vec<&str> = table.column_names().collect();
        assert_eq!(names, vec!["AAA", "BBB"]);

        assert_eq!(
            table.column("AAA").unwrap(),
            &[None, Some(1.5), Some(2.5), Some(3.5), None]
        );
        assert_eq!(
            table.column("BBB").unwrap(),
            &[None, None, Some(15.0), Some(25.0), Some(35.0)]
        );
    }

    #[test]
    fn test_multi_series_tables() {
        let registry = Registry::new();
        let dispatcher = Dispatcher::new(&registry);
        let spec = IndicatorSpec::new("BBANDS", vec![2.0, 2.0]);

        let aggregation = aggregate(&dispatcher, &instruments(), &spec, "Close").unwrap();
        let names: Vec<&str> = aggregation.tables.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["upper_band", "middle_band", "lower_band"]);

        for (_, table) in &aggregation.tables {
            assert_eq!(table.num_columns(), 2);
        }
        assert_eq!(
            aggregation.table("middle_band").unwrap().column("AAA").unwrap()[1],
            Some(1.5)
        );
    }

    #[test]
    fn test_missing_column_skips_instrument() {
        let registry = Registry::new();
        let dispatcher = Dispatcher::new(&registry);
        let mut tables = instruments();
        let bars: Vec<Bar> = (0..3)
            .map(|i| Bar::price_only(START_MS + i * DAY_MS, 5.0, 5.0, 5.0, 5.0))
            .collect();
        tables.insert("CCC".to_string(), PriceTable::from_bars(&bars).unwrap());

        let spec = IndicatorSpec::new("OBV", vec![]);
        let aggregation = aggregate(&dispatcher, &tables, &spec, "Close").unwrap();

        assert_eq!(aggregation.skipped.len(), 1);
        assert_eq!(aggregation.skipped[0].key, "CCC");
        let names: Vec<&str> = aggregation.table("OBV").unwrap().column_names().collect();
        assert_eq!(names, vec!["AAA", "BBB"]);
    }

    #[test]
    fn test_configuration_error() {
        let registry = Registry::new();
        let dispatcher = Dispatcher::new(&registry);
        let spec = IndicatorSpec::new("NOPE", vec![]);

        assert!(aggregate(&dispatcher, &instruments(), &spec, "Close").is_err());
    }

    #[test]
    fn test_no_instruments() {
        let registry = Registry::new();
        let dispatcher = Dispatcher::new(&registry);
        let spec = IndicatorSpec::new("RSI", vec![14.0]);

        let aggregation = aggregate(&dispatcher, &BTreeMap::new(), &spec, "Close").unwrap();
        assert!(aggregation.tables.is_empty());
        assert!(aggregation.skipped.is_empty());
    }
}
