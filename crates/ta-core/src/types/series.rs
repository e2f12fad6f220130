//! Derived series produced by indicators.

use serde::{Deserialize, Serialize};

/// A single derived sequence aligned to the input timestamps.
///
/// `None` marks points that are undefined, either because they fall in the
/// warm-up region or because an input was missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    timestamps: Vec<i64>,
    values: Vec<Option<f64>>,
}

impl Series {
    /// Create a series. Both vectors must have the same length.
    pub fn new(timestamps: Vec<i64>, values: Vec<Option<f64>>) -> Self {
        debug_assert_eq!(timestamps.len(), values.len());
        Self { timestamps, values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn timestamps(&self) -> &[i64] {
        &self.timestamps
    }

    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    /// Number of leading undefined points.
    pub fn leading_undefined(&self) -> usize {
        leading_undefined(&self.values)
    }

    /// Last defined value.
    pub fn last_defined(&self) -> Option<f64> {
        self.values.iter().rev().find_map(|v| *v)
    }
}

/// A small named table of aligned derived sequences.
///
/// Column order is significant and preserved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesTable {
    timestamps: Vec<i64>,
    columns: Vec<(String, Vec<Option<f64>>)>,
}

impl SeriesTable {
    pub fn new(timestamps: Vec<i64>) -> Self {
        Self {
            timestamps,
            columns: Vec::new(),
        }
    }

    /// Append a column. Its length must match the timestamps.
    pub fn with_column(mut self, name: &str, values: Vec<Option<f64>>) -> Self {
        self.push_column(name, values);
        self
    }

    /// Append a column in place.
    pub fn push_column(&mut self, name: &str, values: Vec<Option<f64>>) {
        debug_assert_eq!(self.timestamps.len(), values.len());
        self.columns.push((name.to_string(), values));
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn timestamps(&self) -> &[i64] {
        &self.timestamps
    }

    /// Get a column by name.
    pub fn column(&self, name: &str) -> Option<&[Option<f64>]> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_slice())
    }

    /// Column names in order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(n, _)| n.as_str())
    }

    /// Iterate over `(name, values)` pairs in order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &[Option<f64>])> {
        self.columns.iter().map(|(n, v)| (n.as_str(), v.as_slice()))
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Extract one column as a standalone series.
    pub fn series(&self, name: &str) -> Option<Series> {
        self.column(name)
            .map(|values| Series::new(self.timestamps.clone(), values.to_vec()))
    }

    /// Rescale every column by its first defined value.
    ///
    /// Columns with no defined value, or whose first defined value is zero,
    /// are left unchanged.
    pub fn normalized(&self) -> Self {
        let columns = self
            .columns
            .iter()
            .map(|(name, values)| {
                let base = values.iter().find_map(|v| *v);
                let values = match base {
                    Some(base) if base != 0.0 => {
                        values.iter().map(|v| v.map(|x| x / base)).collect()
                    }
                    _ => values.clone(),
                };
                (name.clone(), values)
            })
            .collect();
        Self {
            timestamps: self.timestamps.clone(),
            columns,
        }
    }
}

/// Output of one indicator computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum IndicatorResult {
    Series(Series),
    Table(SeriesTable),
}

impl IndicatorResult {
    pub fn len(&self) -> usize {
        match self {
            IndicatorResult::Series(s) => s.len(),
            IndicatorResult::Table(t) => t.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn timestamps(&self) -> &[i64] {
        match self {
            IndicatorResult::Series(s) => s.timestamps(),
            IndicatorResult::Table(t) => t.timestamps(),
        }
    }

    pub fn as_series(&self) -> Option<&Series> {
        match self {
            IndicatorResult::Series(s) => Some(s),
            IndicatorResult::Table(_) => None,
        }
    }

    pub fn as_table(&self) -> Option<&SeriesTable> {
        match self {
            IndicatorResult::Series(_) => None,
            IndicatorResult::Table(t) => Some(t),
        }
    }

    /// Sub-series as `(name, values)`; a single series has no name.
    pub fn sub_series(&self) -> Vec<(Option<&str>, &[Option<f64>])> {
        match self {
            IndicatorResult::Series(s) => vec![(None, s.values())],
            IndicatorResult::Table(t) => t.columns().map(|(n, v)| (Some(n), v)).collect(),
        }
    }
}

fn leading_undefined(values: &[Option<f64>]) -> usize {
    values.iter().take_while(|v| v.is_none()).count()
}
