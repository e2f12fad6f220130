//! Collected indicator results for one instrument.

use serde::{Deserialize, Serialize};

use super::IndicatorResult;

/// One computed indicator together with the parameters that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultEntry {
    pub result: IndicatorResult,
    pub params: Vec<f64>,
}

/// Mapping from canonical label to computed result, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    entries: Vec<(String, ResultEntry)>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a result. An existing entry with the same label is replaced in place.
    pub fn insert(&mut self, label: String, result: IndicatorResult, params: Vec<f64>) {
        let entry = ResultEntry { result, params };
        match self.entries.iter_mut().find(|(l, _)| *l == label) {
            Some((_, existing)) => *existing = entry,
            None => self.entries.push((label, entry)),
        }
    }

    pub fn get(&self, label: &str) -> Option<&ResultEntry> {
        self.entries.iter().find(|(l, _)| l == label).map(|(_, e)| e)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.get(label).is_some()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(l, _)| l.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ResultEntry)> {
        self.entries.iter().map(|(l, e)| (l.as_str(), e))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// An instrument or indicator left out of a batch, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skipped {
    pub key: String,
    pub reason: String,
}

impl Skipped {
    pub fn new(key: impl Into<String>, reason: impl ToString) -> Self {
        Self {
            key: key.into(),
            reason: reason.to_string(),
        }
    }
}
