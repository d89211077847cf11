//! Tabular dataset: named columns of equal length.

use serde::{Deserialize, Serialize};

use super::sample::Sample;
use crate::error::{DriftError, Result};

/// Ordered collection of named feature columns.
///
/// Deserialization goes through [`Dataset::from_columns`], so ragged input
/// is rejected there too.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDataset")]
pub struct Dataset {
    columns: Vec<(String, Sample)>,
}

#[derive(Deserialize)]
struct RawDataset {
    columns: Vec<(String, Sample)>,
}

impl TryFrom<RawDataset> for Dataset {
    type Error = DriftError;

    fn try_from(raw: RawDataset) -> Result<Self> {
        Self::from_columns(raw.columns)
    }
}

impl Dataset {
    /// Create an empty dataset
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dataset from `(name, sample)` pairs.
    pub fn from_columns<N, S, I>(columns: I) -> Result<Self>
    where
        N: Into<String>,
        S: Into<Sample>,
        I: IntoIterator<Item = (N, S)>,
    {
        let mut dataset = Self::new();
        for (name, sample) in columns {
            dataset.push_column(name, sample)?;
        }
        Ok(dataset)
    }

    /// Append a column, or replace one with the same name.
    ///
    /// The column must match the current row count.
    pub fn push_column(&mut self, name: impl Into<String>, sample: impl Into<Sample>) -> Result<()> {
        let name = name.into();
        let sample = sample.into();

        if let Some((_, first)) = self.columns.iter().find(|(n, _)| *n != name) {
            if first.len() != sample.len() {
                return Err(DriftError::ColumnLengthMismatch {
                    column: name,
                    expected: first.len(),
                    actual: sample.len(),
                });
            }
        }

        match self.columns.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = sample,
            None => self.columns.push((name, sample)),
        }
        Ok(())
    }

    /// Builder-style `push_column`
    pub fn with_column(mut self, name: impl Into<String>, sample: impl Into<Sample>) -> Result<Self> {
        self.push_column(name, sample)?;
        Ok(self)
    }

    /// Look up a column by name
    pub fn column(&self, name: &str) -> Option<&Sample> {
        self.columns.iter().find(|(n, _)| n == name).map(|(_, s)| s)
    }

    /// Whether a column exists
    pub fn contains(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Column names in insertion order
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(n, _)| n.as_str())
    }

    /// Iterate over `(name, sample)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Sample)> {
        self.columns.iter().map(|(n, s)| (n.as_str(), s))
    }

    /// Number of columns
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows (0 for a dataset without columns)
    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, |(_, s)| s.len())
    }
}
