//! One feature's observations from one dataset.

use std::collections::BTreeSet;

use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

use super::value::{Category, Value};
use crate::error::{DriftError, Result, SampleRole};

/// Ordered observations for a single feature.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sample {
    values: Vec<Value>,
}

impl Sample {
    /// Create a sample from values
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// Number of observations, missing included
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the sample has no observations at all
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// All observations
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Iterate over all observations
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }

    /// Iterate over non-missing observations
    pub fn non_missing(&self) -> impl Iterator<Item = &Value> {
        self.values.iter().filter(|v| !v.is_missing())
    }

    /// Number of non-missing observations
    pub fn non_missing_len(&self) -> usize {
        self.non_missing().count()
    }

    /// Whether no non-missing observation is text
    pub fn is_numeric(&self) -> bool {
        !self.values.iter().any(Value::is_text)
    }

    /// Numeric observations with missing values dropped.
    ///
    /// Fails if any observation is text.
    pub fn numeric_values(&self, role: SampleRole) -> Result<Vec<f64>> {
        let mut out = Vec::with_capacity(self.values.len());
        for value in &self.values {
            match value {
                Value::Text(_) => return Err(DriftError::NonNumeric { sample: role }),
                other => {
                    if let Some(x) = other.as_f64() {
                        out.push(x);
                    }
                }
            }
        }
        Ok(out)
    }

    /// Distinct non-missing categories, sorted
    pub fn categories(&self) -> BTreeSet<Category> {
        self.values.iter().filter_map(Value::to_category).collect()
    }

    /// Number of distinct non-missing values
    pub fn distinct_count(&self) -> usize {
        self.categories().len()
    }
}

impl From<Vec<Value>> for Sample {
    fn from(values: Vec<Value>) -> Self {
        Self::new(values)
    }
}

impl From<Vec<f64>> for Sample {
    fn from(values: Vec<f64>) -> Self {
        values.into_iter().collect()
    }
}

impl From<&[f64]> for Sample {
    fn from(values: &[f64]) -> Self {
        values.iter().copied().collect()
    }
}

impl From<Vec<Option<f64>>> for Sample {
    fn from(values: Vec<Option<f64>>) -> Self {
        values.into_iter().collect()
    }
}

impl From<Vec<&str>> for Sample {
    fn from(values: Vec<&str>) -> Self {
        values.into_iter().collect()
    }
}

impl From<Vec<String>> for Sample {
    fn from(values: Vec<String>) -> Self {
        values.into_iter().collect()
    }
}

impl From<ArrayView1<'_, f64>> for Sample {
    fn from(values: ArrayView1<'_, f64>) -> Self {
        values.iter().copied().collect()
    }
}

impl<V: Into<Value>> FromIterator<V> for Sample {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

impl<'a> IntoIterator for &'a Sample {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
