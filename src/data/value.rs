//! Scalar values and categorical keys.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// A single observation: a number, a label, or an explicit missing marker.
///
/// `Number(NaN)` is treated as missing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Numeric observation
    Number(f64),
    /// Categorical/string observation
    Text(String),
    /// Missing observation
    Missing,
}

impl Value {
    /// Whether this value is missing (explicitly or as NaN)
    pub fn is_missing(&self) -> bool {
        match self {
            Value::Missing => true,
            Value::Number(x) => x.is_nan(),
            Value::Text(_) => false,
        }
    }

    /// Numeric view of a non-missing number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(x) if !x.is_nan() => Some(*x),
            _ => None,
        }
    }

    /// Whether this is a non-missing text value
    pub fn is_text(&self) -> bool {
        matches!(self, Value::Text(_))
    }

    /// Categorical key for a non-missing value
    pub fn to_category(&self) -> Option<Category> {
        match self {
            Value::Number(x) if !x.is_nan() => Some(Category::Number(*x)),
            Value::Text(s) => Some(Category::Text(s.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(x) => write!(f, "{x}"),
            Value::Text(s) => write!(f, "{s}"),
            Value::Missing => write!(f, "NA"),
        }
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Number(x)
    }
}

impl From<i32> for Value {
    fn from(x: i32) -> Self {
        Value::Number(f64::from(x))
    }
}

impl From<Option<f64>> for Value {
    fn from(x: Option<f64>) -> Self {
        x.map_or(Value::Missing, Value::Number)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

/// Categorical key: a non-missing value with total order and hashing.
///
/// Numbers sort before text; numbers compare with `f64::total_cmp` after
/// folding `-0.0` into `0.0`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Category {
    /// Numeric label
    Number(f64),
    /// Text label
    Text(String),
}

impl Category {
    fn canonical(x: f64) -> f64 {
        if x == 0.0 {
            0.0
        } else {
            x
        }
    }

    /// Whether `value` is an exact match for this category
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (Category::Number(c), Value::Number(v)) => !v.is_nan() && c == v,
            (Category::Text(c), Value::Text(v)) => c == v,
            _ => false,
        }
    }
}

impl PartialEq for Category {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Category {}

impl PartialOrd for Category {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Category {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Category::Number(a), Category::Number(b)) => {
                Self::canonical(*a).total_cmp(&Self::canonical(*b))
            }
            (Category::Number(_), Category::Text(_)) => Ordering::Less,
            (Category::Text(_), Category::Number(_)) => Ordering::Greater,
            (Category::Text(a), Category::Text(b)) => a.cmp(b),
        }
    }
}

impl Hash for Category {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Category::Number(x) => {
                0u8.hash(state);
                Self::canonical(*x).to_bits().hash(state);
            }
            Category::Text(s) => {
                1u8.hash(state);
                s.hash(state);
            }
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Number(x) => write!(f, "{x}"),
            Category::Text(s) => write!(f, "{s}"),
        }
    }
}
