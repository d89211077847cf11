//! Input data model: values, per-feature samples and tabular datasets.

mod dataset;
mod sample;
mod value;


pub use dataset::Dataset;
pub use sample::Sample;
pub use value::{Category, Value};
