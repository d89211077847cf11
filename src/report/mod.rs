//! Drift report output.
//!
//! Classifies each summary row against a threshold and renders the summary
//! plus per-feature bin tables as a standalone HTML page or JSON.

mod html;


use std::fmt;
use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::aggregate::{DetailTables, DriftSummary, SummaryRow};
use crate::error::{DriftError, Result};
use crate::scoring::BinTable;

/// Drift above this fails the check.
pub const DEFAULT_DRIFT_THRESHOLD: f64 = 0.25;

/// Default output file for [`DriftReport::write_html`].
pub const DEFAULT_REPORT_PATH: &str = "Drift_Report.html";

/// Verdict for one feature
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum TestResult {
    Pass,
    Fail,
}

impl TestResult {
    /// Pass iff `drift <= threshold`
    pub fn classify(drift: f64, threshold: f64) -> Self {
        if drift <= threshold {
            TestResult::Pass
        } else {
            TestResult::Fail
        }
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestResult::Pass => write!(f, "Pass"),
            TestResult::Fail => write!(f, "Fail"),
        }
    }
}

/// Summary and detail tables of one aggregation, with a pass/fail threshold.
#[derive(Clone, Debug)]
pub struct DriftReport {
    summary: DriftSummary,
    details: DetailTables,
    threshold: f64,
}

#[derive(Serialize)]
struct JsonRow<'a> {
    #[serde(flatten)]
    row: &'a SummaryRow,
    result: TestResult,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    threshold: f64,
    summary: Vec<JsonRow<'a>>,
    details: &'a DetailTables,
}

impl DriftReport {
    /// Create a report
    pub fn new(summary: DriftSummary, details: DetailTables, threshold: f64) -> Self {
        Self { summary, details, threshold }
    }

    /// Create a report with [`DEFAULT_DRIFT_THRESHOLD`]
    pub fn with_default_threshold(summary: DriftSummary, details: DetailTables) -> Self {
        Self::new(summary, details, DEFAULT_DRIFT_THRESHOLD)
    }

    pub fn summary(&self) -> &DriftSummary {
        &self.summary
    }

    pub fn details(&self) -> &DetailTables {
        &self.details
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Summary rows paired with their verdicts
    pub fn verdicts(&self) -> impl Iterator<Item = (&SummaryRow, TestResult)> {
        self.summary
            .rows()
            .iter()
            .map(move |row| (row, TestResult::classify(row.drift, self.threshold)))
    }

    /// Whether every feature passes
    pub fn all_pass(&self) -> bool {
        self.verdicts().all(|(_, result)| result == TestResult::Pass)
    }

    /// Detail tables in summary order, then any without a summary row.
    fn ordered_details(&self) -> Vec<(&str, &BinTable)> {
        let mut out: Vec<(&str, &BinTable)> = self
            .summary
            .rows()
            .iter()
            .filter_map(|row| {
                self.details.get(&row.feature).map(|table| (row.feature.as_str(), table))
            })
            .collect();
        for (feature, table) in &self.details {
            if self.summary.get(feature).is_none() {
                out.push((feature.as_str(), table));
            }
        }
        out
    }

    /// Render a standalone HTML page
    pub fn to_html(&self) -> String {
        html::render(self)
    }

    /// Write the HTML page to `path`
    pub fn write_html(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_html())
            .map_err(|e| DriftError::io_at("writing drift report to", path, e))?;
        info!(path = %path.display(), features = self.summary.len(), "drift report saved");
        Ok(())
    }

    /// Serialize summary, verdicts and details as pretty JSON
    pub fn to_json(&self) -> Result<String> {
        let report = JsonReport {
            threshold: self.threshold,
            summary: self.verdicts().map(|(row, result)| JsonRow { row, result }).collect(),
            details: &self.details,
        };
        Ok(serde_json::to_string_pretty(&report)?)
    }
}
