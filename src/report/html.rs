//! HTML rendering of a drift report.

use std::fmt::Write as FmtWrite;

use super::{DriftReport, TestResult};
use crate::scoring::BinTable;

const STYLE: &str = "\
body { font-family: Arial, sans-serif; padding: 20px; }
h2 { color: #2a6592; }
table { border-collapse: collapse; width: 100%; margin-bottom: 40px; }
th, td { border: 1px solid #ccc; padding: 8px; text-align: center; }
th { background-color: #f2f2f2; }
tr:nth-child(even) { background-color: #f9f9f9; }
.pass { background-color: #d4edda; color: #155724; font-weight: bold; }
.fail { background-color: #f8d7da; color: #721c24; font-weight: bold; }
";

const DETAIL_HEADERS: [&str; 7] =
    ["Min Bin", "Max Bin", "Reference Count", "New Count", "Reference %", "New %", "Drift"];

pub(super) fn render(report: &DriftReport) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n<title>Drift Report</title>\n");
    html.push_str("<style>\n");
    html.push_str(STYLE);
    html.push_str("</style>\n</head>\n<body>\n");

    html.push_str("<h2>Drift Summary</h2>\n<table>\n");
    html.push_str(
        "<tr><th>Feature</th><th>Binning Strategy</th><th>Drift</th><th>Test Result</th></tr>\n",
    );
    for (row, result) in report.verdicts() {
        let _ = writeln!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{:.4}</td><td class=\"{}\">{}</td></tr>",
            escape_html(&row.feature),
            escape_html(row.strategy.name()),
            row.drift,
            result.css_class(),
            result
        );
    }
    html.push_str("</table>\n");

    for (feature, table) in report.ordered_details() {
        let _ = writeln!(html, "<h2>Drift Detail for Feature: {}</h2>", escape_html(feature));
        render_table(&mut html, table);
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn render_table(html: &mut String, table: &BinTable) {
    html.push_str("<table>\n<tr>");
    for header in DETAIL_HEADERS {
        let _ = write!(html, "<th>{header}</th>");
    }
    html.push_str("</tr>\n");
    for row in table {
        let _ = writeln!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{:.4}</td><td>{:.4}</td><td>{:.4}</td></tr>",
            escape_html(&row.bin.min_label()),
            escape_html(&row.bin.max_label()),
            row.reference_count,
            row.new_count,
            row.reference_pct,
            row.new_pct,
            row.contribution
        );
    }
    html.push_str("</table>\n");
}

impl TestResult {
    fn css_class(self) -> &'static str {
        match self {
            TestResult::Pass => "pass",
            TestResult::Fail => "fail",
        }
    }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
