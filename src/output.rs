//! Output formatting for one-shot command-line runs.
//!
//! Renders an [`AggregateResult`] as JSON or as a text table for stdout.

use anyhow::Result;
use tracing::debug;

use crate::neows::assemble::{AggregateResult, Histogram};

/// Logs the result using Rust's debug pretty-print format.
pub fn log_pretty(result: &AggregateResult) {
    debug!("{:#?}", result);
}

/// Pretty-printed JSON, the same document `/api/neows` returns.
pub fn render_json(result: &AggregateResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

/// Renders both histograms as an aligned two-column text table.
pub fn render_table(result: &AggregateResult) -> String {
    let mut out = String::new();
    for (title, histogram) in [("Size", &result.sizes), ("Speed", &result.speeds)] {
        push_histogram(&mut out, title, histogram);
    }
    out
}

fn push_histogram(out: &mut String, title: &str, histogram: &Histogram) {
    let width = histogram
        .labels
        .iter()
        .map(String::len)
        .max()
        .unwrap_or(0)
        .max(title.len());

    out.push_str(&format!("{title:<width$}  Count\n"));
    for (label, value) in histogram.labels.iter().zip(&histogram.values) {
        out.push_str(&format!("{label:<width$}  {value:>5}\n"));
    }
}
