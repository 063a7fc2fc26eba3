//! Response shape for `/api/neows`.

use serde::Serialize;

use crate::neows::classify::{SizeCategory, SpeedCategory, Tally};

/// Parallel label/count arrays, `labels[i]` counted by `values[i]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Histogram {
    pub labels: Vec<String>,
    pub values: Vec<u64>,
}

impl Histogram {
    fn from_pairs(pairs: impl IntoIterator<Item = (&'static str, u64)>) -> Self {
        let (labels, values) = pairs
            .into_iter()
            .map(|(label, count)| (label.to_string(), count))
            .unzip();
        Self { labels, values }
    }

    /// Count for `label`, zero when the label is absent.
    #[cfg(test)]
    fn count(&self, label: &str) -> u64 {
        self.labels
            .iter()
            .position(|l| l == label)
            .and_then(|i| self.values.get(i).copied())
            .unwrap_or(0)
    }

    #[cfg(test)]
    fn total(&self) -> u64 {
        self.values.iter().sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateResult {
    pub sizes: Histogram,
    pub speeds: Histogram,
}

/// Emits every category in fixed order, zero-filled, so the response shape
/// does not depend on which categories happened to match.
pub fn assemble(tally: &Tally) -> AggregateResult {
    AggregateResult {
        sizes: Histogram::from_pairs(
            SizeCategory::ALL
                .into_iter()
                .map(|c| (c.label(), tally.size(c))),
        ),
        speeds: Histogram::from_pairs(
            SpeedCategory::ALL
                .into_iter()
                .map(|c| (c.label(), tally.speed(c))),
        ),
    }
}
