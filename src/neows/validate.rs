//! Top-level shape check on the raw feed body.

use serde_json::{Map, Value};
use tracing::error;

use crate::error::{NeoError, Result};

/// Key under which the feed groups objects by close-approach date.
pub const GROUPING_KEY: &str = "near_earth_objects";

/// A feed body known to contain `near_earth_objects` as a map of date to list.
/// Individual records inside the lists are not checked here.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedPayload {
    by_date: Map<String, Value>,
}

impl ValidatedPayload {
    /// `(date, records)` pairs, sorted by date key.
    pub fn dates(&self) -> impl Iterator<Item = (&str, &[Value])> + '_ {
        self.by_date.iter().map(|(date, records)| {
            let records = records.as_array().map(Vec::as_slice).unwrap_or_default();
            (date.as_str(), records)
        })
    }

    pub fn record_count(&self) -> usize {
        self.dates().map(|(_, records)| records.len()).sum()
    }
}

/// Parses the raw body and checks the grouping key.
///
/// On failure the full body is logged for diagnosis; the returned error
/// carries only the name of the missing key.
pub fn validate_payload(raw: &[u8]) -> Result<ValidatedPayload> {
    let document: Value = match serde_json::from_slice(raw) {
        Ok(v) => v,
        Err(e) => {
            error!(
                error = %e,
                payload = %String::from_utf8_lossy(raw),
                "Invalid API response (not JSON)"
            );
            return Err(NeoError::MalformedUpstreamResponse(GROUPING_KEY));
        }
    };

    let by_date = match document.get(GROUPING_KEY) {
        Some(Value::Object(map)) if map.values().all(Value::is_array) => map.clone(),
        _ => {
            error!(
                payload = %document,
                "Invalid API response (no {GROUPING_KEY})"
            );
            return Err(NeoError::MalformedUpstreamResponse(GROUPING_KEY));
        }
    };

    Ok(ValidatedPayload { by_date })
}
