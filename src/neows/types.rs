//! Typed view of a single near-earth-object record from the feed.
//!
//! Only the fields the classifier reads are required. Everything else in the
//! upstream document is ignored.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{NeoError, Result};

/// One tracked object as reported by the feed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NeoRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    pub estimated_diameter: EstimatedDiameter,
    #[serde(rename = "close_approach_data")]
    pub close_approaches: Vec<CloseApproach>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EstimatedDiameter {
    pub kilometers: DiameterRange,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DiameterRange {
    #[serde(deserialize_with = "numeric")]
    pub estimated_diameter_min: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CloseApproach {
    pub relative_velocity: RelativeVelocity,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RelativeVelocity {
    #[serde(deserialize_with = "numeric")]
    pub kilometers_per_hour: f64,
}

impl NeoRecord {
    /// Decodes one element of a date bucket. `date` and `index` only feed the
    /// error message.
    pub fn decode(value: &Value, date: &str, index: usize) -> Result<Self> {
        NeoRecord::deserialize(value).map_err(|e| {
            NeoError::InternalAggregation(format!("record {index} on {date}: {e}"))
        })
    }

    pub fn diameter_min_km(&self) -> f64 {
        self.estimated_diameter.kilometers.estimated_diameter_min
    }

    /// Velocity of the first close approach. Later approaches are not consulted.
    pub fn first_approach_kmh(&self) -> Option<f64> {
        self.close_approaches
            .first()
            .map(|a| a.relative_velocity.kilometers_per_hour)
    }

    /// Best identifier available for log lines.
    pub fn label(&self) -> &str {
        self.name
            .as_deref()
            .or(self.id.as_deref())
            .unwrap_or("<unnamed>")
    }
}

/// The feed encodes velocities as decimal strings and diameters as numbers.
/// Either form is accepted for both.
fn numeric<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Numeric {
        Number(f64),
        Text(String),
    }

    match Numeric::deserialize(deserializer)? {
        Numeric::Number(n) => Ok(n),
        Numeric::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("not a number: {s:?}"))),
    }
}
