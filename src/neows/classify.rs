//! Size and speed bucketing of near-earth objects.

use tracing::debug;

use crate::error::{NeoError, Result};
use crate::neows::types::NeoRecord;
use crate::neows::validate::ValidatedPayload;

/// Minimum estimated diameter bucket.
///
/// | Range (km)   | Category |
/// |--------------|----------|
/// | < 0.5        | Small    |
/// | 0.5 .. < 1.0 | Medium   |
/// | >= 1.0       | Large    |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeCategory {
    Small,
    Medium,
    Large,
}

/// Relative velocity bucket of the first close approach.
///
/// | Range (km/h)     | Category |
/// |------------------|----------|
/// | < 10 000         | Slow     |
/// | 10 000 .. < 30 000 | Moderate |
/// | >= 30 000        | Fast     |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpeedCategory {
    Slow,
    Moderate,
    Fast,
}

impl SizeCategory {
    pub const ALL: [SizeCategory; 3] = [Self::Small, Self::Medium, Self::Large];

    pub fn label(self) -> &'static str {
        match self {
            Self::Small => "Small (<0.5km)",
            Self::Medium => "Medium (0.5-1km)",
            Self::Large => "Large (>=1km)",
        }
    }
}

impl SpeedCategory {
    pub const ALL: [SpeedCategory; 3] = [Self::Slow, Self::Moderate, Self::Fast];

    pub fn label(self) -> &'static str {
        match self {
            Self::Slow => "Slow (<10k km/h)",
            Self::Moderate => "Moderate (10k-30k km/h)",
            Self::Fast => "Fast (>=30k km/h)",
        }
    }
}

pub fn classify_size(diameter_km: f64) -> SizeCategory {
    match diameter_km {
        d if d < 0.5 => SizeCategory::Small,
        d if d < 1.0 => SizeCategory::Medium,
        _ => SizeCategory::Large,
    }
}

pub fn classify_speed(kmh: f64) -> SpeedCategory {
    match kmh {
        v if v < 10_000.0 => SpeedCategory::Slow,
        v if v < 30_000.0 => SpeedCategory::Moderate,
        _ => SpeedCategory::Fast,
    }
}

/// Occurrence counts per category, indexed by the category's position in `ALL`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Tally {
    pub sizes: [u64; 3],
    pub speeds: [u64; 3],
}

impl Tally {
    pub fn size(&self, category: SizeCategory) -> u64 {
        self.sizes[category as usize]
    }

    pub fn speed(&self, category: SpeedCategory) -> u64 {
        self.speeds[category as usize]
    }

    fn record(&mut self, size: SizeCategory, speed: SpeedCategory) {
        self.sizes[size as usize] += 1;
        self.speeds[speed as usize] += 1;
    }
}

/// Buckets every record of every date in the payload.
///
/// Date grouping is flattened away. Speed uses only the first close approach
/// of each object. Any record that fails to decode, or has no close approach,
/// fails the whole payload and no partial tally is returned.
pub fn classify_payload(payload: &ValidatedPayload) -> Result<Tally> {
    let mut tally = Tally::default();

    for (date, records) in payload.dates() {
        for (index, value) in records.iter().enumerate() {
            let record = NeoRecord::decode(value, date, index)?;

            let kmh = record.first_approach_kmh().ok_or_else(|| {
                NeoError::InternalAggregation(format!(
                    "record {index} on {date} ({}) has no close approach data",
                    record.label()
                ))
            })?;

            let size = classify_size(record.diameter_min_km());
            let speed = classify_speed(kmh);
            debug!(neo = record.label(), ?size, ?speed, "Classified");

            tally.record(size, speed);
        }
    }

    Ok(tally)
}
