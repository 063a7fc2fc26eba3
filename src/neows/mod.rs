//! Near-earth-object aggregation.
//!
//! A request flows strictly in order through
//! [`request`] → [`feed`] → [`validate`] → [`classify`] → [`assemble`];
//! the first failure ends it and nothing partial is returned.

pub mod assemble;
pub mod classify;
pub mod feed;
pub mod request;
pub mod types;
pub mod validate;

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::Url;
use tracing::{error, info, warn};

use crate::error::{NeoError, Result};
use crate::fetch::HttpClient;
use assemble::{AggregateResult, assemble};

/// Where and how to reach the feed for one request.
pub struct Upstream<'a, C: ?Sized> {
    pub client: &'a C,
    pub base_url: &'a Url,
    pub api_key: &'a str,
    /// Upper bound on the single suspension point, the feed fetch.
    pub deadline: Duration,
}

/// Runs the whole pipeline for a caller-supplied date range.
///
/// Validation finishes before the upstream is contacted, so rejected input
/// costs no upstream quota. `today` is the caller's notion of the current
/// calendar date.
pub async fn aggregate_range<C: HttpClient + ?Sized>(
    upstream: &Upstream<'_, C>,
    start_date: &str,
    end_date: &str,
    today: NaiveDate,
) -> Result<AggregateResult> {
    let range = request::parse_range(start_date, end_date, today).inspect_err(|e| {
        warn!(start_date, end_date, error = %e, "Rejected NeoWs request");
    })?;

    let (result, record_count) = fetch_and_classify(upstream, &range)
        .await
        .inspect_err(|e| error!(start_date, end_date, error = %e, "NeoWs aggregation failed"))?;

    info!(start_date, end_date, record_count, "Processed NeoWs data");

    Ok(result)
}

async fn fetch_and_classify<C: HttpClient + ?Sized>(
    upstream: &Upstream<'_, C>,
    range: &request::DateRange,
) -> Result<(AggregateResult, usize)> {
    let fetch = feed::fetch_feed(upstream.client, upstream.base_url, range, upstream.api_key);
    let raw = tokio::time::timeout(upstream.deadline, fetch)
        .await
        .map_err(|_| NeoError::UpstreamTimeout(upstream.deadline))??;

    let payload = validate::validate_payload(&raw)?;
    let tally = classify::classify_payload(&payload)?;

    Ok((assemble(&tally), payload.record_count()))
}
