//! Error taxonomy for the NeoWs aggregation pipeline.

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can stop a request between the query string and the
/// assembled histograms.
#[derive(Error, Debug)]
pub enum NeoError {
    /// A required query parameter was absent.
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid date format: '{0}'. Use YYYY-MM-DD.")]
    InvalidDateFormat(String),

    #[error("Start date {start} must be before or equal to end date {end}.")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Date range cannot include future dates (today is {today}).")]
    FutureDateNotAllowed { today: NaiveDate },

    /// The upstream request never produced a response (DNS, connect, reset, timeout).
    /// The URL is stripped before construction so the credential cannot leak.
    #[error("upstream transport error: {0}")]
    UpstreamTransport(#[source] reqwest::Error),

    /// The request-scoped deadline elapsed while waiting on the upstream.
    #[error("upstream did not respond within {0:?}")]
    UpstreamTimeout(Duration),

    #[error("upstream returned status {status}")]
    UpstreamProtocol { status: StatusCode },

    #[error("upstream response is missing '{0}'")]
    MalformedUpstreamResponse(&'static str),

    #[error("failed to aggregate near-earth objects: {0}")]
    InternalAggregation(String),
}

impl NeoError {
    /// Wraps a reqwest failure, dropping the request URL (it carries `api_key`).
    pub fn transport(err: reqwest::Error) -> Self {
        NeoError::UpstreamTransport(err.without_url())
    }

    /// `true` for failures caused by the caller's input.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            NeoError::MissingParameter(_)
                | NeoError::InvalidDateFormat(_)
                | NeoError::InvalidRange { .. }
                | NeoError::FutureDateNotAllowed { .. }
        )
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            NeoError::MissingParameter(_)
            | NeoError::InvalidDateFormat(_)
            | NeoError::InvalidRange { .. }
            | NeoError::FutureDateNotAllowed { .. } => StatusCode::BAD_REQUEST,
            NeoError::UpstreamTransport(e) if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            NeoError::UpstreamTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            NeoError::UpstreamTransport(_)
            | NeoError::UpstreamProtocol { .. }
            | NeoError::MalformedUpstreamResponse(_) => StatusCode::BAD_GATEWAY,
            NeoError::InternalAggregation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable code for the response body.
    pub fn code(&self) -> &'static str {
        match self {
            NeoError::MissingParameter(_) => "MISSING_PARAMETER",
            NeoError::InvalidDateFormat(_) => "INVALID_DATE_FORMAT",
            NeoError::InvalidRange { .. } => "INVALID_RANGE",
            NeoError::FutureDateNotAllowed { .. } => "FUTURE_DATE_NOT_ALLOWED",
            NeoError::UpstreamTransport(_) | NeoError::UpstreamTimeout(_) => "UPSTREAM_UNAVAILABLE",
            NeoError::UpstreamProtocol { .. } => "UPSTREAM_ERROR",
            NeoError::MalformedUpstreamResponse(_) => "UPSTREAM_INVALID_RESPONSE",
            NeoError::InternalAggregation(_) => "AGGREGATION_FAILED",
        }
    }
}

pub type Result<T> = std::result::Result<T, NeoError>;
