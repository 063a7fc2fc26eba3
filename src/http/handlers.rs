//! HTTP handlers for the REST API.

use axum::{
    Json,
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use chrono::Local;
use serde::Deserialize;
use tracing::error;

use super::error::AppError;
use super::state::AppState;
use crate::error::NeoError;
use crate::neows::assemble::AggregateResult;
use crate::neows::{Upstream, aggregate_range};
use crate::passthrough::{self, Passthrough};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Query string of `/api/neows`. Both fields are required; they are optional
/// here so a missing one surfaces as a JSON 400 like every other input error.
#[derive(Debug, Deserialize)]
pub struct NeoWsQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// GET /api/neows?start_date=YYYY-MM-DD&end_date=YYYY-MM-DD
///
/// Size and speed histograms for every object in the range. "Today" is the
/// server's local date at the time of the request.
pub async fn get_neows(
    State(state): State<AppState>,
    Query(query): Query<NeoWsQuery>,
) -> HandlerResult<AggregateResult> {
    let start_date = query
        .start_date
        .ok_or(NeoError::MissingParameter("start_date"))?;
    let end_date = query
        .end_date
        .ok_or(NeoError::MissingParameter("end_date"))?;

    let upstream = Upstream {
        client: state.client.as_ref(),
        base_url: &state.config.nasa_base_url,
        api_key: &state.config.api_key,
        deadline: state.config.upstream_timeout(),
    };
    let today = Local::now().date_naive();

    let result = aggregate_range(&upstream, &start_date, &end_date, today).await?;
    Ok(Json(result))
}

/// GET /api/astronomy-picture
pub async fn get_astronomy_picture(State(state): State<AppState>) -> Result<Response, AppError> {
    forward(&state, Passthrough::AstronomyPicture).await
}

/// GET /api/mars-rover
pub async fn get_mars_rover_photos(State(state): State<AppState>) -> Result<Response, AppError> {
    forward(&state, Passthrough::MarsRover).await
}

/// GET /api/earth-image
pub async fn get_earth_image(State(state): State<AppState>) -> Result<Response, AppError> {
    forward(&state, Passthrough::EarthImage).await
}

/// GET /api/iss-location
pub async fn get_iss_location(State(state): State<AppState>) -> Result<Response, AppError> {
    forward(&state, Passthrough::IssLocation).await
}

async fn forward(state: &AppState, target: Passthrough) -> Result<Response, AppError> {
    let body = passthrough::forward(state.client.as_ref(), &state.config, target)
        .await
        .inspect_err(|e| error!(?target, error = %e, "Upstream forward failed"))?;

    let content_type = body
        .content_type
        .unwrap_or_else(|| "text/plain; charset=utf-8".to_string());

    Ok(([(header::CONTENT_TYPE, content_type)], body.bytes).into_response())
}
