//! Router configuration for the HTTP API.
//!
//! Sets up the `/api` routes, CORS for the front-end origin, request tracing
//! and the optional static directory.

use std::path::PathBuf;

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::get,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Server-only knobs that do not affect the pipeline.
#[derive(Debug, Clone, Default)]
pub struct RouterOptions {
    /// Origin allowed to call the API from a browser. `None` disables CORS headers.
    pub cors_origin: Option<HeaderValue>,
    /// Directory served under `/static`.
    pub static_dir: Option<PathBuf>,
}

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState, options: RouterOptions) -> Router {
    let api = Router::new()
        .route("/neows", get(handlers::get_neows))
        .route("/astronomy-picture", get(handlers::get_astronomy_picture))
        .route("/mars-rover", get(handlers::get_mars_rover_photos))
        .route("/earth-image", get(handlers::get_earth_image))
        .route("/iss-location", get(handlers::get_iss_location));

    let mut router = Router::new().nest("/api", api);

    if let Some(dir) = options.static_dir {
        router = router.nest_service("/static", ServeDir::new(dir));
    }

    let mut router = router.layer(TraceLayer::new_for_http());

    if let Some(origin) = options.cors_origin {
        let cors = CorsLayer::new()
            .allow_origin(AllowOrigin::exact(origin))
            .allow_methods([Method::GET]);
        router = router.layer(cors);
    }

    router.with_state(state)
}
