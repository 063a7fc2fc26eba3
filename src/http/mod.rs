//! axum front end for the gateway.
//!
//! Handlers stay thin: they pull the immutable config and the shared client
//! out of [`AppState`] and hand them to [`crate::neows`] or
//! [`crate::passthrough`].

pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::{RouterOptions, create_router};
pub use state::AppState;
