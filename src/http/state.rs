//! Application state for the HTTP server.

use std::sync::Arc;

use crate::config::GatewayConfig;
use crate::fetch::HttpClient;

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Pooled outbound client.
    pub client: Arc<dyn HttpClient>,
    /// Immutable upstream settings, including the credential.
    pub config: Arc<GatewayConfig>,
}

impl AppState {
    pub fn new(client: Arc<dyn HttpClient>, config: GatewayConfig) -> Self {
        Self {
            client,
            config: Arc::new(config),
        }
    }
}
