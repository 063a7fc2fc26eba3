//! Gateway configuration, read from flags or the environment.

use std::fmt;
use std::time::Duration;

use clap::Args;
use reqwest::Url;

use crate::fetch::BasicClient;

/// Upstream settings shared by every subcommand.
#[derive(Clone, Args)]
pub struct GatewayConfig {
    /// api.nasa.gov credential, passed as the `api_key` query parameter
    #[arg(long, env = "NASA_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Base URL of the NASA open APIs
    #[arg(long, env = "NASA_API_BASE_URL", default_value = "https://api.nasa.gov")]
    pub nasa_base_url: Url,

    /// Base URL of the ISS location service
    #[arg(long, env = "ISS_API_BASE_URL", default_value = "http://api.open-notify.org")]
    pub iss_base_url: Url,

    /// Deadline for a single upstream request, in seconds
    #[arg(long, env = "UPSTREAM_TIMEOUT_SECS", default_value_t = 30)]
    pub upstream_timeout_secs: u64,

    /// Connect timeout for upstream requests, in seconds
    #[arg(long, env = "UPSTREAM_CONNECT_TIMEOUT_SECS", default_value_t = 10)]
    pub connect_timeout_secs: u64,
}

impl GatewayConfig {
    /// Config pointing both upstreams at `base_url`, with default timeouts.
    pub fn with_base_url(api_key: impl Into<String>, base_url: Url) -> Self {
        Self {
            api_key: api_key.into(),
            nasa_base_url: base_url.clone(),
            iss_base_url: base_url,
            upstream_timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Builds the pooled client every request shares.
    pub fn http_client(&self) -> reqwest::Result<BasicClient> {
        BasicClient::new(self.upstream_timeout(), self.connect_timeout())
    }
}

impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("api_key", &"<redacted>")
            .field("nasa_base_url", &self.nasa_base_url.as_str())
            .field("iss_base_url", &self.iss_base_url.as_str())
            .field("upstream_timeout_secs", &self.upstream_timeout_secs)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .finish()
    }
}
