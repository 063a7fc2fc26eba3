//! Forward-only upstream endpoints.
//!
//! Each target issues one GET and hands the upstream body back untouched.

use reqwest::Url;
use tracing::info;

use crate::config::GatewayConfig;
use crate::error::{NeoError, Result};
use crate::fetch::auth::UrlParam;
use crate::fetch::{HttpClient, UpstreamBody, endpoint_url, fetch_bytes};

/// The fixed upstream resources the gateway mirrors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Passthrough {
    /// Astronomy Picture of the Day.
    AstronomyPicture,
    /// Curiosity rover photos for sol 1000.
    MarsRover,
    /// EPIC natural-colour Earth imagery.
    EarthImage,
    /// Current ISS position. Needs no credential.
    IssLocation,
}

impl Passthrough {
    pub fn path(self) -> &'static str {
        match self {
            Self::AstronomyPicture => "/planetary/apod",
            Self::MarsRover => "/mars-photos/api/v1/rovers/curiosity/photos",
            Self::EarthImage => "/EPIC/api/natural/images",
            Self::IssLocation => "/iss-now.json",
        }
    }

    fn fixed_query(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::MarsRover => &[("sol", "1000")],
            _ => &[],
        }
    }

    fn needs_key(self) -> bool {
        !matches!(self, Self::IssLocation)
    }

    pub fn url(self, config: &GatewayConfig) -> Url {
        let base = match self {
            Self::IssLocation => &config.iss_base_url,
            _ => &config.nasa_base_url,
        };
        let mut url = endpoint_url(base, self.path());
        for (name, value) in self.fixed_query() {
            url.query_pairs_mut().append_pair(name, value);
        }
        url
    }
}

/// Fetches `target` and returns its body verbatim.
pub async fn forward<C: HttpClient + ?Sized>(
    client: &C,
    config: &GatewayConfig,
    target: Passthrough,
) -> Result<UpstreamBody> {
    info!(?target, "Forwarding upstream request");

    let url = target.url(config);
    let fetch = async {
        if target.needs_key() {
            fetch_bytes(&UrlParam::api_key(client, &config.api_key), url).await
        } else {
            fetch_bytes(client, url).await
        }
    };

    tokio::time::timeout(config.upstream_timeout(), fetch)
        .await
        .map_err(|_| NeoError::UpstreamTimeout(config.upstream_timeout()))?
}
