mod client;
mod basic;
pub mod auth;

pub use client::HttpClient;
pub use basic::BasicClient;

use bytes::Bytes;
use reqwest::Url;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, warn};

use crate::error::{NeoError, Result};

/// Body and media type of a successful upstream response.
#[derive(Debug)]
pub struct UpstreamBody {
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// Resolves `path` against the origin of a configured base URL.
pub fn endpoint_url(base: &Url, path: &str) -> Url {
    let mut url = base.clone();
    url.set_path(path);
    url.set_query(None);
    url
}

/// Issues a single GET and returns the body of a 2xx response.
///
/// Transport failures become [`NeoError::UpstreamTransport`] and any other
/// status becomes [`NeoError::UpstreamProtocol`]. The upstream error body is
/// logged, never returned.
pub async fn fetch_bytes<C: HttpClient + ?Sized>(client: &C, url: Url) -> Result<UpstreamBody> {
    let req = reqwest::Request::new(reqwest::Method::GET, url);

    let resp = client.execute(req).await.map_err(NeoError::transport)?;

    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        warn!(%status, body = %body, "Upstream returned non-success status");
        return Err(NeoError::UpstreamProtocol { status });
    }

    let content_type = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let bytes = resp.bytes().await.map_err(NeoError::transport)?;
    debug!(bytes = bytes.len(), "Upstream body received");

    Ok(UpstreamBody {
        content_type,
        bytes,
    })
}
