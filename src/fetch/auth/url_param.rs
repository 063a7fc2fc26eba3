use crate::fetch::client::HttpClient;
use async_trait::async_trait;

/// An [`HttpClient`] wrapper that appends an API key as a URL query parameter.
///
/// `param_name` is the query parameter name (`"api_key"` for api.nasa.gov)
/// and `key` is its value. The key is borrowed from the caller for the
/// lifetime of a single request; nothing is retained afterwards.
pub struct UrlParam<'a, C> {
    pub inner: C,
    pub param_name: &'a str,
    pub key: &'a str,
}

impl<'a, C> UrlParam<'a, C> {
    /// Wraps `inner` with the `api_key=<key>` convention used by api.nasa.gov.
    pub fn api_key(inner: C, key: &'a str) -> Self {
        Self {
            inner,
            param_name: "api_key",
            key,
        }
    }
}

#[async_trait]
impl<'a, C: HttpClient> HttpClient for UrlParam<'a, C> {
    async fn execute(&self, mut req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        req.url_mut()
            .query_pairs_mut()
            .append_pair(self.param_name, self.key);
        self.inner.execute(req).await
    }
}
