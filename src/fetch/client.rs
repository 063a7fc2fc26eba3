use async_trait::async_trait;
use reqwest::{Request, Response};

/// Executes a prepared upstream request. Wrappers such as
/// [`UrlParam`](super::auth::UrlParam) decorate a request before delegating.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}

#[async_trait]
impl<'a, C: HttpClient + ?Sized> HttpClient for &'a C {
    async fn execute(&self, req: Request) -> reqwest::Result<Response> {
        (**self).execute(req).await
    }
}
