//! `fetch` transport for the core API client.

use async_trait::async_trait;
use gloo_net::http::Request;
use jsi_catalogue::{ApiError, HttpFetch, HttpResponse};

/// [`HttpFetch`] over the browser's `fetch`, via `gloo-net`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooFetch;

#[async_trait(?Send)]
impl HttpFetch for GlooFetch {
    async fn get(&self, url: &str) -> Result<HttpResponse, ApiError> {
        let response = Request::get(url)
            .send()
            .await
            .map_err(|err| ApiError::transport(url, err.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| ApiError::transport(url, err.to_string()))?;
        Ok(HttpResponse { status, body })
    }
}
