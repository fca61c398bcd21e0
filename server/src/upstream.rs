//! Upstream query service client.
//!
//! DESIGN
//! ======
//! The retrieval pipeline that answers questions runs as a separate service.
//! This module relays `POST /query` and `GET /view_source/...` to it and
//! hands the reply back untouched: status, content type and body. Handlers
//! depend on the [`QueryBackend`] trait so tests can swap in a mock.

use std::time::Duration;

use axum::body::Bytes;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use insight_client::net::types::QueryRequest;
use reqwest::Url;

use crate::config::UpstreamTimeouts;

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
    #[error("invalid upstream URL: {0}")]
    InvalidUrl(String),
    #[error("upstream request timed out")]
    Timeout,
    #[error("upstream request failed: {0}")]
    Request(String),
}

impl UpstreamError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Timeout => StatusCode::GATEWAY_TIMEOUT,
            Self::HttpClientBuild(_) | Self::InvalidUrl(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Request(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for UpstreamError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.to_string() });
        (self.status(), axum::Json(body)).into_response()
    }
}

fn classify(e: reqwest::Error) -> UpstreamError {
    if e.is_timeout() { UpstreamError::Timeout } else { UpstreamError::Request(e.to_string()) }
}

// =============================================================================
// REPLY
// =============================================================================

/// Raw upstream reply, relayed to the browser as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamReply {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl IntoResponse for UpstreamReply {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::BAD_GATEWAY);
        let mut response = (status, self.body).into_response();
        if let Some(value) = self.content_type.and_then(|ct| ct.parse().ok()) {
            response.headers_mut().insert(header::CONTENT_TYPE, value);
        }
        response
    }
}

// =============================================================================
// BACKEND
// =============================================================================

#[async_trait::async_trait]
pub trait QueryBackend: Send + Sync {
    /// Forward a chat query.
    ///
    /// # Errors
    ///
    /// Returns an [`UpstreamError`] if the service cannot be reached.
    async fn query(&self, request: &QueryRequest) -> Result<UpstreamReply, UpstreamError>;

    /// Fetch a source document by its `/`-separated path segments.
    ///
    /// # Errors
    ///
    /// Returns an [`UpstreamError`] if the service cannot be reached.
    async fn view_source(&self, segments: &[&str]) -> Result<UpstreamReply, UpstreamError>;
}

pub struct HttpQueryBackend {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpQueryBackend {
    /// Build a backend for the service at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be used as a base or the HTTP
    /// client fails to build.
    pub fn new(base_url: &str, timeouts: UpstreamTimeouts) -> Result<Self, UpstreamError> {
        let base_url = Url::parse(base_url).map_err(|e| UpstreamError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(UpstreamError::InvalidUrl(base_url.to_string()));
        }
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| UpstreamError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    async fn relay(&self, request: reqwest::RequestBuilder) -> Result<UpstreamReply, UpstreamError> {
        let response = request.send().await.map_err(classify)?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = response.bytes().await.map_err(classify)?;
        Ok(UpstreamReply { status, content_type, body })
    }
}

#[async_trait::async_trait]
impl QueryBackend for HttpQueryBackend {
    async fn query(&self, request: &QueryRequest) -> Result<UpstreamReply, UpstreamError> {
        let url = endpoint_url(&self.base_url, &["query"])?;
        self.relay(self.http.post(url).json(request)).await
    }

    async fn view_source(&self, segments: &[&str]) -> Result<UpstreamReply, UpstreamError> {
        let mut path = Vec::with_capacity(segments.len() + 1);
        path.push("view_source");
        path.extend_from_slice(segments);
        let url = endpoint_url(&self.base_url, &path)?;
        self.relay(self.http.get(url)).await
    }
}

/// Append percent-encoded `segments` to the base URL's path.
pub fn endpoint_url(base: &Url, segments: &[&str]) -> Result<Url, UpstreamError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| UpstreamError::InvalidUrl(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

#[cfg(test)]
#[path = "upstream_test.rs"]
mod tests;
