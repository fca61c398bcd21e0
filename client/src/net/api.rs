//! HTTP helpers for the query endpoint.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning an error since the query is only sent
//! from the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every failure (network, unreadable body, body without `answer`) collapses
//! into an `Err(String)` for the caller to surface as one static message.
//! The HTTP status is not checked: the backend reports its own errors as an
//! `{answer}` body, and those are shown to the user as-is.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::QueryResponse;
#[cfg(feature = "hydrate")]
use super::types::QueryRequest;

/// Endpoint that answers chat queries.
pub const QUERY_ENDPOINT: &str = "/query";

/// Decode a `/query` response body into the answer text.
pub fn parse_answer(body: &str) -> Result<String, String> {
    serde_json::from_str::<QueryResponse>(body)
        .map(|resp| resp.answer)
        .map_err(|e| format!("invalid query response: {e}"))
}

/// Send `query` to [`QUERY_ENDPOINT`] and return the answer.
///
/// # Errors
///
/// Returns an error string if the request cannot be sent or the response
/// does not decode to `{answer}`.
pub async fn post_query(query: &str) -> Result<String, String> {
    #[cfg(feature = "hydrate")]
    {
        let body = QueryRequest { query: query.to_owned() };
        let resp = gloo_net::http::Request::post(QUERY_ENDPOINT)
            .json(&body)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        let status = resp.status();
        let text = resp.text().await.map_err(|e| e.to_string())?;
        parse_answer(&text).map_err(|e| format!("{e} (status {status})"))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = query;
        Err("not available on server".to_owned())
    }
}
