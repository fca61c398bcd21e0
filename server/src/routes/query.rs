//! Query relay route.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use insight_client::net::types::QueryRequest;

use crate::state::AppState;

/// `POST /query` forwards the chat query upstream and relays its reply.
///
/// The upstream status is passed through: the query service reports its own
/// validation and pipeline errors as `{answer}` bodies with 4xx/5xx status.
pub async fn query(State(state): State<AppState>, Json(request): Json<QueryRequest>) -> Response {
    tracing::debug!(query_len = request.query.len(), "relaying query");
    match state.backend.query(&request).await {
        Ok(reply) => {
            tracing::debug!(status = reply.status, "query answered");
            reply.into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "query upstream failed");
            e.into_response()
        }
    }
}

#[cfg(test)]
#[path = "query_test.rs"]
mod tests;
