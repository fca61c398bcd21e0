//! Source document relay route.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::state::AppState;

/// Split a `/view_source/...` path into upstream segments.
///
/// Returns `None` for empty, `.` or `..` segments.
pub fn source_segments(name: &str) -> Option<Vec<&str>> {
    let segments: Vec<&str> = name.split('/').collect();
    if segments.iter().any(|s| s.is_empty() || *s == "." || *s == "..") {
        return None;
    }
    Some(segments)
}

/// `GET /view_source/{*name}` fetches a referenced source document upstream.
pub async fn view_source(State(state): State<AppState>, Path(name): Path<String>) -> Response {
    let Some(segments) = source_segments(&name) else {
        return (StatusCode::BAD_REQUEST, "invalid source name").into_response();
    };
    match state.backend.view_source(&segments).await {
        Ok(reply) => reply.into_response(),
        Err(e) => {
            tracing::warn!(error = %e, %name, "source upstream failed");
            e.into_response()
        }
    }
}

#[cfg(test)]
#[path = "source_test.rs"]
mod tests;
