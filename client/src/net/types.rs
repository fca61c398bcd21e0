//! Wire types for the query endpoint.
//!
//! DESIGN
//! ======
//! Shared by the browser client and the host server so both sides agree on
//! the JSON shape of `POST /query`.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Body of `POST /query`. A missing `query` reads as empty so the query
/// service can answer it with its own message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    #[serde(default)]
    pub query: String,
}

/// Successful (or backend-reported) answer from `POST /query`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub answer: String,
}
