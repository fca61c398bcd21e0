//! Networking modules for the query endpoint.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` performs the HTTP call and `types` defines the shared wire schema.

pub mod api;
pub mod types;
