use std::sync::Arc;

use super::*;
use crate::state::test_helpers::{MockBackend, test_app_state};

#[test]
fn source_segments_single_name() {
    assert_eq!(source_segments("employees.csv"), Some(vec!["employees.csv"]));
}

#[test]
fn source_segments_nested_path() {
    assert_eq!(source_segments("policies/security.pdf"), Some(vec!["policies", "security.pdf"]));
}

#[test]
fn source_segments_rejects_traversal_and_empty() {
    for bad in ["", "..", "a/../b", "./a", "a//b", "a/"] {
        assert_eq!(source_segments(bad), None, "expected rejection for {bad:?}");
    }
}

#[tokio::test]
async fn view_source_forwards_segments() {
    let backend = Arc::new(MockBackend::answering(200, "name,role"));
    let response = view_source(State(test_app_state(backend.clone())), Path("hr/employees.csv".to_owned())).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(*backend.sources.lock().unwrap(), vec![vec!["hr".to_owned(), "employees.csv".to_owned()]]);
}

#[tokio::test]
async fn view_source_rejects_traversal_without_calling_upstream() {
    let backend = Arc::new(MockBackend::answering(200, ""));
    let response = view_source(State(test_app_state(backend.clone())), Path("../secrets".to_owned())).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(backend.sources.lock().unwrap().is_empty());
}

#[tokio::test]
async fn view_source_relays_not_found() {
    let backend = Arc::new(MockBackend::answering(404, r#"{"error":"not found"}"#));
    let response = view_source(State(test_app_state(backend)), Path("missing.txt".to_owned())).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
