use super::*;

#[test]
fn query_request_serializes_query_field() {
    let body = serde_json::to_value(QueryRequest { query: "Who is on the security team?".to_owned() }).unwrap();
    assert_eq!(body, serde_json::json!({ "query": "Who is on the security team?" }));
}

#[test]
fn query_response_ignores_extra_fields() {
    let resp: QueryResponse = serde_json::from_str(r#"{"answer":"hi","latency_ms":12}"#).unwrap();
    assert_eq!(resp.answer, "hi");
}

#[test]
fn query_response_requires_answer() {
    assert!(serde_json::from_str::<QueryResponse>(r#"{"error":"boom"}"#).is_err());
}

#[test]
fn query_request_missing_field_reads_as_empty() {
    let req: QueryRequest = serde_json::from_str("{}").unwrap();
    assert_eq!(req.query, "");
}
