use super::*;

// =============================================================================
// classify_input
// =============================================================================

#[test]
fn blank_lines_are_skipped() {
    assert_eq!(classify_input(""), Input::Skip);
    assert_eq!(classify_input("   \t"), Input::Skip);
}

#[test]
fn exit_words_end_session_in_any_case() {
    for word in ["exit", "quit", "EXIT", " Quit "] {
        assert_eq!(classify_input(word), Input::Exit, "expected exit for {word:?}");
    }
}

#[test]
fn questions_are_trimmed() {
    assert_eq!(classify_input("  Who manages IT?  "), Input::Query("Who manages IT?"));
    assert_eq!(classify_input("exit strategy?"), Input::Query("exit strategy?"));
}

// =============================================================================
// extract_answer
// =============================================================================

#[test]
fn extract_answer_on_success() {
    let value = serde_json::json!({ "answer": "42" });
    assert_eq!(extract_answer(200, &value).unwrap(), "42");
}

#[test]
fn extract_answer_accepts_error_status_with_answer() {
    let value = serde_json::json!({ "answer": "Error: index not ready" });
    assert_eq!(extract_answer(500, &value).unwrap(), "Error: index not ready");
}

#[test]
fn extract_answer_missing_field_on_success() {
    let err = extract_answer(200, &serde_json::json!({})).unwrap_err();
    assert!(matches!(err, CliError::MissingField("answer")));
}

#[test]
fn extract_answer_reports_gateway_errors() {
    let err = extract_answer(502, &serde_json::json!({ "error": "refused" })).unwrap_err();
    assert!(matches!(err, CliError::ServerError { status: 502, .. }));
    assert!(err.to_string().contains("refused"));
}

// =============================================================================
// rewrite_references
// =============================================================================

#[test]
fn references_become_urls() {
    let out = rewrite_references("Source Files: [[employees.csv]], [[it.json]]", "http://host:5000/");
    assert_eq!(
        out,
        "Source Files: employees.csv (http://host:5000/view_source/employees.csv), it.json (http://host:5000/view_source/it.json)"
    );
}

#[test]
fn ansi_codes_pass_through() {
    let out = rewrite_references("\u{1b}[1;30m[[a.pdf]]\u{1b}[0m", "http://h");
    assert_eq!(out, "\u{1b}[1;30ma.pdf (http://h/view_source/a.pdf)\u{1b}[0m");
}

#[test]
fn malformed_references_are_left_alone() {
    assert_eq!(rewrite_references("[[]] [[open", "http://h"), "[[]] [[open");
    assert_eq!(rewrite_references("[[a\nb]]", "http://h"), "[[a\nb]]");
}

#[test]
fn endpoint_joins_without_double_slash() {
    assert_eq!(endpoint("http://h:5000/", "/query"), "http://h:5000/query");
    assert_eq!(endpoint("http://h:5000", "/healthz"), "http://h:5000/healthz");
}

// =============================================================================
// chat_loop
// =============================================================================

/// Accepts connections and never answers, so a query stays in flight.
async fn silent_server() -> (tokio::net::TcpListener, String) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    (listener, base)
}

#[tokio::test]
async fn interrupt_during_query_ends_session() {
    let (listener, base) = silent_server().await;
    let held = tokio::spawn(async move {
        let mut open = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            open.push(socket);
        }
    });
    let client = QueryClient::new(&base, 120).unwrap();
    let lines = BufReader::new(&b"Who approved the budget?\n"[..]).lines();
    let interrupt = async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        Ok::<(), io::Error>(())
    };

    let ended = tokio::time::timeout(Duration::from_secs(5), chat_loop(&client, lines, interrupt)).await;
    assert!(matches!(ended, Ok(Ok(()))), "session should end on interrupt while waiting");
    held.abort();
}

#[tokio::test]
async fn end_of_input_ends_session() {
    let client = QueryClient::new("http://127.0.0.1:9", 1).unwrap();
    let lines = BufReader::new(&b"\n  \n"[..]).lines();
    let result = chat_loop(&client, lines, std::future::pending()).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn exit_word_ends_session_before_interrupt() {
    let client = QueryClient::new("http://127.0.0.1:9", 1).unwrap();
    let lines = BufReader::new(&b"quit\nnever sent\n"[..]).lines();
    let result = chat_loop(&client, lines, std::future::pending()).await;
    assert!(result.is_ok());
}
