//! Claude relay tests
//!
//! Claude has no schema-constrained decoding, so every request carries the
//! prompt instructions and every reply goes through text recovery.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use quote_relay::quote::QuoteResponse;
use quote_relay::ProviderKind;

use crate::common::{constants::*, *};
use crate::mocks::{MockAnthropic, MockDocumentStore};

async fn setup() -> (MockDocumentStore, MockAnthropic, axum_test::TestServer) {
    let docs = MockDocumentStore::start().await;
    let claude = MockAnthropic::start().await;
    let server = create_test_server(test_config(
        ProviderKind::Anthropic,
        &claude.uri(),
        &docs.uri(),
    ));
    (docs, claude, server)
}

#[tokio::test]
async fn test_claude_fenced_reply() {
    let (docs, claude, server) = setup().await;
    docs.mock_documents().await;
    claude
        .mock_messages_success(&format!("```\n{}\n```", toronto_quote()))
        .await;

    let response = server
        .post("/")
        .json(&single_message_request(TORONTO_DOCUMENT))
        .await;

    response.assert_status_ok();
    let body: QuoteResponse = response.json();
    assert_eq!(body.model, CLAUDE_MODEL);
    assert_eq!(body.quote["total"], 81836);
    assert_eq!(body.usage.unwrap()["output_tokens"], 733);
}

#[tokio::test]
async fn test_claude_request_shape() {
    let (docs, claude, server) = setup().await;
    docs.mock_documents().await;
    claude
        .mock_messages_success(&toronto_quote().to_string())
        .await;

    server
        .post("/")
        .json(&json!({"messages": [
            {"role": "user", "content": "Earlier document"},
            {"role": "assistant", "content": "Got it"},
            {"role": "user", "content": TORONTO_DOCUMENT}
        ]}))
        .await
        .assert_status_ok();

    let sent: Value = claude.received().await[0].body_json().unwrap();
    assert_eq!(sent["model"], CLAUDE_MODEL);
    assert_eq!(sent["max_tokens"], 4096);
    assert_eq!(sent["system"], MockDocumentStore::expected_system_instruction());

    let messages = sent["messages"].as_array().unwrap();
    assert_eq!(messages[0], json!({"role": "user", "content": "Earlier document"}));
    assert_eq!(messages[1], json!({"role": "assistant", "content": "Got it"}));

    let last = messages[2]["content"].as_str().unwrap();
    assert!(last.starts_with(TORONTO_DOCUMENT));
    assert_eq!(last.matches("IMPORTANT: Return ONLY a valid JSON object").count(), 1);
}

#[tokio::test]
async fn test_claude_error_is_surfaced() {
    let (docs, claude, server) = setup().await;
    docs.mock_documents().await;
    claude
        .mock_messages_error(
            401,
            json!({"type": "error", "error": {"type": "authentication_error", "message": "invalid x-api-key"}}),
        )
        .await;

    let response = server
        .post("/")
        .json(&single_message_request(TORONTO_DOCUMENT))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    let message = body["error"].as_str().unwrap();
    assert!(message.starts_with("Claude API error: 401 - "));
    assert!(message.contains("authentication_error"));
    assert!(!message.contains(TEST_ANTHROPIC_API_KEY));
}

#[tokio::test]
async fn test_claude_blank_reply_is_empty_response() {
    let (docs, claude, server) = setup().await;
    docs.mock_documents().await;
    claude.mock_messages_success("  \n ").await;

    let response = server
        .post("/")
        .json(&single_message_request(TORONTO_DOCUMENT))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    response.assert_json(&json!({
        "error": "No content in Claude response",
        "type": "worker_error"
    }));
}
