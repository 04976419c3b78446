// ABOUTME: Tests for the Anthropic dialect.
// ABOUTME: Verifies request shape, headers and envelope parsing.

use serde_json::json;

use super::*;
use crate::error::LlmError;

fn config() -> ProviderConfig {
    ProviderConfig {
        name: "anthropic".to_string(),
        api_key: "sk-ant".to_string(),
        model: "claude-3-5-haiku-latest".to_string(),
        protocol: Protocol::Https,
        host: ANTHROPIC_DEFAULT_HOST.to_string(),
        port: 443,
        url_path: ANTHROPIC_DEFAULT_PATH.to_string(),
        system_role: "You are helpful".to_string(),
        color: "region.orangish".to_string(),
        color_code: "#CB4B16".to_string(),
    }
}

#[test]
fn test_baseline_request() {
    let dialect = AnthropicDialect::default();
    let conv = Conversation::new(dialect.history_seed(), "You are helpful");

    let body = dialect.build_request_body(&config(), &conv).unwrap();

    assert_eq!(body["model"], "claude-3-5-haiku-latest");
    assert_eq!(body["messages"], json!([]));
    assert_eq!(body["system"], "You are helpful");
    assert_eq!(body["max_tokens"], 1024);
}

#[test]
fn test_request_with_turns() {
    let dialect = AnthropicDialect::default();
    let mut conv = Conversation::new(dialect.history_seed(), "You are helpful");
    conv.push(Message::user("Hello"));
    conv.push(Message::assistant("Hi"));

    let body = dialect.build_request_body(&config(), &conv).unwrap();

    assert_eq!(
        body["messages"],
        json!([
            {"role": "user", "content": "Hello"},
            {"role": "assistant", "content": "Hi"}
        ])
    );
}

#[test]
fn test_custom_max_tokens() {
    let dialect = AnthropicDialect {
        max_tokens: 64,
        ..Default::default()
    };
    let conv = Conversation::new(dialect.history_seed(), "r");
    let body = dialect.build_request_body(&config(), &conv).unwrap();
    assert_eq!(body["max_tokens"], 64);
}

#[test]
fn test_headers() {
    let headers = AnthropicDialect::default().build_headers(&config());

    assert_eq!(headers.get("x-api-key").unwrap(), "sk-ant");
    assert_eq!(headers.get("anthropic-version").unwrap(), ANTHROPIC_VERSION);
    assert!(!headers.contains_key("Authorization"));
}

#[test]
fn test_response_deserialization() {
    let response = json!({
        "id": "msg_123",
        "type": "message",
        "content": [{"type": "text", "text": "Hello!"}],
        "stop_reason": "end_turn",
        "model": "claude-3-5-haiku-latest",
        "usage": {"input_tokens": 10, "output_tokens": 5}
    });

    let answer = AnthropicDialect::default().extract_answer(&response).unwrap();
    assert_eq!(answer, "Hello!");
}

#[test]
fn test_response_skips_non_text_blocks() {
    let response = json!({
        "content": [
            {"type": "thinking", "thinking": "hmm"},
            {"type": "text", "text": "Answer"}
        ]
    });

    let answer = AnthropicDialect::default().extract_answer(&response).unwrap();
    assert_eq!(answer, "Answer");
}

#[test]
fn test_error_envelope() {
    let response = json!({
        "type": "error",
        "error": {"type": "authentication_error", "message": "invalid x-api-key"}
    });

    match AnthropicDialect::default().extract_answer(&response) {
        Err(LlmError::MalformedResponse { reason, payload }) => {
            assert_eq!(reason, "authentication_error: invalid x-api-key");
            assert!(payload.contains("invalid x-api-key"));
        }
        other => panic!("Expected MalformedResponse, got {:?}", other),
    }
}

#[test]
fn test_empty_content_is_malformed() {
    let result = AnthropicDialect::default().extract_answer(&json!({"content": []}));
    assert!(matches!(result, Err(LlmError::MalformedResponse { .. })));
}
