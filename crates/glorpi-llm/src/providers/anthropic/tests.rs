use super::convert::convert_messages;
use super::provider::parse_response;
use super::*;
use crate::adapter::ProviderAdapter;
use crate::config::ProviderConfig;
use crate::types::{BuildPayloadParams, Usage};
use glorpi_core::{Message, ModelKnobs, ReasoningEffort};
use serde_json::json;

fn adapter() -> AnthropicAdapter {
    AnthropicAdapter::new(ProviderConfig::new("sk-ant-REDACTED")).unwrap()
}

#[test]
fn test_message_conversion() {
    let messages = vec![
        Message::system("You are helpful"),
        Message::user("Hello"),
        Message::assistant("Hi there!"),
    ];

    let (system, converted) = convert_messages(&messages);

    assert_eq!(system, Some("You are helpful"));
    assert_eq!(converted.len(), 2);
    assert_eq!(converted[0].role, "user");
    assert_eq!(converted[1].role, "assistant");
}

#[test]
fn test_system_only_becomes_user_turn() {
    let messages = vec![Message::system("Only instructions")];
    let (system, converted) = convert_messages(&messages);

    assert_eq!(system, Some("Only instructions"));
    assert_eq!(converted.len(), 1);
    assert_eq!(converted[0].role, "user");
    assert_eq!(converted[0].content, "Only instructions");
}

#[test]
fn test_empty_conversation_says_hello() {
    let (system, converted) = convert_messages(&[]);
    assert_eq!(system, None);
    assert_eq!(converted[0].content, "Hello");
}

#[test]
fn test_system_moves_to_top_level() {
    let messages = vec![Message::system("S"), Message::user("U")];
    let knobs = ModelKnobs::default();
    let request = adapter().build_payload(BuildPayloadParams {
        model: "claude-sonnet-4-20250514",
        messages: &messages,
        knobs: &knobs,
    });

    assert_eq!(request.url, "https://api.anthropic.com/v1/messages");
    assert_eq!(request.body["system"], "S");
    assert_eq!(request.body["messages"], json!([{"role": "user", "content": "U"}]));
    assert_eq!(request.body["max_tokens"], 4096);
    assert!(request.body.get("temperature").is_none());
    assert_eq!(request.header("anthropic-version"), Some(API_VERSION));
    assert_eq!(request.header("x-api-key"), Some("sk-ant-REDACTED"));
    assert_eq!(request.header("content-type"), Some("application/json"));
}

#[test]
fn test_knobs_forwarded() {
    let messages = vec![Message::user("U")];
    let knobs = ModelKnobs::new()
        .with_temperature(0.4)
        .with_top_p(0.8)
        .with_max_output_tokens(1024)
        .with_reasoning_effort(ReasoningEffort::High);
    let request = adapter().build_payload(BuildPayloadParams {
        model: "claude-3-5-haiku-20241022",
        messages: &messages,
        knobs: &knobs,
    });

    assert_eq!(request.body["temperature"], 0.4);
    assert_eq!(request.body["top_p"], 0.8);
    assert_eq!(request.body["max_tokens"], 1024);
    assert!(request.body.get("reasoning_effort").is_none());
    assert!(request.body.get("system").is_none());
}

#[test]
fn test_zero_max_tokens_uses_default() {
    let messages = vec![Message::user("U")];
    let knobs = ModelKnobs::new().with_max_output_tokens(0);
    let request = adapter().build_payload(BuildPayloadParams {
        model: "claude-opus-4-20250514",
        messages: &messages,
        knobs: &knobs,
    });
    assert_eq!(request.body["max_tokens"], DEFAULT_MAX_TOKENS);
}

#[test]
fn test_parse_response() {
    let body = json!({
        "content": [{"type": "text", "text": "Bonjour"}],
        "usage": {"input_tokens": 20, "output_tokens": 5}
    });
    let response = parse_response(&body);
    assert_eq!(response.content.as_deref(), Some("Bonjour"));
    assert_eq!(
        response.usage,
        Some(Usage {
            input_tokens: 20,
            output_tokens: 5,
            total_tokens: 25
        })
    );
}

#[test]
fn test_parse_response_saturates_total() {
    let body = json!({
        "content": [{"type": "text", "text": "hi"}],
        "usage": {"input_tokens": 4_294_967_295u64, "output_tokens": 10}
    });
    let response = parse_response(&body);
    assert!(response.success);
    let usage = response.usage.unwrap();
    assert_eq!(usage.input_tokens, u32::MAX);
    assert_eq!(usage.output_tokens, 10);
    assert_eq!(usage.total_tokens, u32::MAX);
}

#[test]
fn test_parse_response_without_content() {
    let response = parse_response(&json!({"content": []}));
    assert!(response.success);
    assert_eq!(response.content.as_deref(), Some(""));
}

#[test]
fn test_redacted_request_hides_key() {
    let request = adapter().build_payload(BuildPayloadParams {
        model: "claude-sonnet-4-20250514",
        messages: &[Message::user("U")],
        knobs: &ModelKnobs::default(),
    });
    let redacted = request.redacted();
    assert_eq!(redacted.header("x-api-key"), Some("sk-a...ghij"));
    assert!(!format!("{request:?}").contains("1234567890"));
}
