use super::convert::convert_messages;
use super::provider::parse_response;
use super::*;
use crate::adapter::ProviderAdapter;
use crate::config::ProviderConfig;
use crate::types::BuildPayloadParams;
use glorpi_core::{Message, ModelKnobs};
use serde_json::json;

fn adapter() -> GeminiAdapter {
    GeminiAdapter::new(ProviderConfig::new("AIzaSyTest1234567890")).unwrap()
}

fn build(messages: &[Message], knobs: &ModelKnobs) -> crate::types::ProviderRequest {
    adapter().build_payload(BuildPayloadParams {
        model: "gemini-2.0-flash",
        messages,
        knobs,
    })
}

#[test]
fn test_roles_renamed() {
    let messages = vec![
        Message::user("Hi"),
        Message::assistant("Hello"),
        Message::user("Bye"),
    ];
    let converted = convert_messages(&messages);
    let roles: Vec<_> = converted.contents.iter().map(|c| c.role).collect();
    assert_eq!(roles, vec!["user", "model", "user"]);
    assert_eq!(converted.system_instruction, None);
}

#[test]
fn test_consecutive_same_role_merged() {
    let messages = vec![
        Message::system("S"),
        Message::user("first"),
        Message::user("second"),
    ];
    let request = build(&messages, &ModelKnobs::default());

    assert_eq!(
        request.body["contents"],
        json!([{"role": "user", "parts": [{"text": "first"}, {"text": "second"}]}])
    );
    assert_eq!(
        request.body["systemInstruction"],
        json!({"parts": [{"text": "S"}]})
    );
}

#[test]
fn test_system_used_as_opening_turn_is_not_repeated() {
    let messages = vec![Message::system("Be brief")];
    let request = build(&messages, &ModelKnobs::default());

    assert_eq!(
        request.body["contents"],
        json!([{"role": "user", "parts": [{"text": "Be brief"}]}])
    );
    assert!(request.body.get("systemInstruction").is_none());
}

#[test]
fn test_leading_model_turn_gets_user_turn() {
    let messages = vec![
        Message::system("S"),
        Message::assistant("I spoke first"),
    ];
    let converted = convert_messages(&messages);

    assert_eq!(converted.contents.len(), 2);
    assert_eq!(converted.contents[0].role, "user");
    assert_eq!(converted.contents[0].parts[0].text, "S");
    assert_eq!(converted.contents[1].role, "model");
    assert_eq!(converted.system_instruction, None);
}

#[test]
fn test_empty_conversation_says_hello() {
    let converted = convert_messages(&[]);
    assert_eq!(converted.contents.len(), 1);
    assert_eq!(converted.contents[0].parts[0].text, "Hello");
    assert_eq!(converted.system_instruction, None);
}

#[test]
fn test_generation_config() {
    let defaults = build(&[Message::user("U")], &ModelKnobs::default());
    assert_eq!(
        defaults.body["generationConfig"],
        json!({"maxOutputTokens": 8192})
    );

    let knobs = ModelKnobs::new()
        .with_max_output_tokens(500)
        .with_temperature(0.9)
        .with_top_p(0.5);
    let tuned = build(&[Message::user("U")], &knobs);
    assert_eq!(
        tuned.body["generationConfig"],
        json!({"maxOutputTokens": 500, "temperature": 0.9, "topP": 0.5})
    );
}

#[test]
fn test_key_in_query_not_header() {
    let request = build(&[Message::user("U")], &ModelKnobs::default());
    assert_eq!(
        request.url,
        "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent?key=AIzaSyTest1234567890"
    );
    assert_eq!(request.headers.len(), 1);
    assert!(!request.redacted().url.contains("Test1234567890"));
}

#[test]
fn test_parse_response() {
    let body = json!({
        "candidates": [{"content": {"role": "model", "parts": [{"text": "Hola"}]}}],
        "usageMetadata": {"promptTokenCount": 7, "candidatesTokenCount": 2, "totalTokenCount": 9}
    });
    let response = parse_response(&body);
    assert_eq!(response.content.as_deref(), Some("Hola"));
    assert_eq!(response.usage.map(|u| u.total_tokens), Some(9));
}
