use super::types::AnthropicMessage;
use glorpi_core::{Message, MessageRole};

/// Split the system prompt from the conversation.
///
/// Only the first system message is used. The returned list is never empty:
/// when nothing but a system message was given, it is repeated as the user
/// turn.
pub(crate) fn convert_messages(messages: &[Message]) -> (Option<&str>, Vec<AnthropicMessage<'_>>) {
    let system = messages
        .iter()
        .find(|m| m.role == MessageRole::System)
        .map(|m| m.content.as_str());

    let mut converted: Vec<AnthropicMessage<'_>> = messages
        .iter()
        .filter(|m| m.role != MessageRole::System)
        .map(|m| AnthropicMessage {
            role: m.role.as_str(),
            content: &m.content,
        })
        .collect();

    if converted.is_empty() {
        converted.push(AnthropicMessage {
            role: "user",
            content: system.unwrap_or("Hello"),
        });
    }

    (system, converted)
}
