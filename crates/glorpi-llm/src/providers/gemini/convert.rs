use super::types::{Content, Part};
use glorpi_core::{Message, MessageRole};

/// Conversation in Gemini form
#[derive(Debug)]
pub(crate) struct Converted<'a> {
    pub contents: Vec<Content<'a>>,
    /// System prompt still to send as `systemInstruction`
    pub system_instruction: Option<&'a str>,
}

/// Build `contents` in a single pass.
///
/// Consecutive turns with the same role merge into one entry, and the list
/// always opens with a user turn. When the system prompt has to stand in for
/// that opening turn it is not repeated as `systemInstruction`.
pub(crate) fn convert_messages(messages: &[Message]) -> Converted<'_> {
    let system = messages
        .iter()
        .find(|m| m.role == MessageRole::System)
        .map(|m| m.content.as_str());

    let mut contents: Vec<Content<'_>> = Vec::new();
    for message in messages.iter().filter(|m| m.role != MessageRole::System) {
        let role = match message.role {
            MessageRole::Assistant => "model",
            _ => "user",
        };
        let part = Part {
            text: &message.content,
        };
        match contents.last_mut() {
            Some(last) if last.role == role => last.parts.push(part),
            _ => contents.push(Content {
                role,
                parts: vec![part],
            }),
        }
    }

    let mut system_used_as_turn = false;
    if contents.first().map_or(true, |c| c.role != "user") {
        contents.insert(
            0,
            Content {
                role: "user",
                parts: vec![Part {
                    text: system.unwrap_or("Hello"),
                }],
            },
        );
        system_used_as_turn = system.is_some();
    }

    Converted {
        contents,
        system_instruction: system.filter(|_| !system_used_as_turn),
    }
}
