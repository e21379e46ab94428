//! Message Assembler
//!
//! Collapses a block list into at most two messages: one system message for
//! the system-class blocks and one user message for everything else.

use crate::block::PromptBlock;
use crate::message::{Message, MessageRole};

fn render_block(block: &PromptBlock) -> String {
    if block.title.is_empty() {
        block.content.clone()
    } else {
        format!("## {}\n{}", block.title, block.content)
    }
}

fn render_bucket<'a>(blocks: impl Iterator<Item = &'a PromptBlock>) -> Option<String> {
    let parts: Vec<String> = blocks.map(render_block).collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("\n\n"))
    }
}

/// Convert enabled blocks into normalized messages, preserving block order
/// within each bucket. An all-disabled list yields no messages.
#[must_use]
pub fn blocks_to_messages(blocks: &[PromptBlock]) -> Vec<Message> {
    let (system, user): (Vec<&PromptBlock>, Vec<&PromptBlock>) = blocks
        .iter()
        .filter(|b| b.enabled)
        .partition(|b| b.block_type.is_system_class());

    [
        (MessageRole::System, render_bucket(system.into_iter())),
        (MessageRole::User, render_bucket(user.into_iter())),
    ]
    .into_iter()
    .filter_map(|(role, content)| content.map(|c| Message::new(role, c)))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockType;

    fn block(id: &str, block_type: BlockType, title: &str, content: &str) -> PromptBlock {
        PromptBlock::new(id, block_type, title, content)
    }

    #[test]
    fn test_system_and_user_messages() {
        let blocks = vec![
            block("1", BlockType::System, "System", "You are a helpful assistant."),
            block("2", BlockType::Goal, "Goal", "Complete the task."),
        ];
        let messages = blocks_to_messages(&blocks);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, MessageRole::System);
        assert_eq!(messages[0].content, "## System\nYou are a helpful assistant.");
        assert_eq!(messages[1].role, MessageRole::User);
        assert_eq!(messages[1].content, "## Goal\nComplete the task.");
    }

    #[test]
    fn test_all_disabled_yields_nothing() {
        let blocks = vec![
            block("1", BlockType::System, "System", "x").disabled(),
            block("2", BlockType::Goal, "Goal", "y").disabled(),
        ];
        assert!(blocks_to_messages(&blocks).is_empty());
        assert!(blocks_to_messages(&[]).is_empty());
    }

    #[test]
    fn test_system_class_blocks_merge_in_order() {
        let blocks = vec![
            block("1", BlockType::Role, "Role", "A pirate."),
            block("2", BlockType::Examples, "Examples", "Q: hi A: arr"),
            block("3", BlockType::Constraints, "", "No profanity."),
            block("4", BlockType::Environment, "Env", "Slack bot."),
            block("5", BlockType::Goal, "", "Greet the user."),
        ];
        let messages = blocks_to_messages(&blocks);
        assert_eq!(messages.len(), 2);
        assert_eq!(
            messages[0].content,
            "## Role\nA pirate.\n\nNo profanity.\n\n## Env\nSlack bot."
        );
        assert_eq!(
            messages[1].content,
            "## Examples\nQ: hi A: arr\n\nGreet the user."
        );
    }

    #[test]
    fn test_user_only() {
        let blocks = vec![block("1", BlockType::Custom, "Notes", "Hello")];
        let messages = blocks_to_messages(&blocks);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, MessageRole::User);
    }
}
