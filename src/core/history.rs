use crate::shared::types::{Message, Sender};

/// Append-only chat transcript
///
/// Messages keep the order they were appended in. There is no way to edit,
/// remove or reorder an entry once it is in the log.
#[derive(Debug, Clone, Default)]
pub struct MessageLog {
    messages: Vec<Message>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, message: Message) {
        tracing::debug!("[MessageLog] {:?}: {} chars", message.sender, message.text.chars().count());
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Most recent message from `sender`
    pub fn last_from(&self, sender: Sender) -> Option<&Message> {
        self.messages.iter().rev().find(|m| m.sender == sender)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
