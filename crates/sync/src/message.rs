use serde::{Deserialize, Serialize};

use crate::error::{Result, SyncError};

/// Who wrote a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    /// The local participant (the shopper)
    Local,
    /// The remote conversational agent
    Remote,
}

impl Sender {
    #[must_use]
    pub const fn is_remote(self) -> bool {
        matches!(self, Self::Remote)
    }
}

/// One entry of the append-only message log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
    /// Position in the log (0-based)
    pub sequence_index: usize,
}

impl ChatMessage {
    pub fn new(sender: Sender, text: impl Into<String>, sequence_index: usize) -> Self {
        Self {
            sender,
            text: text.into(),
            sequence_index,
        }
    }

    pub fn remote(text: impl Into<String>, sequence_index: usize) -> Self {
        Self::new(Sender::Remote, text, sequence_index)
    }

    pub fn local(text: impl Into<String>, sequence_index: usize) -> Self {
        Self::new(Sender::Local, text, sequence_index)
    }

    #[must_use]
    pub const fn is_remote(&self) -> bool {
        self.sender.is_remote()
    }
}

/// Append-only, arrival-ordered message log
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
}

impl ChatLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message, assigning the next sequence index
    pub fn push(&mut self, sender: Sender, text: impl Into<String>) -> &ChatMessage {
        let message = ChatMessage::new(sender, text, self.messages.len());
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }

    /// Append a message that already carries its index; it must be the next one
    pub fn append(&mut self, message: ChatMessage) -> Result<&ChatMessage> {
        let expected = self.messages.len();
        if message.sequence_index != expected {
            return Err(SyncError::OutOfOrder {
                expected,
                got: message.sequence_index,
            });
        }
        self.messages.push(message);
        Ok(&self.messages[expected])
    }

    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    #[must_use]
    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.messages.clear();
    }
}
