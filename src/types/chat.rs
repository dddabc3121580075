//! Conversation types

use serde::{Deserialize, Serialize};

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
    System,
}

/// One message of a stored conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Messages synthesized on the fly (e.g. a preprompt) carry no id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub from: MessageRole,
    pub content: String,
    /// Feedback vote in `[-1, 1]`; absent when the message was never voted on
    /// or the vote was cleared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<i8>,
}

impl ChatMessage {
    pub fn user(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            from: MessageRole::User,
            content: content.into(),
            score: None,
        }
    }

    pub fn assistant(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            from: MessageRole::Assistant,
            content: content.into(),
            score: None,
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self {
            id: None,
            from: MessageRole::System,
            content: content.into(),
            score: None,
        }
    }

    /// A message counts as user-authored only when it is stored (has an id)
    /// and was written by the user.
    pub fn is_user_authored(&self) -> bool {
        self.id.is_some() && self.from == MessageRole::User
    }
}

/// Everything an endpoint receives for one generation.
#[derive(Debug, Clone)]
pub struct EndpointParameters {
    pub messages: Vec<ChatMessage>,
    pub preprompt: Option<String>,
    /// The last assistant message is continued instead of answered.
    pub continue_message: bool,
}

impl EndpointParameters {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            preprompt: None,
            continue_message: false,
        }
    }

    pub fn with_preprompt(mut self, preprompt: impl Into<String>) -> Self {
        self.preprompt = Some(preprompt.into());
        self
    }

    pub fn with_continue_message(mut self, continue_message: bool) -> Self {
        self.continue_message = continue_message;
        self
    }

    /// The most recent user-authored message, if any.
    pub fn last_user_message(&self) -> Option<&ChatMessage> {
        self.messages.iter().rev().find(|m| m.is_user_authored())
    }
}
