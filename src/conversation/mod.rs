//! Primary conversation store
//!
//! The vote route updates the conversation store first and only then touches
//! the search index. Hosts plug in their own store; [`InMemoryConversationStore`]
//! serves tests and local development.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::EndpointError;
use crate::types::ChatMessage;

#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Set (`Some`) or clear (`None`) the score of one message.
    ///
    /// Returns `Ok(false)` when the conversation or the message does not exist.
    async fn set_message_score(
        &self,
        conversation_id: &str,
        message_id: &str,
        score: Option<i8>,
    ) -> Result<bool, EndpointError>;
}

#[derive(Debug, Default)]
pub struct InMemoryConversationStore {
    conversations: RwLock<HashMap<String, Vec<ChatMessage>>>,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, conversation_id: impl Into<String>, messages: Vec<ChatMessage>) {
        self.conversations
            .write()
            .await
            .insert(conversation_id.into(), messages);
    }

    pub async fn messages(&self, conversation_id: &str) -> Option<Vec<ChatMessage>> {
        self.conversations.read().await.get(conversation_id).cloned()
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn set_message_score(
        &self,
        conversation_id: &str,
        message_id: &str,
        score: Option<i8>,
    ) -> Result<bool, EndpointError> {
        let mut conversations = self.conversations.write().await;
        let Some(messages) = conversations.get_mut(conversation_id) else {
            return Ok(false);
        };
        match messages
            .iter_mut()
            .find(|m| m.id.as_deref() == Some(message_id))
        {
            Some(message) => {
                message.score = score;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
