//! Prompt construction
//!
//! Endpoints that cannot find a user-authored message fall back to a prompt
//! rendered from the whole conversation.

use crate::error::EndpointError;
use crate::types::{EndpointParameters, MessageRole, ModelConfig};

/// Renders a conversation into a single prompt string.
pub trait PromptBuilder: Send + Sync {
    fn build_prompt(
        &self,
        params: &EndpointParameters,
        model: &ModelConfig,
    ) -> Result<String, EndpointError>;
}

/// Plain transcript renderer.
///
/// ```text
/// <preprompt>
///
/// User: ...
/// Assistant: ...
/// Assistant:
/// ```
///
/// With `continue_message` the trailing assistant message is left open
/// instead of starting a new turn.
#[derive(Debug, Clone)]
pub struct DefaultPromptBuilder {
    pub user_label: String,
    pub assistant_label: String,
    pub system_label: String,
}

impl Default for DefaultPromptBuilder {
    fn default() -> Self {
        Self {
            user_label: "User".to_string(),
            assistant_label: "Assistant".to_string(),
            system_label: "System".to_string(),
        }
    }
}

impl DefaultPromptBuilder {
    fn label(&self, role: MessageRole) -> &str {
        match role {
            MessageRole::User => &self.user_label,
            MessageRole::Assistant => &self.assistant_label,
            MessageRole::System => &self.system_label,
        }
    }
}

impl PromptBuilder for DefaultPromptBuilder {
    fn build_prompt(
        &self,
        params: &EndpointParameters,
        _model: &ModelConfig,
    ) -> Result<String, EndpointError> {
        let mut prompt = String::new();
        if let Some(preprompt) = params.preprompt.as_deref().filter(|p| !p.is_empty()) {
            prompt.push_str(preprompt);
            prompt.push_str("\n\n");
        }

        let continuing = params.continue_message
            && params
                .messages
                .last()
                .is_some_and(|m| m.from == MessageRole::Assistant);

        let count = params.messages.len();
        for (i, message) in params.messages.iter().enumerate() {
            prompt.push_str(self.label(message.from));
            prompt.push_str(": ");
            prompt.push_str(&message.content);
            if !(continuing && i + 1 == count) {
                prompt.push('\n');
            }
        }

        if !continuing {
            prompt.push_str(&self.assistant_label);
            prompt.push(':');
        }
        Ok(prompt)
    }
}
