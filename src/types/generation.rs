//! Generation output types

use serde::{Deserialize, Serialize};

/// One unit of a streamed generation.
///
/// Ids start at 0 and increase by one within a stream. Only the terminal token
/// is `special`; it carries empty `text` and the whole answer in
/// `generated_text`, which is `None` on every other token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationToken {
    pub id: u32,
    pub text: String,
    pub logprob: f32,
    pub special: bool,
    pub generated_text: Option<String>,
}

impl GenerationToken {
    /// A partial-answer token.
    pub fn delta(id: u32, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            logprob: 0.0,
            special: false,
            generated_text: None,
        }
    }

    /// The terminal token carrying the accumulated answer.
    pub fn terminal(id: u32, generated_text: impl Into<String>) -> Self {
        Self {
            id,
            text: String::new(),
            logprob: 0.0,
            special: true,
            generated_text: Some(generated_text.into()),
        }
    }

    pub fn is_final(&self) -> bool {
        self.special
    }
}

static_assertions::assert_impl_all!(GenerationToken: Send, Sync, Clone);

/// A generation accumulated by the caller from a token stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedMessage {
    pub text: String,
    /// Number of non-terminal tokens consumed.
    pub token_count: usize,
    /// `false` when the stream ended without a terminal token.
    pub completed: bool,
}
