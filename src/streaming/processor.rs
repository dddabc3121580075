//! Caller-side accumulation of a token stream into a final message.

use futures_util::StreamExt;

use super::types::TokenStream;
use crate::error::EndpointError;
use crate::types::{GeneratedMessage, GenerationToken};

/// Accumulates tokens into a [`GeneratedMessage`].
///
/// The terminal token's `generated_text` wins over the concatenated deltas
/// when both are present; without a terminal token the deltas are the answer.
#[derive(Debug, Default)]
pub struct StreamProcessor {
    text: String,
    token_count: usize,
    completed: bool,
}

impl StreamProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn process_token(&mut self, token: &GenerationToken) {
        if token.is_final() {
            if let Some(full) = &token.generated_text {
                self.text.clone_from(full);
            }
            self.completed = true;
        } else {
            self.text.push_str(&token.text);
            self.token_count += 1;
        }
    }

    /// Text accumulated so far.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn build(self) -> GeneratedMessage {
        GeneratedMessage {
            text: self.text,
            token_count: self.token_count,
            completed: self.completed,
        }
    }
}

/// Drain a token stream into a [`GeneratedMessage`].
///
/// A stream that ends without a terminal token is a valid completion
/// (`completed == false`); a read error is returned as-is.
pub async fn collect_generation(mut stream: TokenStream) -> Result<GeneratedMessage, EndpointError> {
    let mut processor = StreamProcessor::new();
    while let Some(item) = stream.next().await {
        processor.process_token(&item?);
    }
    Ok(processor.build())
}
