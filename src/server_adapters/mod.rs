//! Server adapters: expose a `TokenStream` over HTTP
//!
//! - **Framework-agnostic helpers**: `text_stream()`, `sse_lines()`
//! - **Axum integration**: `axum::to_sse_response()` and the vote route
//!   (requires the `server-adapters` feature)
//! - **Error masking**: upstream error details are hidden in production
//!
//! ## Events
//!
//! - `event: token` - one non-final token, `{"id", "text", "logprob", "special"}`
//! - `event: end` - the terminal token with `generated_text` (if `include_end`)
//! - `event: error` - a failure while streaming (masked if `mask_errors`)

use std::pin::Pin;

use futures::{Stream, StreamExt};
use serde_json::json;

use crate::error::EndpointError;
use crate::streaming::TokenStream;
use crate::types::GenerationToken;

#[cfg(feature = "server-adapters")]
pub mod axum;

/// Convert a `TokenStream` into a plain text stream of deltas.
///
/// The terminal token carries no new text and is skipped; errors end the stream.
pub fn text_stream(
    mut stream: TokenStream,
) -> Pin<Box<dyn Stream<Item = Result<String, EndpointError>> + Send>> {
    let s = async_stream::try_stream! {
        while let Some(item) = stream.next().await {
            let token = item?;
            if !token.is_final() {
                yield token.text;
            }
        }
    };
    Box::pin(s)
}

/// Options for SSE encoding.
#[derive(Debug, Clone)]
pub struct SseOptions {
    /// Whether to emit the final `end` event carrying the whole answer.
    ///
    /// Default: `true`
    pub include_end: bool,

    /// Replace error details with `masked_error_message`.
    ///
    /// Upstream bodies can contain internal details; keep this on in production.
    /// Default: `true`
    pub mask_errors: bool,

    /// Message used when `mask_errors` is `true`; `"internal error"` if `None`.
    pub masked_error_message: Option<String>,
}

impl Default for SseOptions {
    fn default() -> Self {
        Self {
            include_end: true,
            mask_errors: true,
            masked_error_message: None,
        }
    }
}

impl SseOptions {
    /// Errors not masked.
    pub fn development() -> Self {
        Self {
            mask_errors: false,
            ..Default::default()
        }
    }

    /// Errors masked.
    pub fn production() -> Self {
        Self {
            mask_errors: true,
            ..Default::default()
        }
    }

    pub(crate) fn error_message(&self, error: &EndpointError) -> String {
        if self.mask_errors {
            self.masked_error_message
                .clone()
                .unwrap_or_else(|| "internal error".to_string())
        } else {
            error.user_message()
        }
    }
}

/// SSE event name and JSON data for one token, `None` when `opts` drops it.
pub(crate) fn token_frame(token: &GenerationToken, opts: &SseOptions) -> Option<(&'static str, String)> {
    if token.is_final() {
        if !opts.include_end {
            return None;
        }
        let data = json!({
            "id": token.id,
            "generated_text": token.generated_text,
        });
        Some(("end", data.to_string()))
    } else {
        let data = json!({
            "id": token.id,
            "text": token.text,
            "logprob": token.logprob,
            "special": token.special,
        });
        Some(("token", data.to_string()))
    }
}

/// Convert a `TokenStream` into SSE frames (`"event: X\ndata: ...\n\n"`).
///
/// An error is written as an `error` frame and then returned, ending the stream.
pub fn sse_lines(
    stream: TokenStream,
    opts: SseOptions,
) -> Pin<Box<dyn Stream<Item = Result<String, EndpointError>> + Send>> {
    let s = async_stream::try_stream! {
        futures::pin_mut!(stream);
        while let Some(item) = stream.next().await {
            match item {
                Ok(token) => {
                    if let Some((event, data)) = token_frame(&token, &opts) {
                        yield format!("event: {event}\ndata: {data}\n\n");
                    }
                }
                Err(e) => {
                    let msg = opts.error_message(&e);
                    yield format!("event: error\ndata: {}\n\n", json!({"error": msg}));
                    Err::<(), EndpointError>(e)?;
                }
            }
        }
    };
    Box::pin(s)
}
