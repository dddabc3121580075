//! Axum-specific server adapters
//!
//! - **SSE Response**: `to_sse_response()` converts a `TokenStream` to `Sse<impl Stream>`
//! - **Text Response**: `to_text_stream()` streams the answer as plain text
//! - **Vote route**: `vote_router()` records feedback scores
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use langserve_endpoints::conversation::InMemoryConversationStore;
//! use langserve_endpoints::search_log::DisabledLog;
//! use langserve_endpoints::server_adapters::axum::{VoteState, vote_router};
//!
//! let app = vote_router(VoteState::new(
//!     Arc::new(InMemoryConversationStore::new()),
//!     Arc::new(DisabledLog),
//! ));
//! ```

use std::convert::Infallible;
use std::pin::Pin;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::sse::{Event, Sse};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use futures::{Stream, StreamExt};
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::conversation::ConversationStore;
use crate::error::EndpointError;
use crate::search_log::ChatLogSink;
use crate::server_adapters::{SseOptions, token_frame};
use crate::streaming::TokenStream;

/// Convert a `TokenStream` into an Axum SSE response.
///
/// Tokens become `token` events and the terminal token an `end` event.
/// A stream error becomes an `error` event.
pub fn to_sse_response(
    stream: TokenStream,
    opts: SseOptions,
) -> Sse<impl Stream<Item = Result<Event, Infallible>> + Send> {
    let event_stream = stream.filter_map(move |item| {
        let event = match item {
            Ok(token) => token_frame(&token, &opts)
                .map(|(name, data)| Event::default().event(name).data(data)),
            Err(e) => {
                let data = json!({"error": opts.error_message(&e)});
                Some(Event::default().event("error").data(data.to_string()))
            }
        };
        futures::future::ready(event.map(Ok))
    });

    Sse::new(event_stream)
}

/// Convert a `TokenStream` into a plain text stream for Axum.
///
/// Errors are written inline since a text body has no error channel.
pub fn to_text_stream(
    stream: TokenStream,
) -> Pin<Box<dyn Stream<Item = Result<String, Infallible>> + Send>> {
    let text_stream = stream.filter_map(|item| async move {
        match item {
            Ok(token) if token.is_final() => None,
            Ok(token) => Some(Ok(token.text)),
            Err(e) => Some(Ok(format!("\n[Error: {}]\n", e.user_message()))),
        }
    });

    Box::pin(text_stream)
}

impl IntoResponse for EndpointError {
    fn into_response(self) -> Response {
        let status = self
            .status_code()
            .and_then(|code| StatusCode::from_u16(code).ok())
            .filter(|status| status.is_client_error())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            tracing::error!(target: "langserve_endpoints::http", error = %self, "request failed");
        }
        (status, Json(json!({"message": self.user_message()}))).into_response()
    }
}

/// Shared state of the vote route.
#[derive(Clone)]
pub struct VoteState {
    pub store: Arc<dyn ConversationStore>,
    pub search_log: Arc<dyn ChatLogSink>,
}

impl VoteState {
    pub fn new(store: Arc<dyn ConversationStore>, search_log: Arc<dyn ChatLogSink>) -> Self {
        Self { store, search_log }
    }
}

/// Body of a vote request.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VoteRequest {
    #[serde(deserialize_with = "integral_number")]
    #[validate(range(min = -1, max = 1))]
    pub score: i64,
}

/// Any JSON number without a fractional part (`1` and `1.0` alike).
fn integral_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Number::deserialize(deserializer)?;
    if let Some(n) = value.as_i64() {
        return Ok(n);
    }
    match value.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 => Ok(f as i64),
        _ => Err(serde::de::Error::custom(format!("expected an integer, got {value}"))),
    }
}

/// Router exposing `POST /conversation/{id}/message/{message_id}/vote`.
pub fn vote_router(state: VoteState) -> Router {
    Router::new()
        .route("/conversation/{id}/message/{message_id}/vote", post(vote))
        .with_state(state)
}

async fn vote(
    State(state): State<VoteState>,
    Path((conversation_id, message_id)): Path<(String, String)>,
    payload: Result<Json<VoteRequest>, JsonRejection>,
) -> Result<StatusCode, EndpointError> {
    let Json(request) =
        payload.map_err(|e| EndpointError::InvalidParameter(format!("Invalid vote body: {e}")))?;
    request
        .validate()
        .map_err(|e| EndpointError::InvalidParameter(format!("Invalid score: {e}")))?;
    let score = i8::try_from(request.score)
        .map_err(|_| EndpointError::InvalidParameter("Invalid score".to_string()))?;

    let stored = (score != 0).then_some(score);
    let matched = state
        .store
        .set_message_score(&conversation_id, &message_id, stored)
        .await?;
    if !matched {
        return Err(EndpointError::NotFound("Message not found".to_string()));
    }

    tracing::debug!(
        target: "langserve_endpoints::http",
        conversation_id = %conversation_id,
        message_id = %message_id,
        score,
        "vote recorded"
    );

    let search_log = Arc::clone(&state.search_log);
    tokio::spawn(async move {
        search_log
            .update_score(&conversation_id, &message_id, score)
            .await;
    });

    Ok(StatusCode::OK)
}
