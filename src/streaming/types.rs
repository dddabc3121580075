//! Core Streaming Types

use futures::Stream;
use std::pin::Pin;

use crate::error::EndpointError;
use crate::types::GenerationToken;

/// Token Stream - the lazy sequence every endpoint returns.
///
/// The stream is pull-driven: the body is only read when the consumer asks
/// for the next token. Dropping it releases the upstream connection.
pub type TokenStream = Pin<Box<dyn Stream<Item = Result<GenerationToken, EndpointError>> + Send>>;

/// Token stream with a cancellation handle.
pub struct TokenStreamHandle {
    /// The underlying token stream
    pub stream: TokenStream,
    /// Handle to cancel the stream
    pub cancel: crate::utils::cancel::CancelHandle,
}

/// Identifies one streaming request in logs.
#[derive(Debug, Clone)]
pub struct StreamContext {
    pub endpoint: String,
    pub request_id: String,
}

impl StreamContext {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            request_id: uuid::Uuid::new_v4().to_string(),
        }
    }
}
