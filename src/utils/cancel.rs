//! Cancellation utilities
//!
//! Provides cancellation handles for token streams.

use tokio_util::sync::CancellationToken;

use crate::streaming::{TokenStream, TokenStreamHandle};

/// A handle that can be used to request cancellation.
#[derive(Clone, Debug)]
pub struct CancelHandle {
    token: CancellationToken,
}

impl CancelHandle {
    fn new() -> Self {
        Self {
            token: CancellationToken::new(),
        }
    }

    /// Request cancellation. A wrapped stream stops at its next poll, or
    /// immediately if it is waiting on the upstream body, and drops the body,
    /// which closes the HTTP connection.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Check if cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// A future that resolves when cancellation is requested.
    pub fn cancelled(&self) -> tokio_util::sync::WaitForCancellationFuture<'_> {
        self.token.cancelled()
    }
}

// Stream-based cancellation is implemented via async_stream to avoid pin projection.

/// Make a TokenStream cancellable and return its cancel handle.
pub fn make_cancellable_stream(stream: TokenStream) -> (TokenStream, CancelHandle) {
    let handle = CancelHandle::new();
    let token = handle.token.clone();
    let mut inner = stream;
    let s = async_stream::stream! {
        use futures::StreamExt;
        loop {
            let next = tokio::select! {
                biased;
                _ = token.cancelled() => None,
                item = inner.next() => item,
            };
            let Some(item) = next else { break };
            yield item;
        }
    };
    (Box::pin(s), handle)
}

/// Wrap a stream into a [`TokenStreamHandle`].
pub fn make_stream_handle(stream: TokenStream) -> TokenStreamHandle {
    let (stream, cancel) = make_cancellable_stream(stream);
    TokenStreamHandle { stream, cancel }
}
