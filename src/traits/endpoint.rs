//! Endpoint capability trait

use async_trait::async_trait;

use crate::error::EndpointError;
use crate::streaming::{TokenStream, TokenStreamHandle};
use crate::types::EndpointParameters;
use crate::utils::cancel::make_stream_handle;

/// A text-generation backend: given a conversation, produce a lazy sequence
/// of generation tokens.
///
/// `generate` fails only when the request cannot be made or the upstream
/// rejects it. Everything after that is delivered through the stream, which
/// may end without a terminal token.
#[async_trait]
pub trait Endpoint: Send + Sync {
    /// Short identifier used in logs (e.g. `"langserve"`).
    fn name(&self) -> &'static str;

    async fn generate(&self, params: EndpointParameters) -> Result<TokenStream, EndpointError>;

    /// Like [`generate`](Self::generate), with a handle to abort the stream.
    async fn generate_with_cancel(
        &self,
        params: EndpointParameters,
    ) -> Result<TokenStreamHandle, EndpointError> {
        let stream = self.generate(params).await?;
        Ok(make_stream_handle(stream))
    }
}
