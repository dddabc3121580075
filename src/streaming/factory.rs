//! Stream factory
//!
//! Wires a response body through UTF-8 decoding, a dialect decoder and the
//! event interpreter into a [`TokenStream`].

use futures_util::{Stream, StreamExt};

use super::decoder::StreamDialect;
use super::interpreter::EventInterpreter;
use super::types::{StreamContext, TokenStream};
use super::utf8::Utf8StreamDecoder;
use crate::error::EndpointError;

pub struct StreamFactory;

impl StreamFactory {
    /// Create a token stream from a successful streaming response.
    pub fn create_token_stream(
        response: reqwest::Response,
        dialect: StreamDialect,
        ctx: StreamContext,
    ) -> TokenStream {
        Self::create_token_stream_from_bytes(response.bytes_stream(), dialect, ctx)
    }

    /// Create a token stream from any byte stream.
    ///
    /// The body is read only when the consumer polls. The stream ends right
    /// after the terminal token, or silently when the body ends without an
    /// `end` event. A read error is yielded once and ends the stream. In every
    /// case the body is dropped, which releases the connection; the same
    /// happens when the consumer drops the stream early.
    pub fn create_token_stream_from_bytes<S, B, E>(
        byte_stream: S,
        dialect: StreamDialect,
        ctx: StreamContext,
    ) -> TokenStream
    where
        S: Stream<Item = Result<B, E>> + Send + 'static,
        B: AsRef<[u8]> + Send + 'static,
        E: std::fmt::Display + Send + 'static,
    {
        let stream = async_stream::stream! {
            let mut body = Box::pin(byte_stream);
            let mut utf8 = Utf8StreamDecoder::new();
            let mut decoder = dialect.decoder();
            let mut interpreter = EventInterpreter::new();

            tracing::debug!(
                target: "langserve_endpoints::stream",
                endpoint = %ctx.endpoint,
                request_id = %ctx.request_id,
                dialect = dialect.as_str(),
                "stream opened"
            );

            while let Some(chunk) = body.next().await {
                let text = match chunk {
                    Ok(bytes) => utf8.decode(bytes.as_ref()),
                    Err(e) => {
                        tracing::error!(
                            target: "langserve_endpoints::stream",
                            endpoint = %ctx.endpoint,
                            request_id = %ctx.request_id,
                            error = %e,
                            "stream read failed"
                        );
                        yield Err(EndpointError::StreamError(e.to_string()));
                        return;
                    }
                };
                if text.is_empty() {
                    continue;
                }

                for record in decoder.feed(&text) {
                    if let Some(token) = interpreter.interpret(record) {
                        yield Ok(token);
                    }
                }
                if interpreter.is_finished() {
                    return;
                }
            }

            let tail = utf8.finish();
            let mut records = if tail.is_empty() { Vec::new() } else { decoder.feed(&tail) };
            records.extend(decoder.finish());
            for record in records {
                if let Some(token) = interpreter.interpret(record) {
                    yield Ok(token);
                }
            }

            if !interpreter.is_finished() {
                tracing::debug!(
                    target: "langserve_endpoints::stream",
                    endpoint = %ctx.endpoint,
                    request_id = %ctx.request_id,
                    "body ended without end event"
                );
            }
        };

        Box::pin(stream)
    }
}
