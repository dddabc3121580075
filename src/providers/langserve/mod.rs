//! Langserve endpoint
//!
//! Streams from a langserve runnable whose `/stream` route emits
//! CRLF-delimited event blocks. Only the latest user message is sent; a
//! conversation without one produces an empty stream and no request.

mod config;
mod endpoint;

pub use config::LangserveConfig;
pub use endpoint::LangserveEndpoint;
