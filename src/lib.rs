//! # langserve-endpoints - Streaming adapters for langserve runnables
//!
//! Turns the streamed response of a langserve `/stream` route into a uniform
//! sequence of generation tokens, and records chat messages and feedback
//! scores in a search index.
//!
#![deny(unsafe_code)]

//! ## Features
//!
//! - **Two wire dialects**: LF-delimited (`atilangserve`) and CRLF-delimited
//!   (`langserve`) event blocks, decoded independently of chunk boundaries.
//! - **Lazy streams**: the body is read only as tokens are pulled; dropping or
//!   cancelling the stream releases the connection.
//! - **Best-effort search log**: Elasticsearch failures are logged, never returned.
//! - **HTTP Customization**: a `reqwest::Client` is injected into every endpoint and sink.
//! - **Server adapters**: SSE/text responses and the vote route for axum
//!   (`server-adapters` feature).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use langserve_endpoints::prelude::*;
//! use futures::StreamExt;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config: EndpointConfig = serde_json::from_str(
//!         r#"{"type": "langserve", "url": "http://localhost:8000/chat"}"#,
//!     )?;
//!     let endpoint = build_endpoint(config, reqwest::Client::new())?;
//!
//!     let params = EndpointParameters::new(vec![ChatMessage::user("m1", "Hello!")]);
//!     let mut stream = endpoint.generate(params).await?;
//!     while let Some(token) = stream.next().await {
//!         let token = token?;
//!         if token.is_final() {
//!             println!("\n{}", token.generated_text.unwrap_or_default());
//!         } else {
//!             print!("{}", token.text);
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod conversation;
pub mod error;
pub mod prompt;
pub mod providers;
pub mod registry;
pub mod search_log;
pub mod server_adapters;
pub mod streaming;
pub mod telemetry;
pub mod traits;
pub mod types;
pub mod utils;

pub use error::{EndpointError, ErrorCategory};
pub use registry::{EndpointConfig, build_endpoint};
pub use streaming::{TokenStream, TokenStreamHandle};
pub use traits::Endpoint;
pub use types::{ChatMessage, EndpointParameters, GenerationToken, ModelConfig};

/// Commonly used items.
pub mod prelude {
    pub use crate::conversation::{ConversationStore, InMemoryConversationStore};
    pub use crate::error::{EndpointError, ErrorCategory};
    pub use crate::prompt::{DefaultPromptBuilder, PromptBuilder};
    pub use crate::providers::{AtiLangserveEndpoint, LangserveConfig, LangserveEndpoint};
    pub use crate::registry::{EndpointConfig, build_endpoint};
    pub use crate::search_log::{ChatLogSink, DisabledLog, ElasticsearchLog, SearchLogConfig};
    pub use crate::streaming::{
        StreamDialect, StreamFactory, TokenStream, TokenStreamHandle, collect_generation,
    };
    pub use crate::traits::Endpoint;
    pub use crate::types::{
        ChatMessage, EndpointParameters, GeneratedMessage, GenerationToken, MessageRole,
        ModelConfig,
    };
    pub use crate::utils::CancelHandle;
}
